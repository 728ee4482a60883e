//! Reconciliation of discovered hosts with the settings store, and the
//! per-host / per-section mutations the dashboard can request.

use tracing::{debug, info};

use crate::error::{DashboardError, Result};
use crate::models::{DiscoveredHosts, Host, HostKind, HostSettings, Layout, Settings};

/// Folder a new host entry starts with.
pub fn default_folder(host: &Host) -> String {
    match host.kind {
        HostKind::Ssh => match host.user.as_deref() {
            Some(u) if !u.is_empty() => format!("/home/{u}"),
            _ => "/home".to_string(),
        },
        HostKind::Wsl => "/home".to_string(),
        HostKind::Docker => "/workspaces".to_string(),
    }
}

/// Add a default entry for every SSH and WSL host the store does not know.
/// Existing entries are left untouched; Docker containers are never stored.
/// Returns the names that were added, in discovery order.
pub fn reconcile(settings: &mut Settings, discovered: &DiscoveredHosts) -> Vec<String> {
    let mut added = Vec::new();
    for host in discovered.ssh.iter().chain(discovered.wsl.iter()) {
        if settings.hosts.contains_key(&host.name) {
            continue;
        }
        settings.hosts.insert(
            host.name.clone(),
            HostSettings {
                folders: vec![default_folder(host)],
                color: String::new(),
                icon: String::new(),
            },
        );
        added.push(host.name.clone());
    }

    if added.is_empty() {
        debug!("no new hosts detected, settings are up to date");
    } else {
        info!(count = added.len(), hosts = %added.join(", "), "added new hosts to settings");
    }
    added
}

/// Folders shown on a card.
pub fn effective_folders(host: &Host, settings: &Settings) -> Vec<String> {
    if host.kind == HostKind::Docker {
        return vec!["/".to_string()];
    }
    if let Some(stored) = settings.hosts.get(&host.name) {
        if !stored.folders.is_empty() {
            return stored.folders.clone();
        }
    }
    match host.user.as_deref() {
        Some("root") => vec!["/root".to_string()],
        Some(u) if !u.is_empty() => vec![format!("/home/{u}")],
        _ => vec!["/home".to_string()],
    }
}

/// Stored settings for a host, or empty ones.
pub fn host_settings(settings: &Settings, name: &str) -> HostSettings {
    settings.hosts.get(name).cloned().unwrap_or_default()
}

fn ensure_customizable(kind: Option<HostKind>, name: &str) -> Result<()> {
    if kind == Some(HostKind::Docker) {
        return Err(DashboardError::Unsupported(format!(
            "'{name}' is a Docker container; its icon and color are fixed"
        )));
    }
    Ok(())
}

/// Set icon and color of a host; creates the entry when missing.
pub fn set_host_appearance(
    settings: &mut Settings,
    name: &str,
    kind: Option<HostKind>,
    icon: &str,
    color: &str,
) -> Result<()> {
    ensure_customizable(kind, name)?;
    let entry = settings.hosts.entry(name.to_string()).or_default();
    entry.icon = icon.trim().to_string();
    entry.color = color.trim().to_string();
    Ok(())
}

pub fn set_host_icon(settings: &mut Settings, name: &str, kind: Option<HostKind>, icon: &str) -> Result<()> {
    ensure_customizable(kind, name)?;
    settings.hosts.entry(name.to_string()).or_default().icon = icon.trim().to_string();
    Ok(())
}

pub fn set_host_color(settings: &mut Settings, name: &str, kind: Option<HostKind>, color: &str) -> Result<()> {
    ensure_customizable(kind, name)?;
    settings.hosts.entry(name.to_string()).or_default().color = color.trim().to_string();
    Ok(())
}

/// Append a folder (ignored when already listed). Returns whether it changed.
pub fn add_folder(settings: &mut Settings, name: &str, folder: &str) -> bool {
    let folder = folder.trim();
    if folder.is_empty() {
        return false;
    }
    let entry = settings.hosts.entry(name.to_string()).or_default();
    if entry.folders.iter().any(|f| f == folder) {
        return false;
    }
    entry.folders.push(folder.to_string());
    true
}

/// Remove a folder. Returns whether it was present.
pub fn remove_folder(settings: &mut Settings, name: &str, folder: &str) -> bool {
    let Some(entry) = settings.hosts.get_mut(name) else { return false; };
    let before = entry.folders.len();
    entry.folders.retain(|f| f != folder.trim());
    entry.folders.len() != before
}

pub fn toggle_layout(settings: &mut Settings) -> Layout {
    settings.layout = settings.layout.toggled();
    settings.layout
}
