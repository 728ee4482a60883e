//! Structured interaction events coming back from the dashboard surface.
//!
//! The JSON shape (`{"command": "openFolder", ...}`) is the one the editor
//! webview posts, so a message can come from a key press in the TUI, a CLI
//! subcommand, or a JSON line on stdin alike.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::color;
use crate::config::io::SettingsStore;
use crate::config::path::ssh_config_path;
use crate::error::{DashboardError, Result};
use crate::icons;
use crate::models::{DiscoveredHosts, HostKind, Layout};
use crate::settings;

fn default_host_type() -> HostKind {
    HostKind::Ssh
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Message {
    #[serde(rename_all = "camelCase")]
    OpenFolder {
        host: String,
        folder: String,
        #[serde(default)]
        new_window: bool,
        #[serde(default = "default_host_type")]
        host_type: HostKind,
    },
    OpenSshConfig,
    /// The webview also posts the two legacy names from its settings links
    #[serde(alias = "openDaSSHboardSetting", alias = "openDashboardPathsSetting")]
    OpenSettings,
    /// Editor-only: leave the current remote window. Nothing to do here.
    CloseRemote,
    UpdateSectionColor {
        section: String,
        #[serde(default)]
        color: String,
    },
    UpdateSectionCollapsed {
        section: String,
        collapsed: bool,
    },
    UpdateLayout {
        layout: Layout,
    },
    #[serde(rename_all = "camelCase")]
    GetHostSettings {
        host: String,
        #[serde(default)]
        host_type: Option<HostKind>,
    },
    #[serde(rename_all = "camelCase")]
    UpdateHostIcon {
        host: String,
        #[serde(default)]
        host_type: Option<HostKind>,
        #[serde(default)]
        icon: String,
        #[serde(default)]
        color: String,
    },
    AddFolder {
        host: String,
        folder: String,
    },
    RemoveFolder {
        host: String,
        folder: String,
    },
    /// Re-run discovery and reconciliation
    Refresh,
}

/// Folder the surface must open in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub kind: HostKind,
    pub host: String,
    pub folder: String,
    pub new_window: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename = "hostSettingsResponse", rename_all = "camelCase")]
pub struct HostSettingsReply {
    pub host: String,
    pub host_type: Option<HostKind>,
    pub current_icon: String,
    pub current_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Settings changed; redraw from the store
    Render,
    /// Settings changed and new hosts may appear: discover again, then redraw
    Rediscover,
    Open(OpenRequest),
    /// Open this file in the user's editor
    Edit(PathBuf),
    Reply(HostSettingsReply),
    /// Nothing to do (unknown section, ...)
    Ignored(String),
}

fn section_kind(section: &str) -> Option<HostKind> {
    section.parse::<HostKind>().ok()
}

fn kind_of(host: &str, explicit: Option<HostKind>, discovered: &DiscoveredHosts) -> Option<HostKind> {
    explicit.or_else(|| discovered.find(host).map(|h| h.kind))
}

/// Apply `message` to the store (persisting mutations) and tell the caller
/// what to do next.
pub fn dispatch(message: Message, store: &mut SettingsStore, discovered: &DiscoveredHosts) -> Result<Outcome> {
    debug!(?message, "dispatching message");
    let outcome = match message {
        Message::OpenFolder { host, folder, new_window, host_type } => {
            if host.trim().is_empty() {
                return Err(DashboardError::UnknownHost(host));
            }
            Outcome::Open(OpenRequest { kind: host_type, host, folder, new_window })
        }
        Message::OpenSshConfig => match ssh_config_path(store.settings.ssh_config_path.as_deref()) {
            Some(p) => Outcome::Edit(p),
            None => Outcome::Ignored("no home directory".to_string()),
        },
        Message::OpenSettings => Outcome::Edit(store.path().to_path_buf()),
        Message::UpdateSectionColor { section, color } => {
            let Some(kind) = section_kind(&section) else {
                return Ok(Outcome::Ignored(format!("unknown section '{section}'")));
            };
            if !color::is_valid(&color) {
                return Err(DashboardError::parse(format!("invalid color '{color}'")));
            }
            store.settings.set_section_color(kind, color.trim());
            store.save()?;
            info!(section = %kind, color = %color, "section color updated");
            Outcome::Rediscover
        }
        Message::UpdateSectionCollapsed { section, collapsed } => {
            let Some(kind) = section_kind(&section) else {
                return Ok(Outcome::Ignored(format!("unknown section '{section}'")));
            };
            store.settings.set_section_collapsed(kind, collapsed);
            store.save()?;
            Outcome::Render
        }
        Message::UpdateLayout { layout } => {
            store.settings.layout = layout;
            store.save()?;
            Outcome::Render
        }
        Message::GetHostSettings { host, host_type } => {
            let hs = settings::host_settings(&store.settings, &host);
            Outcome::Reply(HostSettingsReply {
                host_type: kind_of(&host, host_type, discovered),
                host,
                current_icon: hs.icon,
                current_color: hs.color,
            })
        }
        Message::UpdateHostIcon { host, host_type, icon, color } => {
            let kind = kind_of(&host, host_type, discovered);
            let icon = icons::normalize(&icon)
                .ok_or_else(|| DashboardError::parse(format!("unknown icon '{icon}'")))?;
            if !color::is_valid(&color) {
                return Err(DashboardError::parse(format!("invalid color '{color}'")));
            }
            settings::set_host_appearance(&mut store.settings, &host, kind, &icon, &color)?;
            store.save()?;
            info!(host = %host, icon = %icon, color = %color, "host appearance updated");
            Outcome::Rediscover
        }
        Message::AddFolder { host, folder } => {
            if !folder.trim().is_empty() && !folder.trim().starts_with('/') {
                return Err(DashboardError::parse(format!("'{folder}' is not an absolute path (~ is not expanded remotely)")));
            }
            if discovered.find(&host).map(|h| h.kind) == Some(HostKind::Docker) {
                return Err(DashboardError::Unsupported(format!("'{host}' is a Docker container; it always opens at /")));
            }
            if !settings::add_folder(&mut store.settings, &host, &folder) {
                return Ok(Outcome::Ignored(format!("'{folder}' is empty or already listed for {host}")));
            }
            store.save()?;
            info!(host = %host, folder = %folder, "folder added");
            Outcome::Render
        }
        Message::RemoveFolder { host, folder } => {
            if !settings::remove_folder(&mut store.settings, &host, &folder) {
                return Ok(Outcome::Ignored(format!("'{folder}' is not listed for {host}")));
            }
            store.save()?;
            info!(host = %host, folder = %folder, "folder removed");
            Outcome::Render
        }
        Message::CloseRemote => Outcome::Ignored("closeRemote only applies inside the editor".to_string()),
        Message::Refresh => Outcome::Rediscover,
    };
    if let Outcome::Ignored(reason) = &outcome {
        warn!(reason = %reason, "message ignored");
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Host;

    fn store() -> (tempfile::TempDir, SettingsStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::open(dir.path().join("settings.json"));
        (dir, store)
    }

    #[test]
    fn parses_webview_json() {
        let m: Message = serde_json::from_str(
            r#"{"command":"openFolder","host":"orion","folder":"/srv","newWindow":true,"hostType":"wsl"}"#,
        )
        .unwrap();
        assert_eq!(
            m,
            Message::OpenFolder { host: "orion".into(), folder: "/srv".into(), new_window: true, host_type: HostKind::Wsl }
        );

        let m: Message = serde_json::from_str(r#"{"command":"openFolder","host":"a","folder":"/"}"#).unwrap();
        assert!(matches!(m, Message::OpenFolder { new_window: false, host_type: HostKind::Ssh, .. }));

        let m: Message = serde_json::from_str(r#"{"command":"updateLayout","layout":"list"}"#).unwrap();
        assert_eq!(m, Message::UpdateLayout { layout: Layout::List });
    }

    #[test]
    fn unknown_section_is_ignored_and_not_saved() {
        let (_dir, mut store) = store();
        let out = dispatch(
            Message::UpdateSectionColor { section: "ftp".into(), color: "#ffffff".into() },
            &mut store,
            &DiscoveredHosts::default(),
        )
        .unwrap();
        assert!(matches!(out, Outcome::Ignored(_)));
    }

    #[test]
    fn collapse_is_persisted() {
        let (_dir, mut store) = store();
        let out = dispatch(
            Message::UpdateSectionCollapsed { section: "docker".into(), collapsed: true },
            &mut store,
            &DiscoveredHosts::default(),
        )
        .unwrap();
        assert_eq!(out, Outcome::Render);
        store.reload();
        assert!(store.settings.docker_section_collapsed);
    }

    #[test]
    fn update_icon_creates_missing_entry_and_replies() {
        let (_dir, mut store) = store();
        let none = DiscoveredHosts::default();
        let out = dispatch(
            Message::UpdateHostIcon { host: "new-box".into(), host_type: None, icon: "cloud".into(), color: "#43aa8b".into() },
            &mut store,
            &none,
        )
        .unwrap();
        assert_eq!(out, Outcome::Rediscover);

        let reply = dispatch(Message::GetHostSettings { host: "new-box".into(), host_type: None }, &mut store, &none).unwrap();
        let Outcome::Reply(reply) = reply else { panic!("expected a reply") };
        assert_eq!(reply.current_icon, "lucide:cloud");
        assert_eq!(reply.current_color, "#43aa8b");

        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["command"], "hostSettingsResponse");
        assert_eq!(json["currentIcon"], "lucide:cloud");
    }

    #[test]
    fn docker_hosts_reject_icon_changes() {
        let (_dir, mut store) = store();
        let discovered = DiscoveredHosts { docker: vec![Host::new("api", HostKind::Docker)], ..Default::default() };
        let err = dispatch(
            Message::UpdateHostIcon { host: "api".into(), host_type: None, icon: "box".into(), color: String::new() },
            &mut store,
            &discovered,
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::Unsupported(_)));
    }

    #[test]
    fn invalid_color_is_rejected() {
        let (_dir, mut store) = store();
        let err = dispatch(
            Message::UpdateSectionColor { section: "ssh".into(), color: "banana".into() },
            &mut store,
            &DiscoveredHosts::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::Parse(_)));
        assert_eq!(store.settings.ssh_section_color, "");
    }

    #[test]
    fn folders_are_added_once_and_removed() {
        let (_dir, mut store) = store();
        let none = DiscoveredHosts::default();
        let add = || Message::AddFolder { host: "orion".into(), folder: "/srv/app".into() };
        assert_eq!(dispatch(add(), &mut store, &none).unwrap(), Outcome::Render);
        assert!(matches!(dispatch(add(), &mut store, &none).unwrap(), Outcome::Ignored(_)));

        store.reload();
        assert_eq!(store.settings.hosts["orion"].folders, vec!["/srv/app".to_string()]);

        let out = dispatch(Message::RemoveFolder { host: "orion".into(), folder: "/srv/app".into() }, &mut store, &none);
        assert_eq!(out.unwrap(), Outcome::Render);
        assert!(store.settings.hosts["orion"].folders.is_empty());
    }

    #[test]
    fn relative_and_tilde_folders_are_rejected() {
        let (_dir, mut store) = store();
        let none = DiscoveredHosts::default();
        for folder in ["~/proj", "srv/app"] {
            let err = dispatch(Message::AddFolder { host: "orion".into(), folder: folder.into() }, &mut store, &none)
                .unwrap_err();
            assert!(matches!(err, DashboardError::Parse(_)));
        }
        assert!(!store.settings.hosts.contains_key("orion"));
    }

    #[test]
    fn open_folder_passes_through() {
        let (_dir, mut store) = store();
        let out = dispatch(
            Message::OpenFolder { host: "api".into(), folder: "/".into(), new_window: false, host_type: HostKind::Docker },
            &mut store,
            &DiscoveredHosts::default(),
        )
        .unwrap();
        assert_eq!(
            out,
            Outcome::Open(OpenRequest { kind: HostKind::Docker, host: "api".into(), folder: "/".into(), new_window: false })
        );
    }
}
