//! Remote folder URIs and the editor launch that opens them.

use std::path::Path;
use std::process::{Command, Stdio};

use serde::Serialize;
use tracing::info;

use crate::error::{DashboardError, Result};
use crate::models::HostKind;

/// Where this program itself is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteContext {
    Local,
    Ssh,
    Wsl,
    Docker,
}

impl RemoteContext {
    pub fn label(self) -> &'static str {
        match self {
            RemoteContext::Local => "local",
            RemoteContext::Ssh => "SSH session",
            RemoteContext::Wsl => "WSL distro",
            RemoteContext::Docker => "container",
        }
    }

    pub fn kind(self) -> Option<HostKind> {
        match self {
            RemoteContext::Local => None,
            RemoteContext::Ssh => Some(HostKind::Ssh),
            RemoteContext::Wsl => Some(HostKind::Wsl),
            RemoteContext::Docker => Some(HostKind::Docker),
        }
    }
}

/// Context from environment variables (`SSH_CONNECTION`, `SSH_TTY`,
/// `WSL_DISTRO_NAME`) and the `/.dockerenv` marker.
pub fn detect_remote_context() -> RemoteContext {
    let env = |k: &str| std::env::var_os(k).is_some_and(|v| !v.is_empty());
    context_from(env("SSH_CONNECTION") || env("SSH_TTY"), env("WSL_DISTRO_NAME"), Path::new("/.dockerenv").exists())
}

fn context_from(ssh: bool, wsl: bool, docker: bool) -> RemoteContext {
    if ssh {
        RemoteContext::Ssh
    } else if docker {
        RemoteContext::Docker
    } else if wsl {
        RemoteContext::Wsl
    } else {
        RemoteContext::Local
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Container path: root becomes empty (the URI then ends in a single `/`),
/// relative paths get a leading `/`, repeated slashes collapse.
fn normalize_container_path(folder: &str) -> String {
    let trimmed = folder.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return String::new();
    }
    let mut out = String::with_capacity(trimmed.len() + 1);
    if !trimmed.starts_with('/') {
        out.push('/');
    }
    for c in trimmed.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}

/// SSH / WSL path part: always starts with `/` so it cannot run into the
/// authority (`ssh-remote+orion~/x`).
fn absolute_path(folder: &str) -> String {
    let trimmed = folder.trim();
    match trimmed {
        "" => "/".to_string(),
        p if p.starts_with('/') => p.to_string(),
        p => format!("/{p}"),
    }
}

/// `vscode-remote://` folder URI for a host.
pub fn folder_uri(kind: HostKind, host: &str, folder: &str) -> Result<String> {
    let uri = match kind {
        HostKind::Ssh => format!("vscode-remote://ssh-remote+{host}{}", absolute_path(folder)),
        HostKind::Wsl => format!("vscode-remote://wsl+{host}{}", absolute_path(folder)),
        HostKind::Docker => {
            #[derive(Serialize)]
            #[serde(rename_all = "camelCase")]
            struct Attached<'a> {
                container_name: &'a str,
            }
            let json = serde_json::to_string(&Attached { container_name: host })?;
            let path = normalize_container_path(folder);
            let path = if path.is_empty() { "/".to_string() } else { path };
            format!("vscode-remote://attached-container+{}{}", hex_encode(json.as_bytes()), path)
        }
    };
    Ok(uri)
}

/// Editor invocation for a folder URI.
pub fn editor_command(editor: &str, uri: &str, new_window: bool) -> Command {
    let mut cmd = Command::new(editor);
    cmd.arg("--folder-uri")
        .arg(uri)
        .arg(if new_window { "--new-window" } else { "--reuse-window" });
    cmd
}

/// Open `folder` on `host` in the editor. The editor detaches on its own.
pub fn open_folder(editor: &str, kind: HostKind, host: &str, folder: &str, new_window: bool) -> Result<()> {
    let uri = folder_uri(kind, host, folder)?;
    info!(kind = %kind, host, folder, %uri, new_window, "opening remote folder");
    let status = editor_command(editor, &uri, new_window)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| DashboardError::command(editor, e.to_string()))?;
    if !status.success() {
        return Err(DashboardError::command(editor, status.to_string()));
    }
    Ok(())
}

/// Editor used for local files: `$VISUAL`, then `$EDITOR`, then `fallback`.
pub fn local_editor(fallback: &str) -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|k| std::env::var(k).ok())
        .find(|v| !v.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Open a local file (settings, ssh config) and wait for the editor.
pub fn edit_file(editor: &str, path: &Path) -> Result<()> {
    info!(editor, path = %path.display(), "editing file");
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or_else(|| DashboardError::command(editor, "empty editor command"))?;
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| DashboardError::command(program, e.to_string()))?;
    if !status.success() {
        return Err(DashboardError::command(program, status.to_string()));
    }
    Ok(())
}
