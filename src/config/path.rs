use std::io;
use std::path::{Path, PathBuf};

fn app_config_dir() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
    });
    base.join("dasshboard")
}

pub fn settings_path() -> PathBuf {
    app_config_dir().join("settings.json")
}

pub fn theme_path() -> PathBuf {
    app_config_dir().join("theme.toml")
}

/// Log file location; the TUI owns stdout/stderr so logs never go there.
pub fn log_path() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir);
    base.join("dasshboard").join("dasshboard.log")
}

/// `~/.ssh/config`, or the `sshConfigPath` override with `~` expanded.
pub fn ssh_config_path(custom: Option<&str>) -> Option<PathBuf> {
    match custom.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => Some(PathBuf::from(shellexpand::tilde(p).to_string())),
        None => dirs::home_dir().map(|h| h.join(".ssh").join("config")),
    }
}

pub fn ensure_settings_file(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::write(path, "{}\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_ssh_config_path_is_tilde_expanded() {
        let p = ssh_config_path(Some("~/work/ssh_config")).unwrap();
        assert!(!p.to_string_lossy().starts_with('~'));
        assert!(p.ends_with("work/ssh_config"));
    }

    #[test]
    fn blank_override_falls_back_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(ssh_config_path(Some("  ")), Some(home.join(".ssh").join("config")));
        }
    }

    #[test]
    fn ensure_creates_parent_and_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/settings.json");
        ensure_settings_file(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
    }
}
