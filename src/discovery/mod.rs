//! Host discovery: `~/.ssh/config`, `wsl --list --verbose`, `docker ps`.
//!
//! Each source is queried in turn. A failing source logs and contributes an
//! empty list; it never stops the others.
pub mod docker;
pub mod process;
pub mod ssh_config;
pub mod wsl;

use tracing::{info, warn};

use crate::config::path::ssh_config_path;
use crate::models::{DiscoveredHosts, Settings};

#[derive(Debug, Clone, Copy)]
pub struct DiscoveryOptions {
    /// DNS lookup for SSH hostnames
    pub resolve_ips: bool,
    pub wsl: bool,
    pub docker: bool,
    /// Binary queried for containers
    pub docker_program: &'static str,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        DiscoveryOptions { resolve_ips: true, wsl: true, docker: true, docker_program: "docker" }
    }
}

pub fn discover_all(settings: &Settings, opts: DiscoveryOptions) -> DiscoveredHosts {
    let ssh = match ssh_config_path(settings.ssh_config_path.as_deref()) {
        Some(path) => ssh_config::discover_ssh_hosts(&path, opts.resolve_ips),
        None => {
            warn!("no home directory, cannot locate ssh config");
            Vec::new()
        }
    };
    let wsl = if opts.wsl { wsl::discover_wsl_distros() } else { Vec::new() };
    let docker = if opts.docker { docker::discover_docker_containers(opts.docker_program) } else { Vec::new() };

    info!(ssh = ssh.len(), wsl = wsl.len(), docker = docker.len(), "discovery finished");
    DiscoveredHosts { ssh, wsl, docker }
}

#[cfg(all(test, unix))]
mod tests {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    use super::*;

    fn opts(docker_program: &'static str) -> DiscoveryOptions {
        DiscoveryOptions { resolve_ips: false, wsl: false, docker: true, docker_program }
    }

    fn settings_with_ssh_config(path: &std::path::Path) -> Settings {
        Settings { ssh_config_path: Some(path.to_string_lossy().into_owned()), ..Settings::default() }
    }

    #[test]
    fn unreadable_ssh_config_does_not_stop_docker() {
        let dir = tempfile::tempdir().unwrap();
        // a directory exists but cannot be read as a file
        let ssh_dir = dir.path().join("config.d");
        fs::create_dir(&ssh_dir).unwrap();

        let script = dir.path().join("fake-docker");
        fs::write(&script, "#!/bin/sh\necho 'abc123|api|nginx:1.27|Up 1 minute'\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        let program: &'static str = Box::leak(script.to_string_lossy().into_owned().into_boxed_str());

        let found = discover_all(&settings_with_ssh_config(&ssh_dir), opts(program));
        assert!(found.ssh.is_empty());
        assert_eq!(found.docker.len(), 1);
        assert_eq!(found.docker[0].name, "api");
    }

    #[test]
    fn missing_docker_keeps_ssh_hosts() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config");
        fs::write(&config, "Host orion\n  HostName 10.0.0.7\n").unwrap();

        let found = discover_all(&settings_with_ssh_config(&config), opts("dasshboard-no-such-docker"));
        assert_eq!(found.ssh.len(), 1);
        assert_eq!(found.ssh[0].hostname, "10.0.0.7");
        assert!(found.docker.is_empty());
        assert!(found.wsl.is_empty());
    }
}
