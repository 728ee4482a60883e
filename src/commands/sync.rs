use crate::config::io::SettingsStore;
use crate::error::Result;
use crate::models::DiscoveredHosts;
use crate::settings::reconcile;

/// Add newly discovered SSH / WSL hosts to the store and report them.
pub fn sync_hosts(store: &mut SettingsStore, discovered: &DiscoveredHosts) -> Result<Vec<String>> {
    let added = reconcile(&mut store.settings, discovered);
    if !added.is_empty() {
        store.save()?;
    }
    Ok(added)
}

pub fn print_sync(added: &[String], discovered: &DiscoveredHosts) {
    println!(
        "Discovered {} SSH hosts, {} WSL distros, {} Docker containers.",
        discovered.ssh.len(),
        discovered.wsl.len(),
        discovered.docker.len()
    );
    if added.is_empty() {
        println!("Settings are up to date.");
    } else {
        println!("Added to settings: {}", added.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Host, HostKind};

    #[test]
    fn second_sync_adds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SettingsStore::open(dir.path().join("settings.json"));
        let discovered = DiscoveredHosts {
            ssh: vec![Host::new("orion", HostKind::Ssh)],
            wsl: vec![Host::new("Debian", HostKind::Wsl)],
            docker: vec![Host::new("api", HostKind::Docker)],
        };
        assert_eq!(sync_hosts(&mut store, &discovered).unwrap(), ["orion", "Debian"]);
        assert!(sync_hosts(&mut store, &discovered).unwrap().is_empty());

        store.reload();
        assert_eq!(store.settings.hosts.len(), 2);
        assert!(!store.settings.hosts.contains_key("api"));
    }
}
