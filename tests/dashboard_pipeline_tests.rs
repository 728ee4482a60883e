//! Tests for the discovery -> reconciliation -> dashboard pipeline
//!
//! These tests verify:
//! - SSH config and docker ps output end up in the right sections
//! - Reconciliation adds defaults once and never touches existing entries
//! - The dashboard view model and HTML export agree with the settings

use std::fs;

use dasshboard::config::io::SettingsStore;
use dasshboard::dashboard::{html, Dashboard};
use dasshboard::discovery::docker::parse_docker_ps;
use dasshboard::discovery::ssh_config::discover_ssh_hosts;
use dasshboard::discovery::wsl::{decode_wsl_output, parse_wsl_list};
use dasshboard::models::{DiscoveredHosts, Host, HostKind, HostSettings};
use dasshboard::remote::RemoteContext;
use dasshboard::settings::{effective_folders, reconcile};

const SSH_CONFIG: &str = "\
Host web-prod
    HostName 10.0.0.12
    User deploy

Host admin-box
    HostName 10.0.0.13
    User root

Host *.internal
    User nobody

Host scratch
";

const DOCKER_PS: &str = "\
9F8E7D6C5B4A|api|ghcr.io/acme/api:1.4|Up 3 hours
0a1b2c3d4e5f|db|postgres:16|Up 3 hours (healthy)
broken line
";

fn discovered(dir: &std::path::Path) -> DiscoveredHosts {
    let config = dir.join("config");
    fs::write(&config, SSH_CONFIG).unwrap();
    DiscoveredHosts {
        ssh: discover_ssh_hosts(&config, false),
        wsl: vec![Host::new("Ubuntu-22.04", HostKind::Wsl)],
        docker: parse_docker_ps(DOCKER_PS),
    }
}

// =============================================================================
// Discovery
// =============================================================================

#[test]
fn test_ssh_hosts_keep_config_order_and_skip_patterns() {
    let dir = tempfile::tempdir().unwrap();
    let found = discovered(dir.path());
    let names: Vec<&str> = found.ssh.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, ["web-prod", "admin-box", "scratch"]);
    assert_eq!(found.ssh[0].hostname, "10.0.0.12");
    assert_eq!(found.ssh[2].hostname, "scratch");
}

#[test]
fn test_docker_rows_need_four_fields() {
    let containers = parse_docker_ps(DOCKER_PS);
    assert_eq!(containers.len(), 2);
    assert_eq!(containers[0].container_id.as_deref(), Some("9f8e7d6c5b4a"));
    assert_eq!(containers[1].container_status.as_deref(), Some("Up 3 hours (healthy)"));
}

#[test]
fn test_missing_ssh_config_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(discover_ssh_hosts(&dir.path().join("nope"), false).is_empty());
}

#[test]
fn test_wsl_listing_from_utf16() {
    let listing = "  NAME                   STATE           VERSION\r\n\
                   * Ubuntu-22.04           Running         2\r\n\
                     docker-desktop         Stopped         2\r\n\
                     Debian                 Stopped         2\r\n";
    let mut bytes = vec![0xFF, 0xFE];
    for unit in listing.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let distros = parse_wsl_list(&decode_wsl_output(&bytes));
    let names: Vec<&str> = distros.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Ubuntu-22.04", "Debian"]);
    assert!(distros[0].is_default);
}

// =============================================================================
// Reconciliation
// =============================================================================

#[test]
fn test_reconcile_adds_ssh_and_wsl_defaults_once() {
    let dir = tempfile::tempdir().unwrap();
    let found = discovered(dir.path());
    let mut store = SettingsStore::open(dir.path().join("settings.json"));

    let added = reconcile(&mut store.settings, &found);
    assert_eq!(added, ["web-prod", "admin-box", "scratch", "Ubuntu-22.04"]);
    assert_eq!(store.settings.hosts["web-prod"].folders, ["/home/deploy"]);
    assert_eq!(store.settings.hosts["admin-box"].folders, ["/home/root"]);
    assert_eq!(store.settings.hosts["scratch"].folders, ["/home"]);
    assert_eq!(store.settings.hosts["Ubuntu-22.04"].folders, ["/home"]);
    assert!(!store.settings.hosts.contains_key("api"));

    assert!(reconcile(&mut store.settings, &found).is_empty());
}

#[test]
fn test_reconcile_keeps_existing_entries() {
    let dir = tempfile::tempdir().unwrap();
    let found = discovered(dir.path());
    let mut store = SettingsStore::open(dir.path().join("settings.json"));
    let custom = HostSettings { folders: vec!["/srv/www".into()], color: "#f94144".into(), icon: "lucide:globe".into() };
    store.settings.hosts.insert("web-prod".into(), custom.clone());

    reconcile(&mut store.settings, &found);
    assert_eq!(store.settings.hosts["web-prod"], custom);
}

#[test]
fn test_effective_folders_by_kind() {
    let dir = tempfile::tempdir().unwrap();
    let found = discovered(dir.path());
    let settings = SettingsStore::open(dir.path().join("settings.json")).settings;
    assert_eq!(effective_folders(&found.ssh[1], &settings), ["/root"]);
    assert_eq!(effective_folders(&found.docker[0], &settings), ["/"]);
}

// =============================================================================
// Dashboard and export
// =============================================================================

#[test]
fn test_dashboard_sections_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let found = discovered(dir.path());
    let mut store = SettingsStore::open(dir.path().join("settings.json"));
    reconcile(&mut store.settings, &found);
    store.settings.hosts.get_mut("web-prod").unwrap().color = "#43aa8b".into();

    let dashboard = Dashboard::build(&found, &store.settings, RemoteContext::Local);
    assert_eq!(dashboard.total(), 6);
    let web = dashboard.card("web-prod").unwrap();
    assert_eq!(web.detail, "deploy@10.0.0.12");
    assert_eq!(web.icon, "lucide:server");
    assert_eq!(dashboard.card("api").unwrap().icon, "docker");

    let page = html::render(&dashboard);
    assert!(page.contains("vscode-remote://ssh-remote+web-prod/home/deploy"));
    assert!(page.contains("vscode-remote://wsl+Ubuntu-22.04/home"));
    assert!(page.contains("Docker Containers"));
    assert!(page.contains("--host-color: #43aa8b"));
}
