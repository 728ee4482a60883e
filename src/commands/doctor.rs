use prettytable::{row, Table};

use crate::config::io::SettingsStore;
use crate::config::path::{log_path, ssh_config_path, theme_path};
use crate::discovery::process::is_available;
use crate::models::DiscoveredHosts;
use crate::remote::detect_remote_context;

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

/// Environment report: where we run, which tools answer, what was found.
pub fn doctor(store: &SettingsStore, discovered: &DiscoveredHosts) {
    let context = detect_remote_context();
    let ssh_config = ssh_config_path(store.settings.ssh_config_path.as_deref());
    let editor = &store.settings.editor_command;

    let mut table = Table::new();
    table.add_row(row!["Check", "Value"]);
    table.add_row(row!["Platform", format!("{} ({})", std::env::consts::OS, std::env::consts::ARCH)]);
    table.add_row(row!["Running inside", context.label()]);
    table.add_row(row!["Settings file", store.path().display()]);
    table.add_row(row!["Theme file", theme_path().display()]);
    table.add_row(row!["Log file", log_path().display()]);
    match &ssh_config {
        Some(p) => table.add_row(row!["SSH config", format!("{} (exists: {})", p.display(), yes_no(p.exists()))]),
        None => table.add_row(row!["SSH config", "no home directory"]),
    };
    table.add_row(row!["Editor", format!("{editor} (available: {})", yes_no(is_available(editor)))]);
    table.add_row(row!["docker CLI", yes_no(is_available("docker"))]);
    if cfg!(windows) {
        table.add_row(row!["wsl.exe", yes_no(is_available("wsl"))]);
    } else {
        table.add_row(row!["wsl.exe", "not on Windows, WSL discovery disabled"]);
    }
    table.add_row(row!["SSH hosts", discovered.ssh.len()]);
    table.add_row(row!["WSL distros", discovered.wsl.len()]);
    table.add_row(row!["Docker containers", discovered.docker.len()]);
    table.add_row(row!["Stored host entries", store.settings.hosts.len()]);
    table.printstd();
}
