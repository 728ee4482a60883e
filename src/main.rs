use anyhow::Context;
use clap::Parser;

use dasshboard::cli::{Cli, Commands, FolderAction, SectionAction};
use dasshboard::commands::{doctor, export, list, open, prefs, sync};
use dasshboard::config::io::SettingsStore;
use dasshboard::dashboard::Dashboard;
use dasshboard::discovery::{discover_all, DiscoveryOptions};
use dasshboard::logging::init_tracing;
use dasshboard::models::DiscoveredHosts;
use dasshboard::remote::detect_remote_context;
use dasshboard::settings::reconcile;
use dasshboard::tui;

/// Discovery + reconciliation done before every command that shows hosts.
fn discover(store: &mut SettingsStore, opts: DiscoveryOptions) -> DiscoveredHosts {
    let discovered = discover_all(&store.settings, opts);
    if !reconcile(&mut store.settings, &discovered).is_empty() {
        if let Err(e) = store.save() {
            tracing::warn!(error = %e, "failed to save reconciled settings");
        }
    }
    discovered
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut store = match &cli.config {
        Some(path) => SettingsStore::open(path),
        None => SettingsStore::open_default(),
    };
    let opts = DiscoveryOptions { resolve_ips: !cli.no_resolve, ..DiscoveryOptions::default() };
    // Settings-only commands skip discovery
    let lookup = DiscoveryOptions { resolve_ips: false, wsl: false, ..DiscoveryOptions::default() };

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let discovered = discover(&mut store, opts);
            tui::run_tui(store, discovered, opts).context("dashboard failed")?;
        }
        Commands::List { filter, json } => {
            let discovered = discover(&mut store, opts);
            list::list_hosts_with_filter(&discovered, &store.settings, filter.as_deref(), json)?;
        }
        Commands::Open { host, folder, new_window } => {
            let discovered = discover(&mut store, DiscoveryOptions { resolve_ips: false, ..opts });
            open::open_host(&mut store, &discovered, host, folder, new_window).context("cannot open folder")?;
        }
        Commands::Sync => {
            let discovered = discover_all(&store.settings, opts);
            let added = sync::sync_hosts(&mut store, &discovered).context("cannot save settings")?;
            sync::print_sync(&added, &discovered);
        }
        Commands::Icon { host, icon } => {
            let discovered = discover_all(&store.settings, lookup);
            prefs::set_icon(&mut store, &discovered, host, icon)?;
        }
        Commands::Color { host, color } => {
            let discovered = discover_all(&store.settings, lookup);
            prefs::set_color(&mut store, &discovered, host, color)?;
        }
        Commands::Folder { action } => {
            let discovered = discover_all(&store.settings, lookup);
            match action {
                FolderAction::Add { host, path } => prefs::folder_add(&mut store, &discovered, host, path)?,
                FolderAction::Del { host, path } => prefs::folder_del(&mut store, &discovered, host, path)?,
            }
        }
        Commands::Section { action } => match action {
            SectionAction::Color { section, color } => prefs::section_color(&mut store, section, color)?,
            SectionAction::Collapse { section } => prefs::section_collapsed(&mut store, section, true)?,
            SectionAction::Expand { section } => prefs::section_collapsed(&mut store, section, false)?,
        },
        Commands::Layout { layout } => prefs::set_layout(&mut store, layout)?,
        Commands::Export { html } => {
            let discovered = discover(&mut store, opts);
            let dashboard = Dashboard::build(&discovered, &store.settings, detect_remote_context());
            export::export_html(&dashboard, &html).with_context(|| format!("cannot write {}", html.display()))?;
        }
        Commands::Doctor => {
            let discovered = discover_all(&store.settings, opts);
            doctor::doctor(&store, &discovered);
        }
    }
    Ok(())
}
