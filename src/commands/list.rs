use prettytable::{row, Table};

use crate::error::Result;
use crate::filter::filter_hosts;
use crate::models::{DiscoveredHosts, Host, Settings};
use crate::settings::effective_folders;

fn detail_row(h: &Host, settings: &Settings) -> (String, String, String) {
    let address = match (&h.ip, h.hostname == h.name) {
        (Some(ip), _) => format!("{} ({ip})", h.hostname),
        (None, true) => "-".to_string(),
        (None, false) => h.hostname.clone(),
    };
    (h.connection_detail(), address, effective_folders(h, settings).join(", "))
}

pub fn list_hosts_with_filter(discovered: &DiscoveredHosts, settings: &Settings, filter: Option<&str>, json: bool) -> Result<()> {
    let all: Vec<Host> = discovered.iter().cloned().collect();
    let rows: Vec<&Host> = filter_hosts(&all, filter.unwrap_or(""));

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("No hosts match your filter.");
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["Name", "Type", "Detail", "Address", "Folders"]);
    for h in rows {
        let (detail, address, folders) = detail_row(h, settings);
        table.add_row(row![h.name, h.kind.badge(), detail, address, folders]);
    }
    table.printstd();
    Ok(())
}
