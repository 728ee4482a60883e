use std::fs;
use std::path::Path;

use crate::dashboard::{html, Dashboard};
use crate::error::Result;

pub fn export_html(dashboard: &Dashboard, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html::render(dashboard))?;
    tracing::info!(path = %path.display(), hosts = dashboard.total(), "dashboard exported");
    println!("Dashboard written to {}", path.display());
    Ok(())
}
