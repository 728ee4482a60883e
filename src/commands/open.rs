use inquire::Select;

use crate::config::io::SettingsStore;
use crate::dashboard::{dispatch, Message, Outcome};
use crate::error::{DashboardError, Result};
use crate::models::{DiscoveredHosts, Host};
use crate::remote::open_folder;
use crate::settings::effective_folders;

fn pick_host<'a>(discovered: &'a DiscoveredHosts, name: Option<String>) -> Result<Option<&'a Host>> {
    let name = match name {
        Some(n) => n,
        None => {
            let choices: Vec<String> = discovered.iter().map(|h| format!("{} [{}]", h.name, h.kind.badge())).collect();
            if choices.is_empty() {
                println!("No hosts discovered.");
                return Ok(None);
            }
            match Select::new("Choose a host:", choices).raw_prompt() {
                Ok(choice) => return Ok(discovered.iter().nth(choice.index)),
                Err(_) => return Ok(None),
            }
        }
    };

    if let Some(h) = discovered.find(&name) {
        return Ok(Some(h));
    }
    let matching: Vec<&Host> = discovered.iter().filter(|h| h.name.contains(&name)).collect();
    match matching.len() {
        0 => Err(DashboardError::UnknownHost(name)),
        1 => Ok(Some(matching[0])),
        _ => {
            let options: Vec<String> = matching.iter().map(|h| h.name.clone()).collect();
            match Select::new("Multiple matches. Choose:", options).raw_prompt() {
                Ok(choice) => Ok(Some(matching[choice.index])),
                Err(_) => Ok(None),
            }
        }
    }
}

/// `dasshboard open [host] [folder]`: prompts for what is missing.
pub fn open_host(
    store: &mut SettingsStore,
    discovered: &DiscoveredHosts,
    name: Option<String>,
    folder: Option<String>,
    new_window: bool,
) -> Result<()> {
    let Some(host) = pick_host(discovered, name)? else { return Ok(()); };

    let folder = match folder {
        Some(f) => f,
        None => {
            let folders = effective_folders(host, &store.settings);
            if folders.len() == 1 {
                folders[0].clone()
            } else {
                match Select::new("Choose a folder:", folders).prompt() {
                    Ok(f) => f,
                    Err(_) => return Ok(()),
                }
            }
        }
    };

    let message = Message::OpenFolder { host: host.name.clone(), folder, new_window, host_type: host.kind };
    if let Outcome::Open(req) = dispatch(message, store, discovered)? {
        open_folder(&store.settings.editor_command, req.kind, &req.host, &req.folder, req.new_window)?;
        println!("Opened {}:{}", req.host, req.folder);
    }
    Ok(())
}
