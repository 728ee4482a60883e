use crate::config::io::SettingsStore;
use crate::dashboard::{dispatch, Message, Outcome};
use crate::error::{DashboardError, Result};
use crate::models::{DiscoveredHosts, HostKind, Layout};
use crate::settings::host_settings;

fn report(outcome: Outcome, done: String) {
    match outcome {
        Outcome::Ignored(reason) => println!("Nothing changed: {reason}."),
        _ => println!("{done}"),
    }
}

pub fn set_icon(store: &mut SettingsStore, discovered: &DiscoveredHosts, host: String, icon: String) -> Result<()> {
    let kind = discovered.find(&host).map(|h| h.kind);
    let color = host_settings(&store.settings, &host).color;
    let done = format!("Icon of {host} set to {icon}.");
    let out = dispatch(Message::UpdateHostIcon { host, host_type: kind, icon, color }, store, discovered)?;
    report(out, done);
    Ok(())
}

pub fn set_color(store: &mut SettingsStore, discovered: &DiscoveredHosts, host: String, color: String) -> Result<()> {
    let kind = discovered.find(&host).map(|h| h.kind);
    let icon = host_settings(&store.settings, &host).icon;
    let done = if color.trim().is_empty() {
        format!("Color of {host} reset to the theme default.")
    } else {
        format!("Color of {host} set to {color}.")
    };
    let out = dispatch(Message::UpdateHostIcon { host, host_type: kind, icon, color }, store, discovered)?;
    report(out, done);
    Ok(())
}

pub fn folder_add(store: &mut SettingsStore, discovered: &DiscoveredHosts, host: String, folder: String) -> Result<()> {
    if !store.settings.hosts.contains_key(&host) && discovered.find(&host).is_none() {
        return Err(DashboardError::UnknownHost(host));
    }
    let done = format!("Folder {folder} added to {host}.");
    let out = dispatch(Message::AddFolder { host, folder }, store, discovered)?;
    report(out, done);
    Ok(())
}

pub fn folder_del(store: &mut SettingsStore, discovered: &DiscoveredHosts, host: String, folder: String) -> Result<()> {
    let done = format!("Folder {folder} removed from {host}.");
    let out = dispatch(Message::RemoveFolder { host, folder }, store, discovered)?;
    report(out, done);
    Ok(())
}

pub fn section_color(store: &mut SettingsStore, section: HostKind, color: String) -> Result<()> {
    let done = format!("{} color set to {}.", section.section_title(), if color.is_empty() { "theme default" } else { color.as_str() });
    let out = dispatch(
        Message::UpdateSectionColor { section: section.to_string(), color },
        store,
        &DiscoveredHosts::default(),
    )?;
    report(out, done);
    Ok(())
}

pub fn section_collapsed(store: &mut SettingsStore, section: HostKind, collapsed: bool) -> Result<()> {
    let done = format!("{} {}.", section.section_title(), if collapsed { "collapsed" } else { "expanded" });
    let out = dispatch(
        Message::UpdateSectionCollapsed { section: section.to_string(), collapsed },
        store,
        &DiscoveredHosts::default(),
    )?;
    report(out, done);
    Ok(())
}

pub fn set_layout(store: &mut SettingsStore, layout: Layout) -> Result<()> {
    let out = dispatch(Message::UpdateLayout { layout }, store, &DiscoveredHosts::default())?;
    report(out, format!("Layout set to {layout:?}."));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Host;

    fn setup() -> (tempfile::TempDir, SettingsStore, DiscoveredHosts) {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::open(dir.path().join("settings.json"));
        let discovered = DiscoveredHosts {
            ssh: vec![Host::new("orion", HostKind::Ssh)],
            docker: vec![Host::new("api", HostKind::Docker)],
            ..Default::default()
        };
        (dir, store, discovered)
    }

    #[test]
    fn color_keeps_the_icon_and_icon_keeps_the_color() {
        let (_dir, mut store, disc) = setup();
        set_icon(&mut store, &disc, "orion".into(), "cloud".into()).unwrap();
        set_color(&mut store, &disc, "orion".into(), "#f94144".into()).unwrap();
        let hs = &store.settings.hosts["orion"];
        assert_eq!(hs.icon, "lucide:cloud");
        assert_eq!(hs.color, "#f94144");
    }

    #[test]
    fn docker_and_unknown_hosts_are_errors() {
        let (_dir, mut store, disc) = setup();
        assert!(set_color(&mut store, &disc, "api".into(), "#ffffff".into()).is_err());
        assert!(matches!(
            folder_add(&mut store, &disc, "nowhere".into(), "/srv".into()),
            Err(DashboardError::UnknownHost(_))
        ));
    }

    #[test]
    fn section_and_layout_are_saved() {
        let (_dir, mut store, _disc) = setup();
        section_collapsed(&mut store, HostKind::Wsl, true).unwrap();
        section_color(&mut store, HostKind::Docker, "#0db7ed".into()).unwrap();
        set_layout(&mut store, Layout::List).unwrap();
        store.reload();
        assert!(store.settings.wsl_section_collapsed);
        assert_eq!(store.settings.docker_section_color, "#0db7ed");
        assert_eq!(store.settings.layout, Layout::List);
    }
}
