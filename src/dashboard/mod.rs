//! Dashboard view model: sections of host cards built from a discovery pass
//! and the settings store. Both the TUI and the HTML export render this.
pub mod html;
pub mod message;

pub use message::{dispatch, HostSettingsReply, Message, OpenRequest, Outcome};

use serde::Serialize;

use crate::icons;
use crate::models::{DiscoveredHosts, Host, HostKind, Layout, Settings};
use crate::remote::RemoteContext;
use crate::settings::effective_folders;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub name: String,
    pub kind: HostKind,
    /// `user@hostname`, distro type, or image
    pub detail: String,
    pub icon: String,
    /// Empty = theme default. Always empty for Docker.
    pub color: String,
    pub folders: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Card {
    pub fn from_host(host: &Host, settings: &Settings) -> Self {
        let stored = settings.hosts.get(&host.name);
        let color = match host.kind {
            HostKind::Docker => String::new(),
            _ => stored.map(|s| s.color.clone()).unwrap_or_default(),
        };
        Card {
            name: host.name.clone(),
            kind: host.kind,
            detail: host.connection_detail(),
            icon: icons::effective_icon(host.kind, stored.map(|s| s.icon.as_str()).unwrap_or("")),
            color,
            folders: effective_folders(host, settings),
            ip: host.ip.clone(),
            status: host.container_status.clone(),
        }
    }

    pub fn customizable(&self) -> bool {
        self.kind != HostKind::Docker
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: HostKind,
    pub title: String,
    pub color: String,
    pub collapsed: bool,
    pub cards: Vec<Card>,
}

impl Section {
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub sections: Vec<Section>,
    pub layout: Layout,
    pub context: RemoteContext,
}

impl Dashboard {
    pub fn build(discovered: &DiscoveredHosts, settings: &Settings, context: RemoteContext) -> Self {
        let sections = HostKind::ALL
            .iter()
            .map(|&kind| Section {
                kind,
                title: kind.section_title().to_string(),
                color: settings.section_color(kind).to_string(),
                collapsed: settings.section_collapsed(kind),
                cards: discovered
                    .section(kind)
                    .iter()
                    .map(|h| Card::from_host(h, settings))
                    .collect(),
            })
            .collect();
        Dashboard { sections, layout: settings.layout, context }
    }

    pub fn section(&self, kind: HostKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn card(&self, name: &str) -> Option<&Card> {
        self.sections.iter().flat_map(|s| s.cards.iter()).find(|c| c.name == name)
    }

    pub fn total(&self) -> usize {
        self.sections.iter().map(Section::count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HostSettings;

    fn discovered() -> DiscoveredHosts {
        let mut orion = Host::new("orion", HostKind::Ssh);
        orion.user = Some("dev".into());
        orion.hostname = "34.171.91.187".into();
        let mut api = Host::new("api", HostKind::Docker);
        api.image = Some("node:20".into());
        DiscoveredHosts { ssh: vec![orion], wsl: vec![], docker: vec![api] }
    }

    #[test]
    fn builds_three_sections_even_when_empty() {
        let d = Dashboard::build(&DiscoveredHosts::default(), &Settings::default(), RemoteContext::Local);
        assert_eq!(d.sections.len(), 3);
        assert_eq!(d.total(), 0);
        assert_eq!(d.sections[1].title, "WSL Distros");
    }

    #[test]
    fn cards_carry_settings_but_docker_stays_fixed() {
        let mut settings = Settings::default();
        settings.docker_section_color = "#0095ac".into();
        settings.hosts.insert(
            "orion".into(),
            HostSettings { folders: vec!["/srv".into()], color: "#f94144".into(), icon: "lucide:cloud".into() },
        );
        settings.hosts.insert(
            "api".into(),
            HostSettings { folders: vec!["/app".into()], color: "#ffffff".into(), icon: "lucide:zap".into() },
        );

        let d = Dashboard::build(&discovered(), &settings, RemoteContext::Local);
        let orion = d.card("orion").unwrap();
        assert_eq!(orion.detail, "dev@34.171.91.187");
        assert_eq!(orion.color, "#f94144");
        assert_eq!(orion.icon, "lucide:cloud");
        assert_eq!(orion.folders, ["/srv"]);

        let api = d.card("api").unwrap();
        assert_eq!(api.color, "");
        assert_eq!(api.icon, icons::DOCKER_ICON);
        assert_eq!(api.folders, ["/"]);
        assert!(!api.customizable());
        assert_eq!(d.section(HostKind::Docker).unwrap().color, "#0095ac");
    }
}
