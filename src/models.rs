use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Type de cible distante (une section du dashboard par type).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    Ssh,
    Wsl,
    Docker,
}

impl HostKind {
    pub const ALL: [HostKind; 3] = [HostKind::Ssh, HostKind::Wsl, HostKind::Docker];

    pub fn as_str(self) -> &'static str {
        match self {
            HostKind::Ssh => "ssh",
            HostKind::Wsl => "wsl",
            HostKind::Docker => "docker",
        }
    }

    /// Badge shown on cards
    pub fn badge(self) -> &'static str {
        match self {
            HostKind::Ssh => "SSH",
            HostKind::Wsl => "WSL",
            HostKind::Docker => "DOCKER",
        }
    }

    pub fn section_title(self) -> &'static str {
        match self {
            HostKind::Ssh => "SSH Hosts",
            HostKind::Wsl => "WSL Distros",
            HostKind::Docker => "Docker Containers",
        }
    }
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostKind {
    type Err = crate::error::DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ssh" => Ok(HostKind::Ssh),
            "wsl" => Ok(HostKind::Wsl),
            "docker" => Ok(HostKind::Docker),
            other => Err(crate::error::DashboardError::UnknownSection(other.to_string())),
        }
    }
}

/// Représente une cible découverte (alias SSH, distro WSL ou conteneur).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Host {
    /// Alias SSH, nom de distro, ou nom de conteneur (clé logique)
    pub name: String,
    /// HostName (defaults to the alias), distro name, or container name
    pub hostname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Resolved address when `hostname` is not already an IPv4 literal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    pub kind: HostKind,
    /// Full 64-char lowercase container id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// e.g. "Ubuntu", "Debian"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distro_type: Option<String>,
}

impl Host {
    pub fn new(name: impl Into<String>, kind: HostKind) -> Self {
        let name = name.into();
        Host {
            hostname: name.clone(),
            name,
            user: None,
            ip: None,
            kind,
            container_id: None,
            container_status: None,
            image: None,
            distro_type: None,
        }
    }

    /// Second line of a card: how we reach this target.
    pub fn connection_detail(&self) -> String {
        match self.kind {
            HostKind::Ssh => match &self.user {
                Some(u) => format!("{}@{}", u, self.hostname),
                None => self.hostname.clone(),
            },
            HostKind::Wsl => self.distro_type.clone().unwrap_or_else(|| "WSL Distro".to_string()),
            HostKind::Docker => self.image.clone().unwrap_or_else(|| "Docker Container".to_string()),
        }
    }
}

/// Per-host display settings, keyed by host name in [`Settings::hosts`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HostSettings {
    #[serde(default)]
    pub folders: Vec<String>,
    /// Empty = theme default
    #[serde(default)]
    pub color: String,
    /// Empty = default icon
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Grid,
    List,
}

impl Layout {
    pub fn toggled(self) -> Self {
        match self {
            Layout::Grid => Layout::List,
            Layout::List => Layout::Grid,
        }
    }
}

impl FromStr for Layout {
    type Err = crate::error::DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(Layout::Grid),
            "list" => Ok(Layout::List),
            other => Err(crate::error::DashboardError::parse(format!(
                "unknown layout '{other}' (expected grid or list)"
            ))),
        }
    }
}

/// Le store de configuration persistant (hosts + préférences globales).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub hosts: BTreeMap<String, HostSettings>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub ssh_section_color: String,
    #[serde(default)]
    pub wsl_section_color: String,
    #[serde(default)]
    pub docker_section_color: String,
    #[serde(default)]
    pub ssh_section_collapsed: bool,
    #[serde(default)]
    pub wsl_section_collapsed: bool,
    #[serde(default)]
    pub docker_section_collapsed: bool,
    /// Editor binary launched with `--folder-uri`
    #[serde(default = "default_editor_command")]
    pub editor_command: String,
    /// Override for `~/.ssh/config`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_config_path: Option<String>,
}

fn default_editor_command() -> String {
    "code".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            hosts: BTreeMap::new(),
            layout: Layout::Grid,
            ssh_section_color: String::new(),
            wsl_section_color: String::new(),
            docker_section_color: String::new(),
            ssh_section_collapsed: false,
            wsl_section_collapsed: false,
            docker_section_collapsed: false,
            editor_command: default_editor_command(),
            ssh_config_path: None,
        }
    }
}

impl Settings {
    pub fn section_color(&self, kind: HostKind) -> &str {
        match kind {
            HostKind::Ssh => &self.ssh_section_color,
            HostKind::Wsl => &self.wsl_section_color,
            HostKind::Docker => &self.docker_section_color,
        }
    }

    pub fn set_section_color(&mut self, kind: HostKind, color: impl Into<String>) {
        let color = color.into();
        match kind {
            HostKind::Ssh => self.ssh_section_color = color,
            HostKind::Wsl => self.wsl_section_color = color,
            HostKind::Docker => self.docker_section_color = color,
        }
    }

    pub fn section_collapsed(&self, kind: HostKind) -> bool {
        match kind {
            HostKind::Ssh => self.ssh_section_collapsed,
            HostKind::Wsl => self.wsl_section_collapsed,
            HostKind::Docker => self.docker_section_collapsed,
        }
    }

    pub fn set_section_collapsed(&mut self, kind: HostKind, collapsed: bool) {
        match kind {
            HostKind::Ssh => self.ssh_section_collapsed = collapsed,
            HostKind::Wsl => self.wsl_section_collapsed = collapsed,
            HostKind::Docker => self.docker_section_collapsed = collapsed,
        }
    }
}

/// Résultat d'une passe de découverte, une liste par section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredHosts {
    pub ssh: Vec<Host>,
    pub wsl: Vec<Host>,
    pub docker: Vec<Host>,
}

impl DiscoveredHosts {
    pub fn section(&self, kind: HostKind) -> &[Host] {
        match kind {
            HostKind::Ssh => &self.ssh,
            HostKind::Wsl => &self.wsl,
            HostKind::Docker => &self.docker,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Host> {
        self.ssh.iter().chain(self.wsl.iter()).chain(self.docker.iter())
    }

    pub fn find(&self, name: &str) -> Option<&Host> {
        self.iter().find(|h| h.name == name)
    }

    pub fn len(&self) -> usize {
        self.ssh.len() + self.wsl.len() + self.docker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_use_editor_setting_names() {
        let mut s = Settings::default();
        s.set_section_color(HostKind::Wsl, "#ffadad");
        s.set_section_collapsed(HostKind::Docker, true);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["wslSectionColor"], "#ffadad");
        assert_eq!(json["dockerSectionCollapsed"], true);
        assert_eq!(json["layout"], "grid");
        assert_eq!(json["editorCommand"], "code");
    }

    #[test]
    fn partial_host_settings_fill_defaults() {
        let s: Settings = serde_json::from_str(r#"{"hosts":{"web":{"icon":"lucide:cloud"}}}"#).unwrap();
        let web = &s.hosts["web"];
        assert!(web.folders.is_empty());
        assert_eq!(web.color, "");
        assert_eq!(web.icon, "lucide:cloud");
        assert_eq!(s.editor_command, "code");
    }

    #[test]
    fn connection_detail_per_kind() {
        let mut ssh = Host::new("orion", HostKind::Ssh);
        ssh.hostname = "34.171.91.187".into();
        assert_eq!(ssh.connection_detail(), "34.171.91.187");
        ssh.user = Some("dev".into());
        assert_eq!(ssh.connection_detail(), "dev@34.171.91.187");

        let wsl = Host::new("Ubuntu-22.04", HostKind::Wsl);
        assert_eq!(wsl.connection_detail(), "WSL Distro");

        let mut docker = Host::new("api", HostKind::Docker);
        docker.image = Some("node:20".into());
        assert_eq!(docker.connection_detail(), "node:20");
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("SSH".parse::<HostKind>().unwrap(), HostKind::Ssh);
        assert!("ftp".parse::<HostKind>().is_err());
        assert_eq!("list".parse::<Layout>().unwrap(), Layout::List);
    }
}
