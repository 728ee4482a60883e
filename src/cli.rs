use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::{HostKind, Layout};

#[derive(Parser, Debug)]
#[command(name = "dasshboard")]
#[command(about = "Dashboard of your SSH hosts, WSL distros and Docker containers")]
#[command(version)]
pub struct Cli {
    /// Settings file to use instead of the default one
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip DNS lookups of SSH hostnames
    #[arg(long, global = true)]
    pub no_resolve: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive dashboard (default)
    Tui,

    /// Print the discovered hosts
    List {
        /// Filter such as "type:ssh host:10.* web"
        #[arg(short, long)]
        filter: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Open a remote folder in the editor; prompts for whatever is omitted
    Open {
        host: Option<String>,
        folder: Option<String>,

        #[arg(short, long)]
        new_window: bool,
    },

    /// Discover hosts and add the new ones to the settings
    Sync,

    /// Set the icon of a host (Lucide name, with or without "lucide:")
    Icon { host: String, icon: String },

    /// Set the color of a host ("" resets to the theme color)
    Color { host: String, color: String },

    /// Manage the folders listed on a host card
    Folder {
        #[command(subcommand)]
        action: FolderAction,
    },

    /// Section color and collapse state
    Section {
        #[command(subcommand)]
        action: SectionAction,
    },

    /// Switch between grid and list layout
    Layout { layout: Layout },

    /// Write the dashboard as a standalone HTML page
    Export {
        #[arg(long, value_name = "FILE")]
        html: PathBuf,
    },

    /// Show environment diagnostics
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum FolderAction {
    Add { host: String, path: String },
    Del { host: String, path: String },
}

#[derive(Subcommand, Debug)]
pub enum SectionAction {
    Color { section: HostKind, color: String },
    Collapse { section: HostKind },
    Expand { section: HostKind },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["dasshboard"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn section_and_layout_values_parse() {
        let cli = Cli::try_parse_from(["dasshboard", "section", "collapse", "docker"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Section { action: SectionAction::Collapse { section: HostKind::Docker } })));

        let cli = Cli::try_parse_from(["dasshboard", "--config", "/tmp/s.json", "layout", "list"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.json")));
        assert!(matches!(cli.command, Some(Commands::Layout { layout: Layout::List })));

        assert!(Cli::try_parse_from(["dasshboard", "section", "collapse", "ftp"]).is_err());
    }

    #[test]
    fn open_takes_optional_positionals() {
        let cli = Cli::try_parse_from(["dasshboard", "open", "orion", "/srv", "-n"]).unwrap();
        match cli.command {
            Some(Commands::Open { host, folder, new_window }) => {
                assert_eq!(host.as_deref(), Some("orion"));
                assert_eq!(folder.as_deref(), Some("/srv"));
                assert!(new_window);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
