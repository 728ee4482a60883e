use ratatui::layout::{Constraint, Direction, Layout as Split, Rect};

use crate::dashboard::{Card, Dashboard};
use crate::models::{Host, HostKind, Layout};

/// One line of the dashboard list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Section(HostKind),
    /// (section index, card index)
    Card(usize, usize),
    /// (section index, card index, folder index); list layout only
    Folder(usize, usize, usize),
}

/// Flatten the dashboard into selectable rows. Collapsed sections keep their
/// header only; a non-empty filter hides non-matching cards (and sections
/// left without cards).
pub fn build_rows(dashboard: &Dashboard, hosts: &[&Host], filter: &str, matches: impl Fn(&str, &Host) -> bool) -> Vec<Row> {
    let mut rows = Vec::new();
    let filtering = !filter.trim().is_empty();

    for (si, section) in dashboard.sections.iter().enumerate() {
        let visible: Vec<usize> = section
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| {
                !filtering
                    || hosts
                        .iter()
                        .find(|h| h.name == card.name && h.kind == card.kind)
                        .map(|h| matches(filter, h))
                        .unwrap_or(false)
            })
            .map(|(i, _)| i)
            .collect();

        if filtering && visible.is_empty() {
            continue;
        }
        // Empty WSL / Docker sections are hidden, SSH always shows
        if !filtering && section.kind != HostKind::Ssh && section.cards.is_empty() {
            continue;
        }

        rows.push(Row::Section(section.kind));
        if section.collapsed && !filtering {
            continue;
        }
        for ci in visible {
            rows.push(Row::Card(si, ci));
            if dashboard.layout == Layout::List {
                for fi in 0..section.cards[ci].folders.len() {
                    rows.push(Row::Folder(si, ci, fi));
                }
            }
        }
    }
    rows
}

pub fn row_card<'a>(dashboard: &'a Dashboard, row: &Row) -> Option<&'a Card> {
    match *row {
        Row::Section(_) => None,
        Row::Card(s, c) | Row::Folder(s, c, _) => dashboard.sections.get(s)?.cards.get(c),
    }
}

pub fn row_kind(dashboard: &Dashboard, row: &Row) -> Option<HostKind> {
    match *row {
        Row::Section(kind) => Some(kind),
        Row::Card(s, _) | Row::Folder(s, _, _) => dashboard.sections.get(s).map(|s| s.kind),
    }
}

/// Rect centré de `percent_x` x `percent_y` pourcents de `r` (popups).
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Split::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Split::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::quick_match;
    use crate::models::{DiscoveredHosts, Settings};
    use crate::remote::RemoteContext;

    fn setup(layout: Layout) -> (DiscoveredHosts, Dashboard) {
        let discovered = DiscoveredHosts {
            ssh: vec![Host::new("orion", HostKind::Ssh), Host::new("vega", HostKind::Ssh)],
            wsl: vec![],
            docker: vec![Host::new("api", HostKind::Docker)],
        };
        let settings = Settings { layout, ..Settings::default() };
        let d = Dashboard::build(&discovered, &settings, RemoteContext::Local);
        (discovered, d)
    }

    #[test]
    fn grid_layout_has_one_row_per_card() {
        let (disc, d) = setup(Layout::Grid);
        let hosts: Vec<&Host> = disc.iter().collect();
        let rows = build_rows(&d, &hosts, "", quick_match);
        assert_eq!(
            rows,
            [Row::Section(HostKind::Ssh), Row::Card(0, 0), Row::Card(0, 1), Row::Section(HostKind::Docker), Row::Card(2, 0)]
        );
    }

    #[test]
    fn list_layout_expands_folders() {
        let (disc, d) = setup(Layout::List);
        let hosts: Vec<&Host> = disc.iter().collect();
        let rows = build_rows(&d, &hosts, "", quick_match);
        assert!(rows.contains(&Row::Folder(0, 0, 0)));
        assert!(rows.contains(&Row::Folder(2, 0, 0)));
    }

    #[test]
    fn collapsed_sections_keep_their_header() {
        let (disc, mut d) = setup(Layout::Grid);
        d.sections[0].collapsed = true;
        let hosts: Vec<&Host> = disc.iter().collect();
        let rows = build_rows(&d, &hosts, "", quick_match);
        assert_eq!(rows[0], Row::Section(HostKind::Ssh));
        assert_eq!(rows[1], Row::Section(HostKind::Docker));
    }

    #[test]
    fn filter_hides_sections_without_matches() {
        let (disc, d) = setup(Layout::Grid);
        let hosts: Vec<&Host> = disc.iter().collect();
        let rows = build_rows(&d, &hosts, "vega", quick_match);
        assert_eq!(rows, [Row::Section(HostKind::Ssh), Row::Card(0, 1)]);
        assert_eq!(row_card(&d, &rows[1]).unwrap().name, "vega");
    }
}
