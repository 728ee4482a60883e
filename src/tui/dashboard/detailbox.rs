use ratatui::prelude::{Line, Rect, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::dashboard::Dashboard;
use crate::models::{DiscoveredHosts, HostKind};
use crate::tui::functions::{row_card, Row};
use crate::tui::theme::Theme;

pub fn show_detail_box(
    row: Option<&Row>,
    dashboard: &Dashboard,
    discovered: &DiscoveredHosts,
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    theme: &Theme,
) {
    let block = Block::default()
        .title("Details")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.bg).fg(theme.fg));

    let lines: Vec<Line> = match row {
        Some(Row::Section(kind)) => match dashboard.section(*kind) {
            Some(section) => vec![
                Line::from(format!("Section: {}", section.title)),
                Line::from(format!("Entries: {}", section.count())),
                Line::from(format!(
                    "Color: {}",
                    if section.color.is_empty() { "theme default" } else { section.color.as_str() }
                )),
                Line::from(if section.collapsed { "Collapsed" } else { "Expanded" }),
                Line::from(""),
                Line::from("Enter/c collapse • s section color"),
            ],
            None => vec![],
        },
        Some(r) => match row_card(dashboard, r) {
            Some(card) => {
                let host = discovered.section(card.kind).iter().find(|h| h.name == card.name);
                let mut lines = vec![
                    Line::from(format!("Name: {}", card.name)),
                    Line::from(format!("Type: {}", card.kind.badge())),
                ];
                match card.kind {
                    HostKind::Ssh => {
                        if let Some(h) = host {
                            lines.push(Line::from(format!("HostName: {}", h.hostname)));
                            lines.push(Line::from(format!("User: {}", h.user.as_deref().unwrap_or("-"))));
                        }
                        lines.push(Line::from(format!("IP: {}", card.ip.as_deref().unwrap_or("-"))));
                    }
                    HostKind::Wsl => lines.push(Line::from(format!("Distro: {}", card.detail))),
                    HostKind::Docker => {
                        if let Some(h) = host {
                            lines.push(Line::from(format!("Image: {}", h.image.as_deref().unwrap_or("-"))));
                            let id = h.container_id.as_deref().unwrap_or("-");
                            lines.push(Line::from(format!("ID: {}", id.get(..12).unwrap_or(id))));
                        }
                        lines.push(Line::from(format!("Status: {}", card.status.as_deref().unwrap_or("-"))));
                    }
                }
                if card.customizable() {
                    lines.push(Line::from(format!("Icon: {}", card.icon)));
                    lines.push(Line::from(format!(
                        "Color: {}",
                        if card.color.is_empty() { "theme default" } else { card.color.as_str() }
                    )));
                }
                lines.push(Line::from(""));
                lines.push(Line::from("Folders:"));
                for folder in &card.folders {
                    lines.push(Line::from(format!("  {folder}")));
                }
                lines
            }
            None => vec![],
        },
        None => vec![Line::from("No hosts found. Press r to discover again.")],
    };

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
}
