use ratatui::prelude::{Color, Line, Modifier, Span, Style};
use ratatui::widgets::ListItem;

use crate::color::to_terminal_color;
use crate::dashboard::Dashboard;
use crate::icons;
use crate::models::Layout;
use crate::tui::functions::Row;
use crate::tui::theme::Theme;

fn tint(color: &str, fallback: Color) -> Color {
    to_terminal_color(color).unwrap_or(fallback)
}

/// `selected` / `folder_cursor` mark the folder chip Enter would open in the
/// grid layout.
pub fn get_item_list<'a>(
    dashboard: &Dashboard,
    rows: &[Row],
    selected: Option<usize>,
    folder_cursor: usize,
    theme: &Theme,
) -> Vec<ListItem<'a>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| match *row {
            Row::Section(kind) => {
                let Some(section) = dashboard.section(kind) else { return ListItem::new(""); };
                let arrow = if section.collapsed { "▸" } else { "▾" };
                let color = tint(&section.color, theme.accent);
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{arrow} {}", section.title),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!(" ({})", section.count()), Style::default().fg(theme.muted)),
                ]))
            }
            Row::Card(s, c) => {
                let card = &dashboard.sections[s].cards[c];
                let color = tint(&card.color, theme.fg);
                let mut spans = vec![
                    Span::raw("  "),
                    Span::styled(format!("{} ", icons::glyph(&card.icon)), Style::default().fg(color)),
                    Span::styled(card.name.clone(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  [{}]", card.kind.badge()), Style::default().fg(theme.muted)),
                    Span::raw(format!("  {}", card.detail)),
                ];
                if dashboard.layout == Layout::Grid {
                    let cursor = (selected == Some(i)).then(|| folder_cursor.min(card.folders.len().saturating_sub(1)));
                    for (fi, folder) in card.folders.iter().enumerate() {
                        let style = if cursor == Some(fi) {
                            Style::default().fg(theme.bg).bg(theme.accent)
                        } else {
                            Style::default().fg(theme.muted)
                        };
                        spans.push(Span::raw("  "));
                        spans.push(Span::styled(format!(" {folder} "), style));
                    }
                }
                ListItem::new(Line::from(spans))
            }
            Row::Folder(s, c, f) => {
                let folder = &dashboard.sections[s].cards[c].folders[f];
                ListItem::new(Line::from(vec![
                    Span::styled("      ↳ ", Style::default().fg(theme.muted)),
                    Span::raw(folder.clone()),
                ]))
            }
        })
        .collect()
}
