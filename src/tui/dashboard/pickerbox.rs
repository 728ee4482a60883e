use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Line, Modifier, Span, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::folder_form_state::FolderFormState;
use super::picker_state::{PaletteState, PickerFocus, PickerState, ICON_COLUMNS};
use crate::color::{to_terminal_color, PALETTE, PALETTE_COLUMNS};
use crate::icons::CATALOG;
use crate::tui::functions::centered_rect;
use crate::tui::theme::Theme;

fn popup<'a>(title: String, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(Span::styled(title, Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.bg).fg(theme.fg))
}

/// Palette rows; entry 0 (theme default) is drawn as "∅".
fn palette_lines<'a>(selected: usize, active: bool, theme: &Theme) -> Vec<Line<'a>> {
    PALETTE
        .chunks(PALETTE_COLUMNS)
        .enumerate()
        .map(|(r, chunk)| {
            let spans: Vec<Span> = chunk
                .iter()
                .enumerate()
                .map(|(c, color)| {
                    let index = r * PALETTE_COLUMNS + c;
                    let swatch = if color.is_empty() { " ∅ " } else { " ■ " };
                    let mut style = Style::default().fg(to_terminal_color(color).unwrap_or(theme.fg));
                    if index == selected {
                        style = style.add_modifier(if active { Modifier::REVERSED } else { Modifier::UNDERLINED });
                    }
                    Span::styled(swatch, style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

pub fn show_picker_box(state: &PickerState, f: &mut ratatui::Frame, size: Rect, theme: &Theme) {
    let area = centered_rect(70, 60, size);
    let block = popup(format!("Icon & color: {}", state.host), theme);
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(6), Constraint::Length(1)])
        .split(inner);

    let icons_active = state.focus == PickerFocus::Icons;
    let icon_lines: Vec<Line> = CATALOG
        .chunks(ICON_COLUMNS)
        .enumerate()
        .map(|(r, chunk)| {
            let spans: Vec<Span> = chunk
                .iter()
                .enumerate()
                .map(|(c, (name, glyph))| {
                    let index = r * ICON_COLUMNS + c;
                    let mut style = Style::default();
                    if index == state.icon_index {
                        style = style.add_modifier(if icons_active { Modifier::REVERSED } else { Modifier::UNDERLINED });
                    }
                    Span::styled(format!(" {glyph} {:<10}", truncate(name, 10)), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    f.render_widget(Paragraph::new(icon_lines).block(Block::default().title("Icons")), chunks[0]);

    f.render_widget(
        Paragraph::new(palette_lines(state.color_index, !icons_active, theme)).block(Block::default().title("Color")),
        chunks[1],
    );
    f.render_widget(
        Paragraph::new(format!("{}  {}   Tab switch • arrows move • Enter save • Esc cancel", state.icon(), display_color(state.color())))
            .style(Style::default().fg(theme.muted)),
        chunks[2],
    );
}

pub fn show_palette_box(state: &PaletteState, f: &mut ratatui::Frame, size: Rect, theme: &Theme) {
    let area = centered_rect(50, 40, size);
    let block = popup(format!("{} color", state.kind.section_title()), theme);
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let mut lines = palette_lines(state.index, true, theme);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("{}   arrows move • Enter save • Esc cancel", display_color(state.color())),
        Style::default().fg(theme.muted),
    )));
    f.render_widget(Paragraph::new(lines), inner);
}

pub fn show_folder_form(state: &FolderFormState, f: &mut ratatui::Frame, size: Rect, theme: &Theme) {
    let area = centered_rect(60, 25, size);
    let block = popup(format!("Add folder: {}", state.host), theme);
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Path: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}|", state.path)),
        ]),
        Line::from(""),
    ];
    match &state.error {
        Some(err) => lines.push(Line::from(Span::styled(err.clone(), Style::default().fg(theme.accent)))),
        None => lines.push(Line::from(Span::styled("Enter save • Esc cancel", Style::default().fg(theme.muted)))),
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn display_color(color: &str) -> &str {
    if color.is_empty() { "theme default" } else { color }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('…');
        out
    }
}
