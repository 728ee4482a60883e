use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Line, Modifier, Span, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::functions::centered_rect;
use crate::tui::theme::Theme;

fn button<'a>(label: &'a str, selected: bool, theme: &Theme) -> Span<'a> {
    if selected {
        Span::styled(label, Style::default().bg(theme.accent).fg(theme.bg).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(label, Style::default().fg(theme.accent))
    }
}

pub fn show_remove_folder_box(host: &str, folder: &str, button_index: usize, f: &mut ratatui::Frame, size: Rect, theme: &Theme) {
    let area = centered_rect(60, 30, size);
    let block = Block::default()
        .title(Span::styled("Remove folder", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.bg).fg(theme.fg));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(format!("Remove \"{folder}\" from {host}?")),
        Line::from(""),
        Line::from("Only the dashboard entry is removed."),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);

    let buttons_area = Rect {
        x: inner.x,
        y: inner.y + inner.height.saturating_sub(2),
        width: inner.width,
        height: 1.min(inner.height),
    };
    let buttons = Paragraph::new(Line::from(vec![
        button("[ Remove ]", button_index == 0, theme),
        Span::raw("   "),
        button("[ Cancel ]", button_index == 1, theme),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(buttons, buttons_area);
}
