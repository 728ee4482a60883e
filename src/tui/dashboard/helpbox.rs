use ratatui::prelude::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::models::HostKind;
use crate::tui::functions::Row;
use crate::tui::theme::Theme;

/// Generate help box content based on the selected row type
pub fn get_help_box_content(row: Option<&Row>, kind: Option<HostKind>, status: Option<&str>, theme: &Theme) -> Paragraph<'static> {
    let shortcuts = match (row, kind) {
        (Some(Row::Section(_)), _) => "↑/↓ move • Enter/c collapse • s section color • l layout • r refresh • / filter • q quit",
        (Some(_), Some(HostKind::Docker)) => {
            "↑/↓ move • Enter open • o new window • c collapse • l layout • r refresh • / filter • q quit"
        }
        (Some(Row::Card(..)), _) => {
            "↑/↓ move • ←/→ folder • Enter open • o new window • i icon/color • a add folder • x remove folder • l layout • q quit"
        }
        (Some(_), _) => "↑/↓ move • Enter open • o new window • i icon/color • a add folder • x remove folder • l layout • q quit",
        (None, _) => "r refresh • e edit settings • E edit ssh config • q quit",
    };
    let text = format!(
        "{shortcuts}\n{}",
        status.unwrap_or("e settings.json • E ssh config • '/' filter, Enter to keep it, Esc to clear")
    );

    Paragraph::new(text).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg).fg(theme.muted)),
    )
}
