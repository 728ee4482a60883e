use std::io::{stdout, Stdout};

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::error::{DashboardError, Result};

pub type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn setup() -> Result<Term> {
    enable_raw_mode().map_err(|e| DashboardError::Terminal(e.to_string()))?;
    execute!(stdout(), EnterAlternateScreen).map_err(|e| DashboardError::Terminal(e.to_string()))?;
    Terminal::new(CrosstermBackend::new(stdout())).map_err(|e| DashboardError::Terminal(e.to_string()))
}

/// Best effort: also called on the error path.
pub fn restore() {
    let _ = disable_raw_mode();
    let _ = execute!(stdout(), LeaveAlternateScreen);
    let _ = execute!(stdout(), Show);
}

/// Hand the terminal to a child program (an editor) and take it back.
pub fn suspended<T>(terminal: &mut Term, f: impl FnOnce() -> T) -> T {
    restore();
    let out = f();
    let _ = enable_raw_mode();
    let _ = execute!(stdout(), EnterAlternateScreen);
    let _ = terminal.clear();
    out
}
