pub mod app;
pub mod dashboard;
pub mod functions;
pub mod terminal;
pub mod theme;

pub use app::run_tui;
