//! Library root for dasshboard
pub mod error;
pub mod models;

pub mod cli;
pub mod color;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod discovery;
pub mod filter;
pub mod icons;
pub mod logging;
pub mod remote;
pub mod settings;
pub mod tui;

// Convenience re-exports
pub use config::{io as cfg_io, path as cfg_path};
pub use error::{DashboardError, Result};
