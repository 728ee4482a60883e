//! Error types shared by the discovery, settings and dashboard layers.
//!
//! Discovery never lets these escape to the dashboard: each source catches
//! its own error, logs it and degrades to an empty list.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    /// File and terminal I/O
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings (de)serialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An external tool (`wsl`, `docker`, the editor) failed or timed out
    #[error("command `{program}` failed: {reason}")]
    Command { program: String, reason: String },

    /// Output of an external tool or a config file could not be understood
    #[error("parse error: {0}")]
    Parse(String),

    #[error("unknown host '{0}'")]
    UnknownHost(String),

    #[error("unknown section '{0}' (expected ssh, wsl or docker)")]
    UnknownSection(String),

    /// The host kind does not allow this change (Docker icons and colors are fixed)
    #[error("{0}")]
    Unsupported(String),

    #[error("terminal error: {0}")]
    Terminal(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

impl DashboardError {
    pub fn command(program: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Command {
            program: program.into(),
            reason: reason.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
