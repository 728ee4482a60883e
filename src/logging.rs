use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::path::log_path;

/// Install the global subscriber. Logs go to a file since the dashboard owns
/// the terminal; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    match open_log_file() {
        Ok((path, file)) => {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .try_init();
            tracing::info!(path = %path.display(), "logging initialized");
        }
        // No log file: stay silent rather than write over the TUI
        Err(_) => {
            let _ = tracing_subscriber::registry().with(env_filter).try_init();
        }
    }
}

fn open_log_file() -> std::io::Result<(PathBuf, fs::File)> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}
