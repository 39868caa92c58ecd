//! Logging initialization

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Initialize tracing at the given level, `RUST_LOG` still wins when set
pub fn init_tracing_with_level(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .init();
}

/// Initialize tracing into an append-only log file
///
/// Used by the terminal UI, which owns stdout while the alternate screen is
/// active.
pub fn init_file_tracing(level: &str, path: impl AsRef<Path>) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}
