//! Shared tracing/logging setup for the partsdash binaries.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Initialize process-wide logging.
///
/// JSON lines on stdout, filterable via `RUST_LOG` (default `info`).
/// Safe to call more than once; later calls become no-ops.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_target(false)
        .try_init();
}

/// Like [`init`], but append the JSON lines to a log file instead of
/// stdout (the server's log viewer reads this file back).
pub fn init_to_file(path: &Path) -> io::Result<()> {
    let file = File::options().create(true).append(true).open(path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
