use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "choreboard=info";
pub const LOG_FILE: &str = "choreboard.log";

/// Installs the global subscriber.
///
/// The TUI owns stdout and stderr while it runs, so output goes to
/// `<log_dir>/choreboard.log` when a directory is configured. Without one,
/// `stderr_fallback` decides between logging to stderr and not logging at all.
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init(log_dir: Option<&Path>, stderr_fallback: bool) -> Result<Option<WorkerGuard>> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(writer)
                .with_ansi(false)
                .try_init();
            Ok(Some(guard))
        }
        None if stderr_fallback => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .try_init();
            Ok(None)
        }
        None => Ok(None),
    }
}
