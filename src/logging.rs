//! File logging setup.
//!
//! The terminal belongs to the UI, so tracing output goes to a daily rolling file.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

const DEFAULT_FILTER: &str = "info,news_decoded=debug";

/// Initialize file logging.
///
/// # Arguments
/// * `log_file` - Path of the log file; the parent directory is created if missing
///
/// # Returns
/// * `Result<WorkerGuard>` - Guard that must be held for the app lifetime
///
/// # Details
/// `RUST_LOG` overrides the default filter.
pub fn init_logging(log_file: &Path) -> Result<WorkerGuard> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let logs_dir = log_file
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Log file has no parent directory: {}", log_file.display()))?;
    let file_name = log_file
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Log file has no file name: {}", log_file.display()))?;

    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory: {}", logs_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
