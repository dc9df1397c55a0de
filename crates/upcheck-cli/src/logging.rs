//! Tracing setup: compact stderr output plus a plain-text log file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use upcheck_core::DEFAULT_LOG_FILE;

use crate::error::CliError;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `verbose`, which wins over `info`. The terminal
/// only shows warnings unless `verbose` is set so the status panel stays
/// readable; the file receives everything the filter lets through.
///
/// The returned guard flushes the file writer on drop and must be held
/// until the process exits.
pub fn init_tracing(log_file: &Path, verbose: bool) -> Result<WorkerGuard, CliError> {
    let (dir, file_name) = split_log_path(log_file);
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let terminal_level = if verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_filter(terminal_level),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))?;

    Ok(guard)
}

const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Directory and file name of the log file; a bare name lands in `.`.
fn split_log_path(log_file: &Path) -> (&Path, &std::ffi::OsStr) {
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .unwrap_or_else(|| DEFAULT_LOG_FILE.as_ref());
    (dir, file_name)
}
