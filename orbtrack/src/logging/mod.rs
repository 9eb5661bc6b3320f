//! Log file setup.
//!
//! Logs go to a file through a non-blocking writer so they never corrupt the
//! terminal UI. `RUST_LOG` overrides the default filter.

use std::path::{Path, PathBuf};

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::UtcOffset;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::EnvFilter;

/// Default log file name.
pub const DEFAULT_LOG_FILE_NAME: &str = "orbtrack.log";

/// Errors setting up logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid log file path: {0}")]
    InvalidPath(PathBuf),

    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}

/// Keeps the background log writer alive; flushes on drop.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Default log file location (`<data dir>/orbtrack/orbtrack.log`).
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("orbtrack")
        .join(DEFAULT_LOG_FILE_NAME)
}

/// Default filter directive.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "orbtrack=debug"
    } else {
        "orbtrack=info"
    }
}

/// Install the global subscriber writing to `log_file`.
///
/// Must be called once per process; keep the returned guard alive until exit.
pub fn init_logging(log_file: &Path, verbose: bool) -> Result<LoggingGuard, LoggingError> {
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(log_file.to_path_buf()))?;

    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // Local offset can be unavailable on multi-threaded Unix processes.
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_timer(OffsetTime::new(offset, Rfc3339))
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(LoggingGuard { _guard: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path() {
        let path = default_log_path();
        assert!(path.ends_with("orbtrack/orbtrack.log"));
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "orbtrack=info");
        assert_eq!(default_filter(true), "orbtrack=debug");
    }

    #[test]
    fn test_invalid_path_rejected() {
        let result = init_logging(Path::new("/"), false);
        assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
    }
}
