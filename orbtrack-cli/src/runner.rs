//! Shared setup for commands that run the tracker.

use orbtrack::config::ConfigFile;
use orbtrack::logging::{init_logging, LoggingGuard};

use crate::error::CliError;

/// Loads configuration and installs file logging for the life of a command.
pub struct CliRunner {
    config: ConfigFile,
    _logging: LoggingGuard,
}

impl CliRunner {
    /// Load the config file and start logging to its `[logging] file`.
    pub fn new(verbose: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;
        let logging = init_logging(&config.logging.file, verbose)?;
        Ok(Self {
            config,
            _logging: logging,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigFile {
        &mut self.config
    }

    /// Record the command and effective settings in the log.
    pub fn log_startup(&self, command: &str) {
        let config = &self.config;
        tracing::info!(
            command,
            version = orbtrack::VERSION,
            position_url = %config.tracking.position_url,
            poll_interval_ms = config.tracking.poll_interval_ms,
            tick_interval_ms = config.tracking.tick_interval_ms,
            trail_capacity = config.trail.capacity,
            "Orbtrack starting"
        );
    }
}

/// Multi-threaded runtime for the background tasks.
pub fn build_runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("orbtrack-worker")
        .enable_all()
        .build()
        .map_err(CliError::Io)
}
