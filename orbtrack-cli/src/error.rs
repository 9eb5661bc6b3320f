//! CLI error type.

use std::fmt;

use orbtrack::config::ConfigError;
use orbtrack::logging::LoggingError;
use orbtrack::session::SessionClosed;
use orbtrack::source::SourceError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Bad configuration or arguments.
    Config(String),
    /// Logging could not be set up.
    Logging(LoggingError),
    /// A remote API request failed.
    Source(SourceError),
    /// The tracking session ended while still in use.
    Session(SessionClosed),
    /// Terminal or runtime I/O failed.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "{}", msg),
            CliError::Logging(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Source(e) => write!(f, "{}", e),
            CliError::Session(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(_) => None,
            CliError::Logging(e) => Some(e),
            CliError::Source(e) => Some(e),
            CliError::Session(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<SourceError> for CliError {
    fn from(e: SourceError) -> Self {
        CliError::Source(e)
    }
}

impl From<SessionClosed> for CliError {
    fn from(e: SessionClosed) -> Self {
        CliError::Session(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message_is_passed_through() {
        let err: CliError = ConfigError::UnknownKey("view.colour".to_string()).into();
        assert_eq!(err.to_string(), "Unknown configuration key 'view.colour'");
    }

    #[test]
    fn test_source_error_keeps_status() {
        let err: CliError = SourceError::Status { status: 503 }.into();
        assert_eq!(err.to_string(), "API error: 503");
    }
}
