//! Addressable configuration keys in `section.key` form.

use std::path::PathBuf;
use std::str::FromStr;

use super::{ConfigError, ConfigFile, MAX_ZOOM, MIN_POLL_INTERVAL_MS, MIN_ZOOM};

/// A single setting, addressable as `section.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    PositionUrl,
    CrewUrl,
    PollIntervalMs,
    TickIntervalMs,
    RequestTimeoutSecs,
    TrailCapacity,
    Zoom,
    FollowOnStart,
    LogFile,
}

impl ConfigKey {
    /// Every key, in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::PositionUrl,
            ConfigKey::CrewUrl,
            ConfigKey::PollIntervalMs,
            ConfigKey::TickIntervalMs,
            ConfigKey::RequestTimeoutSecs,
            ConfigKey::TrailCapacity,
            ConfigKey::Zoom,
            ConfigKey::FollowOnStart,
            ConfigKey::LogFile,
        ]
    }

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::PositionUrl
            | ConfigKey::CrewUrl
            | ConfigKey::PollIntervalMs
            | ConfigKey::TickIntervalMs
            | ConfigKey::RequestTimeoutSecs => "tracking",
            ConfigKey::TrailCapacity => "trail",
            ConfigKey::Zoom | ConfigKey::FollowOnStart => "view",
            ConfigKey::LogFile => "logging",
        }
    }

    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::PositionUrl => "position_url",
            ConfigKey::CrewUrl => "crew_url",
            ConfigKey::PollIntervalMs => "poll_interval_ms",
            ConfigKey::TickIntervalMs => "tick_interval_ms",
            ConfigKey::RequestTimeoutSecs => "request_timeout_secs",
            ConfigKey::TrailCapacity => "capacity",
            ConfigKey::Zoom => "zoom",
            ConfigKey::FollowOnStart => "follow_on_start",
            ConfigKey::LogFile => "file",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value rendered as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::PositionUrl => config.tracking.position_url.clone(),
            ConfigKey::CrewUrl => config.tracking.crew_url.clone(),
            ConfigKey::PollIntervalMs => config.tracking.poll_interval_ms.to_string(),
            ConfigKey::TickIntervalMs => config.tracking.tick_interval_ms.to_string(),
            ConfigKey::RequestTimeoutSecs => config.tracking.request_timeout_secs.to_string(),
            ConfigKey::TrailCapacity => config.trail.capacity.to_string(),
            ConfigKey::Zoom => config.view.zoom.to_string(),
            ConfigKey::FollowOnStart => config.view.follow_on_start.to_string(),
            ConfigKey::LogFile => config.logging.file.display().to_string(),
        }
    }

    /// Parse and store `value`.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::PositionUrl => config.tracking.position_url = self.parse_url(value)?,
            ConfigKey::CrewUrl => config.tracking.crew_url = self.parse_url(value)?,
            ConfigKey::PollIntervalMs => {
                let ms: u64 = self.parse_number(value)?;
                if ms < MIN_POLL_INTERVAL_MS {
                    return Err(self.invalid(
                        value,
                        format!("must be at least {}", MIN_POLL_INTERVAL_MS),
                    ));
                }
                config.tracking.poll_interval_ms = ms;
            }
            ConfigKey::TickIntervalMs => {
                let ms: u64 = self.parse_number(value)?;
                if ms == 0 {
                    return Err(self.invalid(value, "must be greater than 0".to_string()));
                }
                config.tracking.tick_interval_ms = ms;
            }
            ConfigKey::RequestTimeoutSecs => {
                let secs: u64 = self.parse_number(value)?;
                if secs == 0 {
                    return Err(self.invalid(value, "must be greater than 0".to_string()));
                }
                config.tracking.request_timeout_secs = secs;
            }
            ConfigKey::TrailCapacity => {
                let capacity: usize = self.parse_number(value)?;
                if capacity == 0 {
                    return Err(self.invalid(value, "must be greater than 0".to_string()));
                }
                config.trail.capacity = capacity;
            }
            ConfigKey::Zoom => {
                let zoom: u8 = self.parse_number(value)?;
                if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
                    return Err(self.invalid(
                        value,
                        format!("must be between {} and {}", MIN_ZOOM, MAX_ZOOM),
                    ));
                }
                config.view.zoom = zoom;
            }
            ConfigKey::FollowOnStart => {
                config.view.follow_on_start = match value.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(self.invalid(value, "expected true or false".to_string())),
                };
            }
            ConfigKey::LogFile => {
                if value.is_empty() {
                    return Err(self.invalid(value, "path must not be empty".to_string()));
                }
                config.logging.file = PathBuf::from(value);
            }
        }
        Ok(())
    }

    fn parse_url(&self, value: &str) -> Result<String, ConfigError> {
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(value.to_string())
        } else {
            Err(self.invalid(value, "must start with http:// or https://".to_string()))
        }
    }

    fn parse_number<T: FromStr>(&self, value: &str) -> Result<T, ConfigError> {
        value
            .parse()
            .map_err(|_| self.invalid(value, "not a valid number".to_string()))
    }

    fn invalid(&self, value: &str, reason: String) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason,
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
