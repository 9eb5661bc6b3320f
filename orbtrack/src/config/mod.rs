//! Configuration file handling.
//!
//! Settings live in an INI file at `<config dir>/orbtrack/config.ini`:
//!
//! ```ini
//! [tracking]
//! position_url = https://api.wheretheiss.at/v1/satellites/25544
//! crew_url = http://api.open-notify.org/astros.json
//! poll_interval_ms = 5000
//! tick_interval_ms = 100
//! request_timeout_secs = 10
//!
//! [trail]
//! capacity = 200
//!
//! [view]
//! zoom = 4
//! follow_on_start = true
//!
//! [logging]
//! file = /home/user/.local/share/orbtrack/orbtrack.log
//! ```
//!
//! A missing file means defaults. Unknown keys are ignored.

mod keys;

pub use keys::ConfigKey;

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use crate::animation::DriverConfig;
use crate::follow::FollowState;
use crate::logging::default_log_path;
use crate::session::SessionConfig;
use crate::source::{DEFAULT_CREW_URL, DEFAULT_POSITION_URL};
use crate::trail::{TrailConfig, DEFAULT_TRAIL_CAPACITY};

/// Smallest supported zoom level (whole world).
pub const MIN_ZOOM: u8 = 1;
/// Largest supported zoom level.
pub const MAX_ZOOM: u8 = 10;
/// Smallest poll interval accepted, to stay polite to public APIs.
pub const MIN_POLL_INTERVAL_MS: u64 = 1000;

/// Errors loading, saving or editing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// `[tracking]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSettings {
    pub position_url: String,
    pub crew_url: String,
    pub poll_interval_ms: u64,
    pub tick_interval_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            position_url: DEFAULT_POSITION_URL.to_string(),
            crew_url: DEFAULT_CREW_URL.to_string(),
            poll_interval_ms: 5000,
            tick_interval_ms: 100,
            request_timeout_secs: 10,
        }
    }
}

/// `[trail]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailSettings {
    pub capacity: usize,
}

impl Default for TrailSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_TRAIL_CAPACITY,
        }
    }
}

/// `[view]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    pub zoom: u8,
    pub follow_on_start: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            zoom: 4,
            follow_on_start: true,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub file: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: default_log_path(),
        }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub tracking: TrackingSettings,
    pub trail: TrailSettings,
    pub view: ViewSettings,
    pub logging: LoggingSettings,
}

/// Directory holding the config file.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("orbtrack")
}

/// Full path of the config file.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.ini")
}

impl ConfigFile {
    /// Load from the default location, or defaults if there is no file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        self.to_ini()
            .write_to_file(path)
            .map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Build from a parsed INI document; missing keys keep their defaults.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for key in ConfigKey::all() {
            if let Some(value) = ini
                .section(Some(key.section()))
                .and_then(|s| s.get(key.key_name()))
            {
                key.set(&mut config, value)?;
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Render as an INI document.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        ini
    }

    /// Check relationships between values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tracking.tick_interval_ms > self.tracking.poll_interval_ms {
            return Err(ConfigError::InvalidValue {
                key: ConfigKey::TickIntervalMs.name(),
                value: self.tracking.tick_interval_ms.to_string(),
                reason: format!(
                    "must not exceed poll_interval_ms ({})",
                    self.tracking.poll_interval_ms
                ),
            });
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.tracking.poll_interval_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tracking.tick_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.tracking.request_timeout_secs)
    }

    /// Driver settings derived from intervals, trail and view.
    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig::from_intervals(self.poll_interval(), self.tick_interval())
            .with_initial_zoom(self.view.zoom)
            .with_trail(TrailConfig::with_capacity(self.trail.capacity))
    }

    /// Session settings for [`spawn_session`](crate::session::spawn_session).
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            driver: self.driver_config(),
            tick_interval: self.tick_interval(),
            initial_follow: if self.view.follow_on_start {
                FollowState::Following
            } else {
                FollowState::Released
            },
        }
    }
}
