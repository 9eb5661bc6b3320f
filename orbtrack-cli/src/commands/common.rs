//! Helpers shared across CLI commands.

use orbtrack::config::{ConfigFile, ConfigKey};

use crate::error::CliError;

/// Apply a command-line override through the same validation as `config set`.
pub fn apply_override<T: ToString>(
    config: &mut ConfigFile,
    key: ConfigKey,
    value: Option<T>,
) -> Result<(), CliError> {
    if let Some(value) = value {
        key.set(config, &value.to_string())?;
    }
    Ok(())
}

/// Look up a key typed by the user, with a hint on failure.
pub fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'orbtrack config list' to see available keys.",
            key
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_applies_value() {
        let mut config = ConfigFile::default();
        apply_override(&mut config, ConfigKey::TrailCapacity, Some(50usize)).unwrap();
        apply_override::<u8>(&mut config, ConfigKey::Zoom, None).unwrap();
        assert_eq!(config.trail.capacity, 50);
        assert_eq!(config.view.zoom, 4);
    }

    #[test]
    fn test_override_is_validated() {
        let mut config = ConfigFile::default();
        let err = apply_override(&mut config, ConfigKey::Zoom, Some(0u8)).unwrap_err();
        assert!(err.to_string().contains("view.zoom"));
    }

    #[test]
    fn test_parse_key_hint() {
        assert_eq!(parse_key("trail.capacity").unwrap(), ConfigKey::TrailCapacity);
        let err = parse_key("nope").unwrap_err();
        assert!(err.to_string().contains("orbtrack config list"));
    }
}
