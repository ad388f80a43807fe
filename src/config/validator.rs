//! Configuration validator for Capture-Veil
//!
//! Validates configuration values to ensure they are within acceptable ranges.

use super::loader::{
    Config, ConfigError, LoggingConfig, MonitorConfig, StrategyConfig, TargetConfig,
};
use crate::core::types::{OsVersion, TargetSpec};
use crate::strategy::StrategyKind;

const MIN_SCAN_INTERVAL_MS: u64 = 50;
const MAX_SCAN_INTERVAL_MS: u64 = 60 * 60 * 1000;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_target(&config.target)?;
        Self::validate_strategy(&config.strategy)?;
        Self::validate_monitor(&config.monitor)?;
        Self::validate_logging(&config.logging)?;
        Ok(())
    }

    /// Validates the target process name
    fn validate_target(target: &TargetConfig) -> Result<(), ConfigError> {
        TargetSpec::new(target.process_name.as_str())
            .map(|_| ())
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Validates strategy configuration
    fn validate_strategy(strategy: &StrategyConfig) -> Result<(), ConfigError> {
        strategy.min_os_version.parse::<OsVersion>().map_err(|_| {
            ConfigError::Invalid(format!(
                "Minimum OS version '{}' must look like 10.0.19041",
                strategy.min_os_version
            ))
        })?;

        // Fully opaque would leave the window untouched
        if strategy.kind == StrategyKind::TransparencyGhost && strategy.ghost_alpha == u8::MAX {
            return Err(ConfigError::Invalid(
                "Ghost alpha must be below 255".to_string(),
            ));
        }

        Ok(())
    }

    /// Validates scan loop configuration
    fn validate_monitor(monitor: &MonitorConfig) -> Result<(), ConfigError> {
        if monitor.scan_interval_ms < MIN_SCAN_INTERVAL_MS {
            return Err(ConfigError::Invalid(format!(
                "Scan interval must be at least {} ms",
                MIN_SCAN_INTERVAL_MS
            )));
        }

        if monitor.scan_interval_ms > MAX_SCAN_INTERVAL_MS {
            return Err(ConfigError::Invalid(
                "Scan interval cannot exceed one hour".to_string(),
            ));
        }

        Ok(())
    }

    /// Validates logging configuration
    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_target() {
        let mut config = Config::default();
        config.target.process_name = String::new();
        assert!(validate_config(&config).is_err());

        config.target.process_name = "C:\\Apps\\vlc.exe".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("not a path"));
    }

    #[test]
    fn test_invalid_min_os_version() {
        let mut config = Config::default();
        config.strategy.min_os_version = "win10".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("Minimum OS version"));
    }

    #[test]
    fn test_opaque_ghost_rejected() {
        let mut config = Config::default();
        config.strategy.ghost_alpha = 255;
        // Irrelevant while capture exclusion is selected
        assert!(validate_config(&config).is_ok());

        config.strategy.kind = StrategyKind::TransparencyGhost;
        assert!(validate_config(&config).is_err());

        config.strategy.ghost_alpha = 0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_scan_interval_bounds() {
        let mut config = Config::default();
        config.monitor.scan_interval_ms = 10;
        assert!(validate_config(&config).is_err());

        config.monitor.scan_interval_ms = MAX_SCAN_INTERVAL_MS + 1;
        assert!(validate_config(&config).is_err());

        config.monitor.scan_interval_ms = MIN_SCAN_INTERVAL_MS;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));

        config.logging.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
