//! Configuration loader for Capture-Veil
//!
//! Handles loading configuration from TOML files and merging with defaults.

use super::defaults::{default_config, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
use super::validator::validate_config;
use crate::core::types::VeilResult;
use crate::process::ElevationPolicy;
use crate::strategy::StrategyKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_target")]
    pub target: TargetConfig,

    #[serde(default = "default_strategy")]
    pub strategy: StrategyConfig,

    #[serde(default = "default_monitor")]
    pub monitor: MonitorConfig,

    #[serde(default = "default_privileges")]
    pub privileges: PrivilegeConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

/// Which process to watch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default = "default_process_name")]
    pub process_name: String,
}

/// Hiding technique and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(default = "default_kind")]
    pub kind: StrategyKind,
    /// Opacity used by the transparency technique
    #[serde(default = "default_ghost_alpha")]
    pub ghost_alpha: u8,
    /// Minimum Windows version for capture exclusion
    #[serde(default = "default_min_os_version")]
    pub min_os_version: String,
}

/// Scan loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_scan_interval_ms")]
    pub scan_interval_ms: u64,
    #[serde(default = "default_visible_only")]
    pub visible_only: bool,
    /// Skip windows that do not accept input
    #[serde(default = "default_enabled_only")]
    pub enabled_only: bool,
    /// Skip windows with an empty screen rectangle
    #[serde(default = "default_skip_empty")]
    pub skip_empty: bool,
}

/// Startup privilege handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivilegeConfig {
    #[serde(default = "default_elevation")]
    pub elevation: ElevationPolicy,
    #[serde(default = "default_enable_debug_privilege")]
    pub enable_debug_privilege: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Values supplied on the command line, applied over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub process_name: Option<String>,
    pub strategy: Option<StrategyKind>,
    pub scan_interval_ms: Option<u64>,
    pub elevation: Option<ElevationPolicy>,
    pub log_level: Option<String>,
}

impl Config {
    /// Apply command-line overrides
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(name) = &overrides.process_name {
            self.target.process_name = name.clone();
        }
        if let Some(kind) = overrides.strategy {
            self.strategy.kind = kind;
        }
        if let Some(interval) = overrides.scan_interval_ms {
            self.monitor.scan_interval_ms = interval;
        }
        if let Some(elevation) = overrides.elevation {
            self.privileges.elevation = elevation;
        }
        if let Some(level) = &overrides.log_level {
            self.logging.level = level.clone();
        }
    }
}

/// Configuration loader
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigLoader {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads configuration from file
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::FileNotFound(
                self.config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads configuration, falling back to defaults only when the file is
    /// missing; a file that exists but does not parse is still an error
    pub fn load_or_default(&self) -> Result<Config, ConfigError> {
        match self.load() {
            Err(ConfigError::FileNotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Saves configuration to file
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, contents)?;
        Ok(())
    }
}

/// Configuration path: explicit argument, then environment, then default
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}

/// Loads the configuration the binary runs with
///
/// Resolves the path with [`config_path`], applies `overrides` over the file
/// and validates the result.
pub fn load_config(explicit: Option<&Path>, overrides: &ConfigOverrides) -> VeilResult<Config> {
    let mut config = ConfigLoader::new(config_path(explicit)).load_or_default()?;
    config.apply_overrides(overrides);
    validate_config(&config)?;
    Ok(config)
}

// Default functions for serde
fn default_target() -> TargetConfig {
    default_config().target
}

fn default_strategy() -> StrategyConfig {
    default_config().strategy
}

fn default_monitor() -> MonitorConfig {
    default_config().monitor
}

fn default_privileges() -> PrivilegeConfig {
    default_config().privileges
}

fn default_logging() -> LoggingConfig {
    default_config().logging
}

// Individual field defaults
fn default_process_name() -> String {
    default_config().target.process_name
}

fn default_kind() -> StrategyKind {
    default_config().strategy.kind
}

fn default_ghost_alpha() -> u8 {
    default_config().strategy.ghost_alpha
}

fn default_min_os_version() -> String {
    default_config().strategy.min_os_version
}

fn default_scan_interval_ms() -> u64 {
    default_config().monitor.scan_interval_ms
}

fn default_visible_only() -> bool {
    default_config().monitor.visible_only
}

fn default_enabled_only() -> bool {
    default_config().monitor.enabled_only
}

fn default_skip_empty() -> bool {
    default_config().monitor.skip_empty
}

fn default_elevation() -> ElevationPolicy {
    default_config().privileges.elevation
}

fn default_enable_debug_privilege() -> bool {
    default_config().privileges.enable_debug_privilege
}

fn default_log_level() -> String {
    default_config().logging.level
}

impl Default for Config {
    fn default() -> Self {
        default_config()
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        default_strategy()
    }
}
