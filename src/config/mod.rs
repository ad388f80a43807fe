//! Configuration module for Capture-Veil
//!
//! Provides configuration loading, validation, and default settings.
//! Configuration is static for the lifetime of the process.

mod defaults;
mod loader;
mod validator;

pub use defaults::{default_config, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
pub use loader::{
    config_path, load_config, Config, ConfigError, ConfigLoader, ConfigOverrides, LoggingConfig,
    MonitorConfig, PrivilegeConfig, StrategyConfig, TargetConfig,
};
pub use validator::{validate_config, ConfigValidator};

// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
