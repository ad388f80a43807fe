//! Default configuration values for Capture-Veil

use super::loader::{
    Config, LoggingConfig, MonitorConfig, PrivilegeConfig, StrategyConfig, TargetConfig,
};
use crate::process::ElevationPolicy;
use crate::strategy::transparency::DEFAULT_GHOST_ALPHA;
use crate::strategy::StrategyKind;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "capture-veil.toml";

/// Environment variable overriding the configuration file path
pub const CONFIG_ENV_VAR: &str = "CAPTURE_VEIL_CONFIG";

pub const DEFAULT_TARGET_PROCESS: &str = "vlc.exe";
pub const DEFAULT_MIN_OS_VERSION: &str = "10.0.19041";
pub const DEFAULT_SCAN_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Returns the default configuration
pub fn default_config() -> Config {
    Config {
        target: TargetConfig {
            process_name: DEFAULT_TARGET_PROCESS.to_string(),
        },
        strategy: StrategyConfig {
            kind: StrategyKind::CaptureExclusion,
            ghost_alpha: DEFAULT_GHOST_ALPHA,
            min_os_version: DEFAULT_MIN_OS_VERSION.to_string(),
        },
        monitor: MonitorConfig {
            scan_interval_ms: DEFAULT_SCAN_INTERVAL_MS,
            visible_only: true,
            enabled_only: false,
            skip_empty: false,
        },
        privileges: PrivilegeConfig {
            elevation: ElevationPolicy::Warn,
            enable_debug_privilege: true,
        },
        logging: LoggingConfig {
            level: DEFAULT_LOG_LEVEL.to_string(),
        },
    }
}
