//! Monitor settings derived from configuration

use crate::config::Config;
use crate::core::types::{TargetSpec, VeilResult};
use crate::process::ElevationPolicy;
use crate::strategy::HidingStrategy;
use crate::window::EnumerationFilter;
use std::time::Duration;

/// Everything the monitor needs, already validated
pub struct MonitorSettings {
    pub target: TargetSpec,
    pub strategy: Box<dyn HidingStrategy>,
    pub interval: Duration,
    pub filter: EnumerationFilter,
    pub elevation: ElevationPolicy,
    pub enable_debug_privilege: bool,
    /// Stop after this many passes; `None` runs until cancelled
    pub max_cycles: Option<u64>,
}

impl MonitorSettings {
    pub fn from_config(config: &Config) -> VeilResult<Self> {
        Ok(MonitorSettings {
            target: TargetSpec::new(config.target.process_name.as_str())?,
            strategy: config.strategy.kind.build(&config.strategy)?,
            interval: Duration::from_millis(config.monitor.scan_interval_ms),
            filter: EnumerationFilter {
                visible_only: config.monitor.visible_only,
                enabled_only: config.monitor.enabled_only,
                skip_empty: config.monitor.skip_empty,
            },
            elevation: config.privileges.elevation,
            enable_debug_privilege: config.privileges.enable_debug_privilege,
            max_cycles: None,
        })
    }

    pub fn with_max_cycles(mut self, max_cycles: u64) -> Self {
        self.max_cycles = Some(max_cycles);
        self
    }
}

impl std::fmt::Debug for MonitorSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorSettings")
            .field("target", &self.target)
            .field("strategy", &self.strategy.kind())
            .field("interval", &self.interval)
            .field("filter", &self.filter)
            .field("elevation", &self.elevation)
            .field("enable_debug_privilege", &self.enable_debug_privilege)
            .field("max_cycles", &self.max_cycles)
            .finish()
    }
}
