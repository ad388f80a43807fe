//! Capture-Veil library: find a target process's windows and hide them from
//! screen capture

pub mod config;
pub mod core;
pub mod monitor;
pub mod process;
pub mod strategy;
pub mod system;
pub mod window;
#[cfg(windows)]
pub mod windows;

// Re-export main types from core module
pub use core::types::{
    ErrorCode, HideStep, NotApplicableReason, OsError, OsVersion, OutcomeKind, PrivilegeState,
    ProcessId, ProcessName, StrategyOutcome, TargetSpec, VeilError, VeilResult, WindowEntry,
    WindowHandle, WindowRect,
};

pub use config::{Config, ConfigOverrides};
pub use monitor::{CycleReport, MatchRecord, Monitor, MonitorSettings, MonitorState, RunSummary};
pub use process::{ElevationPolicy, PrivilegeGate, ProcessResolver};
pub use strategy::{compare_strategies, HidingStrategy, ProbeResult, StrategyKind};
pub use system::{Platform, ProcessQuery, SimulatedDesktop, TokenQuery, WindowSystem};
pub use window::{EnumerationFilter, WindowEnumerator};

#[cfg(windows)]
pub use windows::NativeSystem;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_module_accessible() {
        assert_eq!(core::VERSION, env!("CARGO_PKG_VERSION"));
        assert!(!core::AUTHORS.is_empty());
    }

    #[test]
    fn test_reexports_compose() {
        let desktop = SimulatedDesktop::demo("vlc.exe");
        let settings = MonitorSettings::from_config(&Config::default()).unwrap();
        let mut monitor = Monitor::new(&desktop, settings);

        let report = monitor.scan_once();
        assert_eq!(report.matches.len(), 2);
        assert!(report
            .matches
            .iter()
            .all(|m| m.outcome.kind() == OutcomeKind::Denied));
    }
}
