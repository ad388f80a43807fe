//! The monitor state machine and its scan loop

use super::report::{CycleReport, MatchRecord, ProbeReport, RunSummary};
use super::settings::MonitorSettings;
use crate::core::types::{PrivilegeState, StrategyOutcome, VeilResult, WindowHandle};
use crate::core::VERSION;
use crate::process::{PrivilegeGate, ProcessResolver};
use crate::strategy::{compare_strategies, HidingStrategy};
use crate::system::Platform;
use crate::window::WindowEnumerator;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Lifecycle of a monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Startup checks have not run yet
    Initializing,
    /// Startup checks passed; scanning until stopped
    Scanning,
}

/// Watches the desktop for windows of the target process
pub struct Monitor<P> {
    platform: P,
    settings: MonitorSettings,
    state: MonitorState,
    privileges: PrivilegeState,
    cycle: u64,
}

impl<P: Platform> Monitor<P> {
    pub fn new(platform: P, settings: MonitorSettings) -> Self {
        Monitor {
            platform,
            settings,
            state: MonitorState::Initializing,
            privileges: PrivilegeState::default(),
            cycle: 0,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Privileges observed by [`Monitor::initialize`]
    pub fn privileges(&self) -> PrivilegeState {
        self.privileges
    }

    /// Run the startup checks once
    ///
    /// Fails only when the elevation policy is `require` and the process is
    /// not elevated. Calling it again after success is a no-op.
    pub fn initialize(&mut self) -> VeilResult<PrivilegeState> {
        if self.state == MonitorState::Scanning {
            return Ok(self.privileges);
        }

        info!("Capture-Veil v{}", VERSION);
        info!(
            "Target: {} | Strategy: {} | Interval: {} ms",
            self.settings.target,
            self.settings.strategy.kind(),
            self.settings.interval.as_millis()
        );

        let gate = PrivilegeGate::new(&self.platform);
        self.privileges = gate.check(
            self.settings.elevation,
            self.settings.enable_debug_privilege,
        )?;
        debug!("Privileges: {}", self.privileges);

        self.state = MonitorState::Scanning;
        Ok(self.privileges)
    }

    /// One full pass: enumerate, resolve, match, apply
    ///
    /// Failures on individual windows are recorded in the report and never
    /// cut the pass short.
    pub fn scan_once(&mut self) -> CycleReport {
        self.cycle += 1;
        debug!("Scanning windows...");

        let enumerator = WindowEnumerator::new(&self.platform, self.settings.filter);
        let resolver = ProcessResolver::new(&self.platform);
        let mut windows_seen = 0;
        let mut matches = Vec::new();

        for entry in enumerator.windows() {
            windows_seen += 1;

            let process_name = resolver.resolve(entry.pid);
            if !self.settings.target.matches(&process_name) {
                continue;
            }

            let rect = self.platform.window_rect(entry.handle);
            match rect {
                Some(rect) => info!(
                    "Found target window: {} (PID: {}, {}, {})",
                    entry.handle, entry.pid, process_name, rect
                ),
                None => info!(
                    "Found target window: {} (PID: {}, {})",
                    entry.handle, entry.pid, process_name
                ),
            }
            let outcome = self.settings.strategy.apply(&self.platform, entry.handle);
            log_outcome(&outcome, entry.handle);

            matches.push(MatchRecord {
                window: entry.handle,
                pid: entry.pid,
                process_name,
                rect,
                outcome,
            });
        }

        let report = CycleReport {
            cycle: self.cycle,
            windows_seen,
            matches,
        };
        debug!(
            "Pass {} finished: {} windows, {} matches ({})",
            report.cycle,
            report.windows_seen,
            report.matches.len(),
            report.tally()
        );
        report
    }

    /// Apply each of `strategies` once to every target window
    ///
    /// Unlike [`Monitor::scan_once`] this does not count as a pass.
    pub fn probe(&self, strategies: &[Box<dyn HidingStrategy>]) -> Vec<ProbeReport> {
        let enumerator = WindowEnumerator::new(&self.platform, self.settings.filter);
        let resolver = ProcessResolver::new(&self.platform);

        enumerator
            .windows()
            .filter_map(|entry| {
                let process_name = resolver.resolve(entry.pid);
                if !self.settings.target.matches(&process_name) {
                    return None;
                }
                Some(ProbeReport {
                    window: entry.handle,
                    pid: entry.pid,
                    process_name,
                    results: compare_strategies(&self.platform, entry.handle, strategies),
                })
            })
            .collect()
    }

    /// Initialize, then scan until cancelled or `max_cycles` is reached
    pub async fn run(&mut self, cancel: CancellationToken) -> VeilResult<RunSummary> {
        self.run_with(cancel, |_| {}).await
    }

    /// Like [`Monitor::run`], handing every pass report to `on_cycle`
    pub async fn run_with<F>(
        &mut self,
        cancel: CancellationToken,
        mut on_cycle: F,
    ) -> VeilResult<RunSummary>
    where
        F: FnMut(&CycleReport),
    {
        let privileges = self.initialize()?;
        let mut summary = RunSummary::new(
            self.settings.target.process_name(),
            self.settings.strategy.kind(),
            privileges,
        );
        info!("Monitoring started");

        loop {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            let report = self.scan_once();
            summary.absorb(&report);
            on_cycle(&report);

            if self
                .settings
                .max_cycles
                .is_some_and(|max| report.cycle >= max)
            {
                break;
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    summary.cancelled = true;
                    break;
                }
                _ = tokio::time::sleep(self.settings.interval) => {}
            }
        }

        info!(
            "Monitoring stopped after {} passes: {}",
            summary.cycles, summary.outcomes
        );
        Ok(summary)
    }
}

fn log_outcome(outcome: &StrategyOutcome, window: WindowHandle) {
    match outcome {
        StrategyOutcome::Applied => info!("Window {} hidden", window),
        StrategyOutcome::NotApplicable(reason) => {
            warn!("Window {} not hidden: {}", window, reason)
        }
        StrategyOutcome::Denied { step, code } => warn!(
            "Failed to hide window {} at {} step (Error {})",
            window,
            step,
            code.code()
        ),
        StrategyOutcome::Error { step, message } => {
            warn!("Window {} failed at {} step: {}", window, step, message)
        }
    }
}
