//! Per-pass and per-run reports

use crate::core::types::{
    OutcomeKind, PrivilegeState, ProcessId, ProcessName, StrategyOutcome, WindowHandle, WindowRect,
};
use crate::strategy::{ProbeResult, StrategyKind};
use serde::Serialize;
use std::fmt;

/// One target window and what the strategy did to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub window: WindowHandle,
    pub pid: ProcessId,
    pub process_name: ProcessName,
    /// Screen rectangle when the window was matched
    pub rect: Option<WindowRect>,
    pub outcome: StrategyOutcome,
}

/// Every strategy's outcome on one target window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub window: WindowHandle,
    pub pid: ProcessId,
    pub process_name: ProcessName,
    pub results: Vec<ProbeResult>,
}

/// Outcome counts by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeTally {
    pub applied: u64,
    pub not_applicable: u64,
    pub denied: u64,
    pub error: u64,
}

impl OutcomeTally {
    pub fn record(&mut self, kind: OutcomeKind) {
        match kind {
            OutcomeKind::Applied => self.applied += 1,
            OutcomeKind::NotApplicable => self.not_applicable += 1,
            OutcomeKind::Denied => self.denied += 1,
            OutcomeKind::Error => self.error += 1,
        }
    }

    pub fn merge(&mut self, other: &OutcomeTally) {
        self.applied += other.applied;
        self.not_applicable += other.not_applicable;
        self.denied += other.denied;
        self.error += other.error;
    }

    pub fn total(&self) -> u64 {
        self.applied + self.not_applicable + self.denied + self.error
    }
}

impl fmt::Display for OutcomeTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} applied, {} not applicable, {} denied, {} failed",
            self.applied, self.not_applicable, self.denied, self.error
        )
    }
}

/// Result of a single scan pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// 1-based pass number
    pub cycle: u64,
    /// Windows that passed the enumeration filter
    pub windows_seen: usize,
    pub matches: Vec<MatchRecord>,
}

impl CycleReport {
    pub fn tally(&self) -> OutcomeTally {
        let mut tally = OutcomeTally::default();
        for record in &self.matches {
            tally.record(record.outcome.kind());
        }
        tally
    }
}

/// Totals over a whole run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub target: String,
    pub strategy: StrategyKind,
    pub privileges: PrivilegeState,
    pub cycles: u64,
    pub matches: u64,
    pub outcomes: OutcomeTally,
    pub cancelled: bool,
}

impl RunSummary {
    pub fn new(target: &str, strategy: StrategyKind, privileges: PrivilegeState) -> Self {
        RunSummary {
            target: target.to_string(),
            strategy,
            privileges,
            cycles: 0,
            matches: 0,
            outcomes: OutcomeTally::default(),
            cancelled: false,
        }
    }

    pub fn absorb(&mut self, report: &CycleReport) {
        self.cycles = report.cycle;
        self.matches += report.matches.len() as u64;
        self.outcomes.merge(&report.tally());
    }
}
