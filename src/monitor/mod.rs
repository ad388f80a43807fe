//! Periodic scan loop
//!
//! The monitor enumerates top-level windows, resolves each owner's
//! executable name, and applies the configured hiding strategy to every
//! window owned by the target process. Each pass works from a fresh
//! snapshot; nothing is remembered between passes.

pub mod report;
pub mod runner;
pub mod settings;

pub use report::{CycleReport, MatchRecord, OutcomeTally, ProbeReport, RunSummary};
pub use runner::{Monitor, MonitorState};
pub use settings::MonitorSettings;
