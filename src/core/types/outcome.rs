//! Results of applying a hiding technique to one window

use super::{ErrorCode, OsError, OsVersion};
use serde::Serialize;
use std::fmt;

/// Sub-step of a hiding technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HideStep {
    /// `SetWindowDisplayAffinity(WDA_EXCLUDEFROMCAPTURE)`
    CaptureExclusion,
    /// Adding `WS_EX_LAYERED` to the extended style
    LayeredStyle,
    /// `SetLayeredWindowAttributes` with `LWA_ALPHA`
    Alpha,
    /// Frame refresh via `SetWindowPos`
    Redraw,
}

impl fmt::Display for HideStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HideStep::CaptureExclusion => write!(f, "capture exclusion"),
            HideStep::LayeredStyle => write!(f, "layered style"),
            HideStep::Alpha => write!(f, "alpha"),
            HideStep::Redraw => write!(f, "redraw"),
        }
    }
}

/// Why a technique could not be attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum NotApplicableReason {
    OsVersionTooOld {
        found: OsVersion,
        required: OsVersion,
    },
    OsVersionUnknown,
}

impl fmt::Display for NotApplicableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotApplicableReason::OsVersionTooOld { found, required } => write!(
                f,
                "Windows {} does not support capture exclusion (requires {})",
                found, required
            ),
            NotApplicableReason::OsVersionUnknown => {
                write!(f, "Windows version could not be determined")
            }
        }
    }
}

/// Outcome of one strategy application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum StrategyOutcome {
    Applied,
    NotApplicable(NotApplicableReason),
    /// The OS refused the mutation; expected for windows of other processes
    Denied { step: HideStep, code: ErrorCode },
    Error { step: HideStep, message: String },
}

impl StrategyOutcome {
    /// Classify a failed capability call made during `step`
    ///
    /// Only access refusals are `Denied`. Everything else, including a
    /// vanished window, `ERROR_INVALID_PARAMETER` and a failure that left no
    /// error code, is an unexpected `Error`.
    pub fn from_os_error(step: HideStep, error: OsError) -> Self {
        if error.code.is_access_refusal() {
            StrategyOutcome::Denied {
                step,
                code: error.code,
            }
        } else {
            StrategyOutcome::Error {
                step,
                message: error.to_string(),
            }
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            StrategyOutcome::Applied => OutcomeKind::Applied,
            StrategyOutcome::NotApplicable(_) => OutcomeKind::NotApplicable,
            StrategyOutcome::Denied { .. } => OutcomeKind::Denied,
            StrategyOutcome::Error { .. } => OutcomeKind::Error,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, StrategyOutcome::Applied)
    }
}

impl fmt::Display for StrategyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyOutcome::Applied => write!(f, "applied"),
            StrategyOutcome::NotApplicable(reason) => write!(f, "not applicable: {}", reason),
            StrategyOutcome::Denied { step, code } => {
                write!(f, "denied at {} step (error {})", step, code.code())
            }
            StrategyOutcome::Error { step, message } => {
                write!(f, "error at {} step: {}", step, message)
            }
        }
    }
}

/// Outcome discriminant used for tallies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeKind {
    Applied,
    NotApplicable,
    Denied,
    Error,
}
