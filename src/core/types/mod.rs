//! Core type definitions

pub mod error;
pub mod error_code;
pub mod outcome;
pub mod privilege;
pub mod target;
pub mod version;
pub mod window;

pub use error::{OsError, VeilError, VeilResult};
pub use error_code::ErrorCode;
pub use outcome::{HideStep, NotApplicableReason, OutcomeKind, StrategyOutcome};
pub use privilege::PrivilegeState;
pub use target::{ProcessName, TargetSpec};
pub use version::OsVersion;
pub use window::{ProcessId, WindowEntry, WindowHandle, WindowRect};
