//! Core module containing fundamental types for Capture-Veil
//!
//! This module provides the foundational building blocks used throughout
//! the crate: window and process identifiers, the target specification,
//! privilege snapshots, strategy outcomes, OS versions and error types.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    ErrorCode, HideStep, NotApplicableReason, OsError, OsVersion, PrivilegeState, ProcessId,
    ProcessName, StrategyOutcome, TargetSpec, VeilError, VeilResult, WindowEntry, WindowHandle,
    WindowRect,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

// GetWindowLongPtrW/SetWindowLongPtrW are only exported for 64-bit targets
#[cfg(all(windows, not(target_pointer_width = "64")))]
compile_error!("Capture-Veil requires 64-bit architecture on Windows");
