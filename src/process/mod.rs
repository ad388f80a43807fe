//! Process identity and privilege handling
//!
//! This module resolves process ids to executable names and consults the
//! access token of the current process before scanning starts.

pub mod privileges;
pub mod resolver;

pub use privileges::{ElevationPolicy, PrivilegeGate, DEBUG_PRIVILEGE};
pub use resolver::{base_name, ProcessResolver};
