//! Windows privilege management

pub mod gate;
pub mod policy;

pub use gate::{PrivilegeGate, DEBUG_PRIVILEGE};
pub use policy::ElevationPolicy;
