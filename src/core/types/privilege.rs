//! Privilege snapshot of the current process

use serde::Serialize;
use std::fmt;

/// Elevation and debug-privilege state, re-queried at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrivilegeState {
    /// Token is elevated (running as administrator)
    pub elevated: bool,
    /// `SeDebugPrivilege` was enabled on the token
    pub debug_privilege: bool,
}

impl fmt::Display for PrivilegeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "elevated={}, debug_privilege={}",
            self.elevated, self.debug_privilege
        )
    }
}
