//! Privilege checks performed before scanning

use super::ElevationPolicy;
use crate::core::types::{ErrorCode, PrivilegeState, VeilError, VeilResult};
use crate::system::TokenQuery;
use tracing::{debug, info, warn};

/// Name of the debug privilege on the access token
pub const DEBUG_PRIVILEGE: &str = "SeDebugPrivilege";

/// Consults the access token of the current process
pub struct PrivilegeGate<T> {
    token: T,
}

impl<T: TokenQuery> PrivilegeGate<T> {
    pub fn new(token: T) -> Self {
        PrivilegeGate { token }
    }

    /// Check if the current process is running as administrator
    ///
    /// Fails closed: any query failure reads as "not elevated".
    pub fn is_elevated(&self) -> bool {
        match self.token.is_elevated() {
            Ok(elevated) => elevated,
            Err(e) => {
                debug!("Elevation query failed, assuming not elevated: {}", e);
                false
            }
        }
    }

    /// Enable SeDebugPrivilege for the current process
    ///
    /// Success does not grant rights over other processes' windows; it is
    /// reported for information only.
    pub fn enable_debug_privilege(&self) -> Result<(), ErrorCode> {
        self.token
            .enable_privilege(DEBUG_PRIVILEGE)
            .map_err(|e| e.code)
    }

    /// Snapshot without touching the token's privileges
    pub fn snapshot(&self) -> PrivilegeState {
        PrivilegeState {
            elevated: self.is_elevated(),
            debug_privilege: false,
        }
    }

    /// Startup sequence: elevation check, policy enforcement, then the
    /// optional debug-privilege request
    pub fn check(&self, policy: ElevationPolicy, enable_debug: bool) -> VeilResult<PrivilegeState> {
        let mut state = self.snapshot();
        info!("Running as administrator: {}", state.elevated);

        if !state.elevated {
            match policy {
                ElevationPolicy::Require => {
                    warn!("Administrator privileges required, refusing to start");
                    return Err(VeilError::ElevationRequired);
                }
                ElevationPolicy::Warn => warn!(
                    "Not running as administrator, windows of elevated processes stay visible"
                ),
                ElevationPolicy::Ignore => {}
            }
        }

        if enable_debug {
            match self.enable_debug_privilege() {
                Ok(()) => {
                    info!("{} enabled", DEBUG_PRIVILEGE);
                    state.debug_privilege = true;
                }
                Err(code) => warn!("Debug privileges not enabled (Error {})", code.code()),
            }
        }

        Ok(state)
    }
}
