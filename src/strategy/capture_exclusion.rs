//! Exclusion from screen capture via display affinity

use super::{HidingStrategy, StrategyKind};
use crate::core::types::{HideStep, NotApplicableReason, OsVersion, StrategyOutcome, WindowHandle};
use crate::system::WindowSystem;

/// Marks a window with `WDA_EXCLUDEFROMCAPTURE`
///
/// Only windows owned by the calling process can be marked; for any other
/// window the OS refuses and the outcome is `Denied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureExclusion {
    min_os_version: OsVersion,
}

impl CaptureExclusion {
    pub fn new(min_os_version: OsVersion) -> Self {
        CaptureExclusion { min_os_version }
    }

    pub fn min_os_version(&self) -> OsVersion {
        self.min_os_version
    }

    fn supported(&self, system: &dyn WindowSystem) -> Result<(), NotApplicableReason> {
        match system.os_version() {
            Some(found) if found.at_least(&self.min_os_version) => Ok(()),
            Some(found) => Err(NotApplicableReason::OsVersionTooOld {
                found,
                required: self.min_os_version,
            }),
            None => Err(NotApplicableReason::OsVersionUnknown),
        }
    }
}

impl Default for CaptureExclusion {
    fn default() -> Self {
        Self::new(OsVersion::WINDOWS_10_2004)
    }
}

impl HidingStrategy for CaptureExclusion {
    fn kind(&self) -> StrategyKind {
        StrategyKind::CaptureExclusion
    }

    fn apply(&self, system: &dyn WindowSystem, window: WindowHandle) -> StrategyOutcome {
        if let Err(reason) = self.supported(system) {
            return StrategyOutcome::NotApplicable(reason);
        }

        match system.set_capture_exclusion(window) {
            Ok(()) => StrategyOutcome::Applied,
            Err(e) => StrategyOutcome::from_os_error(HideStep::CaptureExclusion, e),
        }
    }
}
