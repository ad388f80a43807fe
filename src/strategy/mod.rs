//! Hiding strategies
//!
//! Each strategy mutates OS-level attributes of a single window and
//! reports what happened. Strategies hold only their configuration and
//! never touch monitor state.

pub mod capture_exclusion;
pub mod kind;
pub mod probe;
pub mod transparency;

pub use capture_exclusion::CaptureExclusion;
pub use kind::StrategyKind;
pub use probe::{compare_strategies, ProbeResult};
pub use transparency::TransparencyGhost;

use crate::core::types::{StrategyOutcome, WindowHandle};
use crate::system::WindowSystem;

/// A technique for hiding a window from screen capture
pub trait HidingStrategy {
    /// Which technique this is
    fn kind(&self) -> StrategyKind;

    /// Attempt the technique on one window
    fn apply(&self, system: &dyn WindowSystem, window: WindowHandle) -> StrategyOutcome;
}

impl<S: HidingStrategy + ?Sized> HidingStrategy for Box<S> {
    fn kind(&self) -> StrategyKind {
        (**self).kind()
    }

    fn apply(&self, system: &dyn WindowSystem, window: WindowHandle) -> StrategyOutcome {
        (**self).apply(system, window)
    }
}
