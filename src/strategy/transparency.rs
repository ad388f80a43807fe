//! Near-zero opacity via layered windows

use super::{HidingStrategy, StrategyKind};
use crate::core::types::{HideStep, OsError, StrategyOutcome, WindowHandle};
use crate::system::{WindowSystem, WS_EX_LAYERED};

/// Default opacity: visible to nothing but still present and clickable
pub const DEFAULT_GHOST_ALPHA: u8 = 1;

/// Turns a window into a layered window with almost no opacity
///
/// Steps run in order and the first failure stops the rest:
/// layered style, alpha, frame refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransparencyGhost {
    alpha: u8,
}

impl TransparencyGhost {
    pub fn new(alpha: u8) -> Self {
        TransparencyGhost { alpha }
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    fn ghost(
        &self,
        system: &dyn WindowSystem,
        window: WindowHandle,
    ) -> Result<(), StrategyOutcome> {
        let fail = |step: HideStep| move |e: OsError| StrategyOutcome::from_os_error(step, e);

        let style = system
            .extended_style(window)
            .map_err(fail(HideStep::LayeredStyle))?;
        if style & WS_EX_LAYERED == 0 {
            system
                .set_extended_style(window, style | WS_EX_LAYERED)
                .map_err(fail(HideStep::LayeredStyle))?;
        }

        system
            .set_alpha(window, self.alpha)
            .map_err(fail(HideStep::Alpha))?;

        system
            .refresh_frame(window)
            .map_err(fail(HideStep::Redraw))?;

        Ok(())
    }
}

impl Default for TransparencyGhost {
    fn default() -> Self {
        Self::new(DEFAULT_GHOST_ALPHA)
    }
}

impl HidingStrategy for TransparencyGhost {
    fn kind(&self) -> StrategyKind {
        StrategyKind::TransparencyGhost
    }

    fn apply(&self, system: &dyn WindowSystem, window: WindowHandle) -> StrategyOutcome {
        match self.ghost(system, window) {
            Ok(()) => StrategyOutcome::Applied,
            Err(outcome) => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ErrorCode;
    use crate::system::SimulatedDesktop;

    #[test]
    fn test_owned_window_is_ghosted() {
        let desktop = SimulatedDesktop::new(1);
        let window = desktop.add_window(1);

        let outcome = TransparencyGhost::default().apply(&desktop, window);
        assert_eq!(outcome, StrategyOutcome::Applied);

        let state = desktop.window(window).unwrap();
        assert_ne!(state.ex_style & WS_EX_LAYERED, 0);
        assert_eq!(state.alpha, DEFAULT_GHOST_ALPHA);
        assert_eq!(state.redraws, 1);
    }

    #[test]
    fn test_already_layered_skips_style_write() {
        let desktop = SimulatedDesktop::new(1);
        let window = desktop.add_window(1);
        desktop.set_extended_style(window, WS_EX_LAYERED).unwrap();
        desktop.clear_calls();

        assert!(TransparencyGhost::new(10).apply(&desktop, window).is_applied());
        let ops: Vec<_> = desktop.calls().into_iter().map(|(op, _)| op).collect();
        assert_eq!(ops, vec!["SetLayeredWindowAttributes", "SetWindowPos"]);
    }

    #[test]
    fn test_foreign_window_stops_at_style_step() {
        let desktop = SimulatedDesktop::new(1);
        let window = desktop.add_window(2);

        let outcome = TransparencyGhost::default().apply(&desktop, window);
        assert_eq!(
            outcome,
            StrategyOutcome::Denied {
                step: HideStep::LayeredStyle,
                code: ErrorCode::AccessDenied
            }
        );

        let ops: Vec<_> = desktop.calls().into_iter().map(|(op, _)| op).collect();
        assert_eq!(ops, vec!["SetWindowLongPtrW"]);
        assert_eq!(desktop.window(window).unwrap().alpha, 255);
    }

    #[test]
    fn test_alpha_failure_skips_redraw() {
        let desktop = SimulatedDesktop::new(1);
        let window = desktop.add_window(1);
        desktop.fail_next("SetLayeredWindowAttributes", ErrorCode::AccessDenied);

        let outcome = TransparencyGhost::default().apply(&desktop, window);
        assert_eq!(
            outcome,
            StrategyOutcome::Denied {
                step: HideStep::Alpha,
                code: ErrorCode::AccessDenied
            }
        );

        let state = desktop.window(window).unwrap();
        assert_eq!(state.alpha, 255);
        assert_eq!(state.redraws, 0);
        let ops: Vec<_> = desktop.calls().into_iter().map(|(op, _)| op).collect();
        assert_eq!(ops, vec!["SetWindowLongPtrW", "SetLayeredWindowAttributes"]);
    }

    #[test]
    fn test_redraw_failure_tagged_redraw() {
        let desktop = SimulatedDesktop::new(1);
        let window = desktop.add_window(1);
        desktop.fail_next("SetWindowPos", ErrorCode::AccessDenied);

        let outcome = TransparencyGhost::default().apply(&desktop, window);
        assert_eq!(
            outcome,
            StrategyOutcome::Denied {
                step: HideStep::Redraw,
                code: ErrorCode::AccessDenied
            }
        );

        // Earlier steps already took effect
        let state = desktop.window(window).unwrap();
        assert_eq!(state.alpha, DEFAULT_GHOST_ALPHA);
        assert_eq!(state.redraws, 0);
    }

    #[test]
    fn test_vanished_window_is_error() {
        let desktop = SimulatedDesktop::new(1);
        let window = desktop.add_window(1);
        desktop.destroy_window(window);

        let outcome = TransparencyGhost::default().apply(&desktop, window);
        assert!(matches!(
            outcome,
            StrategyOutcome::Error {
                step: HideStep::LayeredStyle,
                ..
            }
        ));
    }
}
