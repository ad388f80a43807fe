//! Side-by-side comparison of strategies on the same window

use super::{HidingStrategy, StrategyKind};
use crate::core::types::{StrategyOutcome, WindowHandle};
use crate::system::WindowSystem;
use serde::Serialize;

/// Outcome of one strategy during a probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub strategy: StrategyKind,
    pub outcome: StrategyOutcome,
}

/// Apply every strategy once to `window`, in order
pub fn compare_strategies(
    system: &dyn WindowSystem,
    window: WindowHandle,
    strategies: &[Box<dyn HidingStrategy>],
) -> Vec<ProbeResult> {
    strategies
        .iter()
        .map(|strategy| ProbeResult {
            strategy: strategy.kind(),
            outcome: strategy.apply(system, window),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{CaptureExclusion, TransparencyGhost};
    use crate::system::SimulatedDesktop;

    fn both() -> Vec<Box<dyn HidingStrategy>> {
        vec![
            Box::new(CaptureExclusion::default()),
            Box::new(TransparencyGhost::default()),
        ]
    }

    #[test]
    fn test_foreign_window_denied_by_both() {
        let desktop = SimulatedDesktop::new(1);
        let window = desktop.add_window(2);

        let results = compare_strategies(&desktop, window, &both());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].strategy, StrategyKind::CaptureExclusion);
        assert_eq!(results[1].strategy, StrategyKind::TransparencyGhost);
        assert!(results
            .iter()
            .all(|r| matches!(r.outcome, StrategyOutcome::Denied { .. })));
    }

    #[test]
    fn test_owned_window_applied_by_both() {
        let desktop = SimulatedDesktop::new(1);
        let window = desktop.add_window(1);

        let results = compare_strategies(&desktop, window, &both());
        assert!(results.iter().all(|r| r.outcome.is_applied()));
    }
}
