//! Window enumeration over the windowing subsystem

use crate::core::types::{WindowEntry, WindowHandle};
use crate::system::WindowSystem;
use serde::{Deserialize, Serialize};
use std::vec::IntoIter;
use tracing::trace;

/// Which windows an enumeration pass yields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationFilter {
    /// Skip windows that are not currently visible
    pub visible_only: bool,
    /// Skip windows that do not accept input
    pub enabled_only: bool,
    /// Skip windows whose screen rectangle covers no pixels
    pub skip_empty: bool,
}

impl Default for EnumerationFilter {
    fn default() -> Self {
        EnumerationFilter {
            visible_only: true,
            enabled_only: false,
            skip_empty: false,
        }
    }
}

/// Produces fresh window sequences on demand
pub struct WindowEnumerator<'a, W: ?Sized> {
    system: &'a W,
    filter: EnumerationFilter,
}

impl<'a, W: WindowSystem + ?Sized> WindowEnumerator<'a, W> {
    /// Create a new window enumerator
    pub fn new(system: &'a W, filter: EnumerationFilter) -> Self {
        WindowEnumerator { system, filter }
    }

    /// Start a new pass over the windows currently known to the OS
    ///
    /// Each call takes its own snapshot of handles; validity, visibility
    /// and ownership are checked lazily as the iterator advances.
    pub fn windows(&self) -> WindowIter<'a, W> {
        WindowIter {
            system: self.system,
            filter: self.filter,
            handles: self.system.top_level_windows().into_iter(),
        }
    }
}

/// Lazy sequence of `(window, owner)` pairs for one pass
pub struct WindowIter<'a, W: ?Sized> {
    system: &'a W,
    filter: EnumerationFilter,
    handles: IntoIter<WindowHandle>,
}

impl<'a, W: WindowSystem + ?Sized> WindowIter<'a, W> {
    fn admit(&self, handle: WindowHandle) -> Option<WindowEntry> {
        if !self.system.is_window(handle) {
            trace!("Window {} vanished during enumeration", handle);
            return None;
        }
        if self.filter.visible_only && !self.system.is_window_visible(handle) {
            return None;
        }
        if self.filter.enabled_only && !self.system.is_window_enabled(handle) {
            return None;
        }
        if self.filter.skip_empty {
            let has_area = self
                .system
                .window_rect(handle)
                .is_some_and(|rect| !rect.is_empty());
            if !has_area {
                return None;
            }
        }
        match self.system.window_process_id(handle) {
            Some(pid) if pid != 0 => Some(WindowEntry::new(handle, pid)),
            _ => None,
        }
    }
}

impl<'a, W: WindowSystem + ?Sized> Iterator for WindowIter<'a, W> {
    type Item = WindowEntry;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.handles.next() {
            if let Some(entry) = self.admit(handle) {
                return Some(entry);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.handles.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::SimulatedDesktop;

    #[test]
    fn test_visible_only_by_default() {
        let desktop = SimulatedDesktop::new(1);
        let shown = desktop.add_window(10);
        desktop.add_hidden_window(10);

        let enumerator = WindowEnumerator::new(&desktop, EnumerationFilter::default());
        let entries: Vec<_> = enumerator.windows().collect();
        assert_eq!(entries, vec![WindowEntry::new(shown, 10)]);
    }

    #[test]
    fn test_include_hidden_windows() {
        let desktop = SimulatedDesktop::new(1);
        desktop.add_window(10);
        desktop.add_hidden_window(10);

        let filter = EnumerationFilter {
            visible_only: false,
            ..Default::default()
        };
        assert_eq!(WindowEnumerator::new(&desktop, filter).windows().count(), 2);
    }

    #[test]
    fn test_disabled_and_empty_windows() {
        use crate::core::types::WindowRect;

        let desktop = SimulatedDesktop::new(1);
        let normal = desktop.add_window(10);
        let disabled = desktop.add_window(10);
        let collapsed = desktop.add_window(10);
        desktop.set_window_enabled(disabled, false);
        desktop.set_window_rect(collapsed, WindowRect::new(40, 40, 40, 300));

        let everything = WindowEnumerator::new(&desktop, EnumerationFilter::default());
        assert_eq!(everything.windows().count(), 3);

        let filter = EnumerationFilter {
            enabled_only: true,
            skip_empty: true,
            ..Default::default()
        };
        let handles: Vec<_> = WindowEnumerator::new(&desktop, filter)
            .windows()
            .map(|e| e.handle)
            .collect();
        assert_eq!(handles, vec![normal]);
    }

    #[test]
    fn test_destroyed_mid_enumeration_is_skipped() {
        let desktop = SimulatedDesktop::new(1);
        let first = desktop.add_window(10);
        let doomed = desktop.add_window(20);
        let last = desktop.add_window(30);

        let enumerator = WindowEnumerator::new(&desktop, EnumerationFilter::default());
        let mut pass = enumerator.windows();
        assert_eq!(pass.next().map(|e| e.handle), Some(first));

        desktop.destroy_window(doomed);
        assert_eq!(pass.next().map(|e| e.handle), Some(last));
        assert_eq!(pass.next(), None);
    }

    #[test]
    fn test_each_pass_is_fresh() {
        let desktop = SimulatedDesktop::new(1);
        desktop.add_window(10);

        let enumerator = WindowEnumerator::new(&desktop, EnumerationFilter::default());
        assert_eq!(enumerator.windows().count(), 1);

        desktop.add_window(11);
        assert_eq!(enumerator.windows().count(), 2);
    }

    #[test]
    fn test_empty_desktop() {
        let desktop = SimulatedDesktop::new(1);
        let enumerator = WindowEnumerator::new(&desktop, EnumerationFilter::default());
        assert_eq!(enumerator.windows().next(), None);
    }
}
