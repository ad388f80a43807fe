//! In-memory desktop used by `--dry-run` and the test suite
//!
//! The simulation enforces the same ownership boundary as Windows: window
//! attributes can only be changed for windows owned by the simulated
//! current process. Everything else fails with `ERROR_ACCESS_DENIED`.

use super::{ProcessQuery, TokenQuery, WindowSystem, WS_EX_LAYERED};
use crate::core::types::{ErrorCode, OsError, OsVersion, ProcessId, WindowHandle, WindowRect};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

const ERROR_NO_SUCH_PRIVILEGE: u32 = 1313;
const DEBUG_PRIVILEGE: &str = "SeDebugPrivilege";

/// Pid of the simulated current process on the demo desktop; distinct from
/// every pid the demo assigns to other processes
pub const DEMO_SELF_PID: ProcessId = 7100;

/// Where new simulated windows appear
pub const DEFAULT_WINDOW_RECT: WindowRect = WindowRect::new(100, 100, 900, 700);

/// A simulated top-level window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimWindow {
    pub handle: WindowHandle,
    pub pid: ProcessId,
    pub visible: bool,
    pub enabled: bool,
    pub rect: WindowRect,
    pub ex_style: u32,
    pub alpha: u8,
    pub capture_excluded: bool,
    pub redraws: u32,
}

#[derive(Debug)]
struct DesktopState {
    self_pid: ProcessId,
    next_handle: isize,
    windows: Vec<SimWindow>,
    processes: HashMap<ProcessId, String>,
    protected: HashSet<ProcessId>,
    exit_on_lookup: HashSet<ProcessId>,
    os_version: Option<OsVersion>,
    elevated: bool,
    token_broken: bool,
    enabled_privileges: HashSet<String>,
    foreign_exclusion_anomaly: bool,
    faults: HashMap<&'static str, ErrorCode>,
    calls: Vec<(&'static str, WindowHandle)>,
}

/// Thread-safe simulated desktop
#[derive(Debug)]
pub struct SimulatedDesktop {
    state: Mutex<DesktopState>,
}

impl SimulatedDesktop {
    /// Empty desktop whose "current process" is `self_pid`
    pub fn new(self_pid: ProcessId) -> Self {
        let mut processes = HashMap::new();
        processes.insert(
            self_pid,
            "C:\\Tools\\capture-veil\\capture-veil.exe".to_string(),
        );

        SimulatedDesktop {
            state: Mutex::new(DesktopState {
                self_pid,
                next_handle: 0x10010,
                windows: Vec::new(),
                processes,
                protected: HashSet::new(),
                exit_on_lookup: HashSet::new(),
                os_version: Some(OsVersion::new(10, 0, 22631)),
                elevated: false,
                token_broken: false,
                enabled_privileges: HashSet::new(),
                foreign_exclusion_anomaly: false,
                faults: HashMap::new(),
                calls: Vec::new(),
            }),
        }
    }

    /// A small desktop with a few unrelated windows and two windows owned
    /// by a separate process running `target`
    pub fn demo(target: &str) -> Self {
        let desktop = Self::new(DEMO_SELF_PID);

        desktop.add_process(1204, "C:\\Windows\\explorer.exe");
        desktop.add_window(1204);
        desktop.add_window(1204);
        desktop.add_hidden_window(1204);

        desktop.add_process(3380, "C:\\Windows\\System32\\notepad.exe");
        desktop.add_window(3380);

        desktop.add_process(4242, &format!("C:\\Program Files\\Target\\{}", target));
        desktop.add_window(4242);
        desktop.add_window(4242);
        desktop.add_hidden_window(4242);

        desktop.add_protected_process(4, "System");
        desktop
    }

    fn state(&self) -> MutexGuard<'_, DesktopState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The simulated current process
    pub fn self_pid(&self) -> ProcessId {
        self.state().self_pid
    }

    /// Register a running process with its image path
    pub fn add_process(&self, pid: ProcessId, image_path: &str) {
        self.state().processes.insert(pid, image_path.to_string());
    }

    /// Register a process whose image path cannot be queried
    pub fn add_protected_process(&self, pid: ProcessId, image_path: &str) {
        let mut state = self.state();
        state.processes.insert(pid, image_path.to_string());
        state.protected.insert(pid);
    }

    /// Open a visible window owned by `pid`
    pub fn add_window(&self, pid: ProcessId) -> WindowHandle {
        self.insert_window(pid, true)
    }

    /// Open an invisible window owned by `pid`
    pub fn add_hidden_window(&self, pid: ProcessId) -> WindowHandle {
        self.insert_window(pid, false)
    }

    fn insert_window(&self, pid: ProcessId, visible: bool) -> WindowHandle {
        let mut state = self.state();
        let handle = WindowHandle::new(state.next_handle);
        state.next_handle += 0x10;
        state.windows.push(SimWindow {
            handle,
            pid,
            visible,
            enabled: true,
            rect: DEFAULT_WINDOW_RECT,
            ex_style: 0,
            alpha: 255,
            capture_excluded: false,
            redraws: 0,
        });
        handle
    }

    /// Enable or disable input to a window
    pub fn set_window_enabled(&self, window: WindowHandle, enabled: bool) {
        if let Some(entry) = self.state().windows.iter_mut().find(|w| w.handle == window) {
            entry.enabled = enabled;
        }
    }

    /// Move or resize a window
    pub fn set_window_rect(&self, window: WindowHandle, rect: WindowRect) {
        if let Some(entry) = self.state().windows.iter_mut().find(|w| w.handle == window) {
            entry.rect = rect;
        }
    }

    /// Destroy a window; later lookups see an invalid handle
    pub fn destroy_window(&self, window: WindowHandle) {
        self.state().windows.retain(|w| w.handle != window);
    }

    /// Terminate a process and destroy its windows
    pub fn exit_process(&self, pid: ProcessId) {
        let mut state = self.state();
        state.processes.remove(&pid);
        state.windows.retain(|w| w.pid != pid);
    }

    /// Make `pid` exit right after the owner of one of its windows is read,
    /// leaving the window entry already handed out with a dead process id
    pub fn exit_after_owner_lookup(&self, pid: ProcessId) {
        self.state().exit_on_lookup.insert(pid);
    }

    pub fn set_os_version(&self, version: Option<OsVersion>) {
        self.state().os_version = version;
    }

    pub fn set_elevated(&self, elevated: bool) {
        self.state().elevated = elevated;
    }

    /// Make every token query fail with `ERROR_ACCESS_DENIED`
    pub fn break_token(&self) {
        self.state().token_broken = true;
    }

    /// Let capture exclusion succeed on windows of other processes
    pub fn allow_foreign_capture_exclusion(&self, allow: bool) {
        self.state().foreign_exclusion_anomaly = allow;
    }

    /// Make the next mutating call named `operation` fail with `code`,
    /// whoever owns the window
    pub fn fail_next(&self, operation: &'static str, code: impl Into<ErrorCode>) {
        self.state().faults.insert(operation, code.into());
    }

    /// Current state of a window, if it still exists
    pub fn window(&self, window: WindowHandle) -> Option<SimWindow> {
        self.state()
            .windows
            .iter()
            .find(|w| w.handle == window)
            .cloned()
    }

    pub fn privilege_enabled(&self, name: &str) -> bool {
        self.state().enabled_privileges.contains(name)
    }

    /// Mutating calls made so far, in order
    pub fn calls(&self) -> Vec<(&'static str, WindowHandle)> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Look up an existing window owned by the current process for mutation
    fn with_owned_window<T>(
        &self,
        operation: &'static str,
        window: WindowHandle,
        mutate: impl FnOnce(&mut SimWindow, &DesktopSnapshot) -> Result<T, OsError>,
    ) -> Result<T, OsError> {
        let mut state = self.state();
        state.calls.push((operation, window));
        if let Some(code) = state.faults.remove(operation) {
            return Err(OsError::new(operation, code));
        }

        let snapshot = DesktopSnapshot {
            self_pid: state.self_pid,
            os_version: state.os_version,
            foreign_exclusion_anomaly: state.foreign_exclusion_anomaly,
        };
        let entry = state
            .windows
            .iter_mut()
            .find(|w| w.handle == window)
            .ok_or_else(|| OsError::new(operation, ErrorCode::InvalidWindowHandle))?;

        mutate(entry, &snapshot)
    }
}

/// Read-only desktop facts needed while a window is borrowed mutably
struct DesktopSnapshot {
    self_pid: ProcessId,
    os_version: Option<OsVersion>,
    foreign_exclusion_anomaly: bool,
}

impl Default for SimulatedDesktop {
    fn default() -> Self {
        Self::new(std::process::id())
    }
}

impl WindowSystem for SimulatedDesktop {
    fn top_level_windows(&self) -> Vec<WindowHandle> {
        self.state().windows.iter().map(|w| w.handle).collect()
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        self.state().windows.iter().any(|w| w.handle == window)
    }

    fn is_window_visible(&self, window: WindowHandle) -> bool {
        self.state()
            .windows
            .iter()
            .any(|w| w.handle == window && w.visible)
    }

    fn is_window_enabled(&self, window: WindowHandle) -> bool {
        self.state()
            .windows
            .iter()
            .any(|w| w.handle == window && w.enabled)
    }

    fn window_rect(&self, window: WindowHandle) -> Option<WindowRect> {
        self.state()
            .windows
            .iter()
            .find(|w| w.handle == window)
            .map(|w| w.rect)
    }

    fn window_process_id(&self, window: WindowHandle) -> Option<ProcessId> {
        let mut state = self.state();
        let pid = state.windows.iter().find(|w| w.handle == window)?.pid;

        if state.exit_on_lookup.remove(&pid) {
            state.processes.remove(&pid);
        }
        Some(pid)
    }

    fn extended_style(&self, window: WindowHandle) -> Result<u32, OsError> {
        self.state()
            .windows
            .iter()
            .find(|w| w.handle == window)
            .map(|w| w.ex_style)
            .ok_or_else(|| OsError::new("GetWindowLongPtrW", ErrorCode::InvalidWindowHandle))
    }

    fn set_extended_style(&self, window: WindowHandle, style: u32) -> Result<(), OsError> {
        self.with_owned_window("SetWindowLongPtrW", window, |entry, desktop| {
            if entry.pid != desktop.self_pid {
                return Err(OsError::access_denied("SetWindowLongPtrW"));
            }
            entry.ex_style = style;
            Ok(())
        })
    }

    fn set_capture_exclusion(&self, window: WindowHandle) -> Result<(), OsError> {
        self.with_owned_window("SetWindowDisplayAffinity", window, |entry, desktop| {
            let supported = desktop
                .os_version
                .is_some_and(|v| v.at_least(&OsVersion::WINDOWS_10_2004));
            if !supported {
                return Err(OsError::new(
                    "SetWindowDisplayAffinity",
                    ErrorCode::InvalidParameter,
                ));
            }
            if entry.pid != desktop.self_pid && !desktop.foreign_exclusion_anomaly {
                return Err(OsError::access_denied("SetWindowDisplayAffinity"));
            }
            entry.capture_excluded = true;
            Ok(())
        })
    }

    fn set_alpha(&self, window: WindowHandle, alpha: u8) -> Result<(), OsError> {
        self.with_owned_window("SetLayeredWindowAttributes", window, |entry, desktop| {
            if entry.pid != desktop.self_pid {
                return Err(OsError::access_denied("SetLayeredWindowAttributes"));
            }
            if entry.ex_style & WS_EX_LAYERED == 0 {
                return Err(OsError::new(
                    "SetLayeredWindowAttributes",
                    ErrorCode::InvalidParameter,
                ));
            }
            entry.alpha = alpha;
            Ok(())
        })
    }

    fn refresh_frame(&self, window: WindowHandle) -> Result<(), OsError> {
        self.with_owned_window("SetWindowPos", window, |entry, _| {
            entry.redraws += 1;
            Ok(())
        })
    }

    fn os_version(&self) -> Option<OsVersion> {
        self.state().os_version
    }
}

impl ProcessQuery for SimulatedDesktop {
    fn image_path(&self, pid: ProcessId) -> Result<String, OsError> {
        let state = self.state();
        if state.protected.contains(&pid) {
            return Err(OsError::access_denied("OpenProcess"));
        }
        state
            .processes
            .get(&pid)
            .cloned()
            .ok_or_else(|| OsError::new("OpenProcess", ErrorCode::InvalidParameter))
    }
}

impl TokenQuery for SimulatedDesktop {
    fn is_elevated(&self) -> Result<bool, OsError> {
        let state = self.state();
        if state.token_broken {
            return Err(OsError::access_denied("OpenProcessToken"));
        }
        Ok(state.elevated)
    }

    fn enable_privilege(&self, name: &str) -> Result<(), OsError> {
        let mut state = self.state();
        if state.token_broken {
            return Err(OsError::access_denied("OpenProcessToken"));
        }
        if name != DEBUG_PRIVILEGE {
            return Err(OsError::new("LookupPrivilegeValueW", ERROR_NO_SUCH_PRIVILEGE));
        }
        if !state.elevated {
            return Err(OsError::new(
                "AdjustTokenPrivileges",
                ErrorCode::NotAllAssigned,
            ));
        }
        state.enabled_privileges.insert(name.to_string());
        Ok(())
    }
}
