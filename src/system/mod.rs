//! OS capability interfaces
//!
//! Everything the monitor needs from the windowing, process and token
//! subsystems goes through these traits. `windows::NativeSystem` backs them
//! with Win32 calls; `SimulatedDesktop` backs them with an in-memory desktop
//! for dry runs and tests.

pub mod simulated;

pub use simulated::{SimWindow, SimulatedDesktop, DEMO_SELF_PID};

use crate::core::types::{OsError, OsVersion, ProcessId, WindowHandle, WindowRect};

/// `WS_EX_LAYERED` extended window style bit
pub const WS_EX_LAYERED: u32 = 0x0008_0000;

/// Windowing subsystem
pub trait WindowSystem {
    /// Snapshot of every top-level window handle currently known to the OS
    fn top_level_windows(&self) -> Vec<WindowHandle>;

    /// Whether the handle still identifies an existing window
    fn is_window(&self, window: WindowHandle) -> bool;

    fn is_window_visible(&self, window: WindowHandle) -> bool;

    /// Whether the window accepts mouse and keyboard input
    fn is_window_enabled(&self, window: WindowHandle) -> bool;

    /// Screen rectangle, `None` if the window is gone
    fn window_rect(&self, window: WindowHandle) -> Option<WindowRect>;

    /// Owning process of the window, `None` if it cannot be determined
    fn window_process_id(&self, window: WindowHandle) -> Option<ProcessId>;

    fn extended_style(&self, window: WindowHandle) -> Result<u32, OsError>;

    fn set_extended_style(&self, window: WindowHandle, style: u32) -> Result<(), OsError>;

    /// Exclude the window from screen capture
    fn set_capture_exclusion(&self, window: WindowHandle) -> Result<(), OsError>;

    /// Set the layered-window alpha (0 transparent, 255 opaque)
    fn set_alpha(&self, window: WindowHandle, alpha: u8) -> Result<(), OsError>;

    /// Force a frame refresh without moving, resizing or reordering
    fn refresh_frame(&self, window: WindowHandle) -> Result<(), OsError>;

    /// Running OS version, `None` if it cannot be queried
    fn os_version(&self) -> Option<OsVersion>;
}

/// Process lookup service
pub trait ProcessQuery {
    /// Full executable path of the process
    fn image_path(&self, pid: ProcessId) -> Result<String, OsError>;
}

/// Access-token subsystem of the calling process
pub trait TokenQuery {
    fn is_elevated(&self) -> Result<bool, OsError>;

    /// Enable a named privilege such as `SeDebugPrivilege`
    fn enable_privilege(&self, name: &str) -> Result<(), OsError>;
}

/// Everything the monitor consumes from the OS
pub trait Platform: WindowSystem + ProcessQuery + TokenQuery {}

impl<T: WindowSystem + ProcessQuery + TokenQuery> Platform for T {}

impl<T: WindowSystem + ?Sized> WindowSystem for &T {
    fn top_level_windows(&self) -> Vec<WindowHandle> {
        (**self).top_level_windows()
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        (**self).is_window(window)
    }

    fn is_window_visible(&self, window: WindowHandle) -> bool {
        (**self).is_window_visible(window)
    }

    fn is_window_enabled(&self, window: WindowHandle) -> bool {
        (**self).is_window_enabled(window)
    }

    fn window_rect(&self, window: WindowHandle) -> Option<WindowRect> {
        (**self).window_rect(window)
    }

    fn window_process_id(&self, window: WindowHandle) -> Option<ProcessId> {
        (**self).window_process_id(window)
    }

    fn extended_style(&self, window: WindowHandle) -> Result<u32, OsError> {
        (**self).extended_style(window)
    }

    fn set_extended_style(&self, window: WindowHandle, style: u32) -> Result<(), OsError> {
        (**self).set_extended_style(window, style)
    }

    fn set_capture_exclusion(&self, window: WindowHandle) -> Result<(), OsError> {
        (**self).set_capture_exclusion(window)
    }

    fn set_alpha(&self, window: WindowHandle, alpha: u8) -> Result<(), OsError> {
        (**self).set_alpha(window, alpha)
    }

    fn refresh_frame(&self, window: WindowHandle) -> Result<(), OsError> {
        (**self).refresh_frame(window)
    }

    fn os_version(&self) -> Option<OsVersion> {
        (**self).os_version()
    }
}

impl<T: ProcessQuery + ?Sized> ProcessQuery for &T {
    fn image_path(&self, pid: ProcessId) -> Result<String, OsError> {
        (**self).image_path(pid)
    }
}

impl<T: TokenQuery + ?Sized> TokenQuery for &T {
    fn is_elevated(&self) -> Result<bool, OsError> {
        (**self).is_elevated()
    }

    fn enable_privilege(&self, name: &str) -> Result<(), OsError> {
        (**self).enable_privilege(name)
    }
}
