//! Win32-backed platform

use crate::core::types::{OsError, OsVersion, ProcessId, WindowHandle, WindowRect};
use crate::system::{ProcessQuery, TokenQuery, WindowSystem};
use crate::windows::bindings::{advapi32, kernel32, ntdll, user32};
use crate::windows::types::Handle;

/// The real desktop of the current session
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSystem;

impl NativeSystem {
    pub fn new() -> Self {
        NativeSystem
    }
}

impl WindowSystem for NativeSystem {
    fn top_level_windows(&self) -> Vec<WindowHandle> {
        user32::enum_windows()
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        user32::is_window(window)
    }

    fn is_window_visible(&self, window: WindowHandle) -> bool {
        user32::is_window_visible(window)
    }

    fn is_window_enabled(&self, window: WindowHandle) -> bool {
        user32::is_window_enabled(window)
    }

    fn window_rect(&self, window: WindowHandle) -> Option<WindowRect> {
        user32::window_rect(window)
    }

    fn window_process_id(&self, window: WindowHandle) -> Option<ProcessId> {
        user32::window_process_id(window)
    }

    fn extended_style(&self, window: WindowHandle) -> Result<u32, OsError> {
        user32::get_extended_style(window)
    }

    fn set_extended_style(&self, window: WindowHandle, style: u32) -> Result<(), OsError> {
        user32::set_extended_style(window, style)
    }

    fn set_capture_exclusion(&self, window: WindowHandle) -> Result<(), OsError> {
        user32::exclude_from_capture(window)
    }

    fn set_alpha(&self, window: WindowHandle, alpha: u8) -> Result<(), OsError> {
        user32::set_layered_alpha(window, alpha)
    }

    fn refresh_frame(&self, window: WindowHandle) -> Result<(), OsError> {
        user32::refresh_frame(window)
    }

    fn os_version(&self) -> Option<OsVersion> {
        ntdll::rtl_get_version()
    }
}

impl ProcessQuery for NativeSystem {
    fn image_path(&self, pid: ProcessId) -> Result<String, OsError> {
        let process = Handle::new(kernel32::open_process_query_limited(pid)?);
        unsafe { kernel32::query_full_process_image_name(process.raw()) }
    }
}

impl TokenQuery for NativeSystem {
    fn is_elevated(&self) -> Result<bool, OsError> {
        advapi32::is_token_elevated()
    }

    fn enable_privilege(&self, name: &str) -> Result<(), OsError> {
        advapi32::enable_privilege(name)
    }
}
