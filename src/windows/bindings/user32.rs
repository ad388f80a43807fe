//! User32.dll bindings for top-level window operations

use crate::core::types::{OsError, ProcessId, WindowHandle, WindowRect};
use crate::windows::utils::error_codes::{clear_last_error, last_error, last_os_error};
use winapi::shared::minwindef::{BOOL, DWORD, FALSE, LPARAM, TRUE};
use winapi::shared::windef::{HWND, RECT};
use winapi::um::winuser::{
    EnumWindows, GetWindowLongPtrW, GetWindowRect, GetWindowThreadProcessId, IsWindow,
    IsWindowEnabled, IsWindowVisible, SetLayeredWindowAttributes, SetWindowLongPtrW, SetWindowPos,
    GWL_EXSTYLE, LWA_ALPHA, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER,
};

/// Display affinity that keeps a window out of every capture API
pub const WDA_EXCLUDEFROMCAPTURE: DWORD = 0x0000_0011;

// WDA_EXCLUDEFROMCAPTURE is rejected with ERROR_INVALID_PARAMETER before 10.0.19041
#[link(name = "user32")]
extern "system" {
    fn SetWindowDisplayAffinity(hwnd: HWND, affinity: DWORD) -> BOOL;
}

fn hwnd(window: WindowHandle) -> HWND {
    window.raw() as HWND
}

unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let handles = &mut *(lparam as *mut Vec<WindowHandle>);
    handles.push(WindowHandle::new(hwnd as isize));
    TRUE
}

/// Snapshot every top-level window handle
///
/// A failed enumeration yields whatever was collected before the failure.
pub fn enum_windows() -> Vec<WindowHandle> {
    let mut handles: Vec<WindowHandle> = Vec::new();
    unsafe {
        EnumWindows(
            Some(collect_window),
            &mut handles as *mut Vec<WindowHandle> as LPARAM,
        );
    }
    handles
}

pub fn is_window(window: WindowHandle) -> bool {
    unsafe { IsWindow(hwnd(window)) != FALSE }
}

pub fn is_window_visible(window: WindowHandle) -> bool {
    unsafe { IsWindowVisible(hwnd(window)) != FALSE }
}

pub fn is_window_enabled(window: WindowHandle) -> bool {
    unsafe { IsWindowEnabled(hwnd(window)) != FALSE }
}

/// Screen rectangle; `None` when the window is already gone
pub fn window_rect(window: WindowHandle) -> Option<WindowRect> {
    let mut rect = RECT {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };
    if unsafe { GetWindowRect(hwnd(window), &mut rect) } == FALSE {
        return None;
    }
    Some(WindowRect::new(rect.left, rect.top, rect.right, rect.bottom))
}

/// Owning process id; `None` when the window is already gone
pub fn window_process_id(window: WindowHandle) -> Option<ProcessId> {
    let mut pid: DWORD = 0;
    let thread_id = unsafe { GetWindowThreadProcessId(hwnd(window), &mut pid) };
    if thread_id == 0 {
        None
    } else {
        Some(pid)
    }
}

/// Read `GWL_EXSTYLE`
pub fn get_extended_style(window: WindowHandle) -> Result<u32, OsError> {
    unsafe {
        clear_last_error();
        let style = GetWindowLongPtrW(hwnd(window), GWL_EXSTYLE);
        if style == 0 && last_error().code() != 0 {
            return Err(last_os_error("GetWindowLongPtrW"));
        }
        Ok(style as u32)
    }
}

/// Write `GWL_EXSTYLE`
pub fn set_extended_style(window: WindowHandle, style: u32) -> Result<(), OsError> {
    unsafe {
        // A zero return is also the legitimate previous value of an unstyled window
        clear_last_error();
        let previous = SetWindowLongPtrW(hwnd(window), GWL_EXSTYLE, style as isize);
        if previous == 0 && last_error().code() != 0 {
            return Err(last_os_error("SetWindowLongPtrW"));
        }
        Ok(())
    }
}

/// `SetWindowDisplayAffinity(WDA_EXCLUDEFROMCAPTURE)`
pub fn exclude_from_capture(window: WindowHandle) -> Result<(), OsError> {
    unsafe {
        if SetWindowDisplayAffinity(hwnd(window), WDA_EXCLUDEFROMCAPTURE) == FALSE {
            return Err(last_os_error("SetWindowDisplayAffinity"));
        }
    }
    Ok(())
}

/// Set a layered window's constant alpha
pub fn set_layered_alpha(window: WindowHandle, alpha: u8) -> Result<(), OsError> {
    unsafe {
        if SetLayeredWindowAttributes(hwnd(window), 0, alpha, LWA_ALPHA) == FALSE {
            return Err(last_os_error("SetLayeredWindowAttributes"));
        }
    }
    Ok(())
}

/// Re-apply the frame so style changes take effect
pub fn refresh_frame(window: WindowHandle) -> Result<(), OsError> {
    let flags = SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED;
    unsafe {
        if SetWindowPos(hwnd(window), std::ptr::null_mut(), 0, 0, 0, 0, flags) == FALSE {
            return Err(last_os_error("SetWindowPos"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_enum_windows_returns_live_handles() {
        // Headless sessions may have no windows at all
        for handle in enum_windows().into_iter().take(16) {
            assert!(!handle.is_null());
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_null_window_is_not_a_window() {
        let null = WindowHandle::new(0);
        assert!(!is_window(null));
        assert_eq!(window_process_id(null), None);
        assert_eq!(window_rect(null), None);
        assert!(exclude_from_capture(null).is_err());
    }
}
