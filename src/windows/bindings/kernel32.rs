//! Kernel32.dll bindings for process lookups

use crate::core::types::{OsError, ProcessId};
use crate::windows::utils::error_codes::last_os_error;
use crate::windows::utils::string_conv::wide_to_string;
use winapi::shared::minwindef::{DWORD, FALSE, MAX_PATH};
use winapi::um::handleapi::CloseHandle;
use winapi::um::processthreadsapi::OpenProcess;
use winapi::um::winbase::QueryFullProcessImageNameW;
use winapi::um::winnt::{HANDLE, PROCESS_QUERY_LIMITED_INFORMATION};

/// Long-path aware buffer size for image names
const IMAGE_PATH_CAPACITY: usize = 32 * MAX_PATH;

/// Safe wrapper for OpenProcess
pub fn open_process(pid: ProcessId, desired_access: DWORD) -> Result<HANDLE, OsError> {
    unsafe {
        let handle = OpenProcess(desired_access, FALSE, pid);
        if handle.is_null() {
            Err(last_os_error("OpenProcess"))
        } else {
            Ok(handle)
        }
    }
}

/// Open a process with the minimum right needed to read its image name
pub fn open_process_query_limited(pid: ProcessId) -> Result<HANDLE, OsError> {
    open_process(pid, PROCESS_QUERY_LIMITED_INFORMATION)
}

/// Safe wrapper for CloseHandle
///
/// # Safety
/// The handle must be a valid Windows handle
pub unsafe fn close_handle(handle: HANDLE) -> Result<(), OsError> {
    if handle.is_null() {
        return Ok(());
    }

    if CloseHandle(handle) == FALSE {
        Err(last_os_error("CloseHandle"))
    } else {
        Ok(())
    }
}

/// Full Win32 path of the process executable
///
/// # Safety
/// The handle must be a valid process handle opened with at least
/// `PROCESS_QUERY_LIMITED_INFORMATION`
pub unsafe fn query_full_process_image_name(handle: HANDLE) -> Result<String, OsError> {
    let mut buffer = vec![0u16; IMAGE_PATH_CAPACITY];
    let mut size = buffer.len() as DWORD;

    if QueryFullProcessImageNameW(handle, 0, buffer.as_mut_ptr(), &mut size) == FALSE {
        return Err(last_os_error("QueryFullProcessImageNameW"));
    }

    Ok(wide_to_string(&buffer[..size as usize]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windows::types::Handle;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_open_invalid_process() {
        assert!(open_process_query_limited(0).is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_own_image_name() {
        let handle = Handle::new(open_process_query_limited(std::process::id()).unwrap());
        let path = unsafe { query_full_process_image_name(handle.raw()) }.unwrap();
        assert!(path.to_lowercase().ends_with(".exe"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_close_null_handle() {
        unsafe {
            assert!(close_handle(std::ptr::null_mut()).is_ok());
        }
    }
}
