//! Thread-local Win32 error state

use crate::core::types::{ErrorCode, OsError};
use winapi::um::errhandlingapi::{GetLastError, SetLastError};

/// Get the last Windows error of the calling thread
pub fn last_error() -> ErrorCode {
    unsafe { ErrorCode::from(GetLastError()) }
}

/// Reset the last error, for calls whose failure return is also a valid value
pub fn clear_last_error() {
    unsafe { SetLastError(0) }
}

/// Wrap the last Windows error for the named operation
pub fn last_os_error(operation: &'static str) -> OsError {
    OsError::new(operation, last_error())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_last_error_round_trip() {
        unsafe { SetLastError(5) };
        assert_eq!(last_error(), ErrorCode::AccessDenied);

        clear_last_error();
        assert_eq!(last_error(), ErrorCode::Success);
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_last_os_error_names_operation() {
        unsafe { SetLastError(1400) };
        let err = last_os_error("SetWindowPos");
        assert_eq!(err.operation, "SetWindowPos");
        assert!(err.code.is_vanished_window());
    }
}
