//! Win32 error codes reported by capability calls

use serde::{Serialize, Serializer};
use std::fmt;

const ERROR_PRIVILEGE_NOT_HELD: u32 = 1314;

/// Common Windows error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success,
    AccessDenied,
    InvalidHandle,
    InvalidParameter,
    NotAllAssigned,
    InvalidWindowHandle,
    Unknown(u32),
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        match code {
            0 => ErrorCode::Success,
            5 => ErrorCode::AccessDenied,
            6 => ErrorCode::InvalidHandle,
            87 => ErrorCode::InvalidParameter,
            1300 => ErrorCode::NotAllAssigned,
            1400 => ErrorCode::InvalidWindowHandle,
            _ => ErrorCode::Unknown(code),
        }
    }
}

impl ErrorCode {
    /// Raw numeric value as returned by `GetLastError`
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::Success => 0,
            ErrorCode::AccessDenied => 5,
            ErrorCode::InvalidHandle => 6,
            ErrorCode::InvalidParameter => 87,
            ErrorCode::NotAllAssigned => 1300,
            ErrorCode::InvalidWindowHandle => 1400,
            ErrorCode::Unknown(code) => *code,
        }
    }

    /// True when the OS refused the caller's rights rather than the request
    ///
    /// Covers plain access denial, which is also what UIPI reports for a
    /// window of a more privileged process, and missing token privileges.
    pub fn is_access_refusal(&self) -> bool {
        matches!(
            self,
            ErrorCode::AccessDenied
                | ErrorCode::NotAllAssigned
                | ErrorCode::Unknown(ERROR_PRIVILEGE_NOT_HELD)
        )
    }

    /// True when the code says the window itself is gone
    pub fn is_vanished_window(&self) -> bool {
        matches!(self, ErrorCode::InvalidWindowHandle)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Success => write!(f, "Success"),
            ErrorCode::AccessDenied => write!(f, "Access denied (5)"),
            ErrorCode::InvalidHandle => write!(f, "Invalid handle (6)"),
            ErrorCode::InvalidParameter => write!(f, "Invalid parameter (87)"),
            ErrorCode::NotAllAssigned => write!(f, "Not all privileges assigned (1300)"),
            ErrorCode::InvalidWindowHandle => write!(f, "Invalid window handle (1400)"),
            ErrorCode::Unknown(code) => write!(f, "Unknown error: {}", code),
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_conversion() {
        assert_eq!(ErrorCode::from(0), ErrorCode::Success);
        assert_eq!(ErrorCode::from(5), ErrorCode::AccessDenied);
        assert_eq!(ErrorCode::from(1400), ErrorCode::InvalidWindowHandle);
        assert_eq!(ErrorCode::from(999), ErrorCode::Unknown(999));
    }

    #[test]
    fn test_error_code_round_trips_raw_value() {
        for raw in [0u32, 5, 6, 87, 1300, 1400, 8, 50] {
            assert_eq!(ErrorCode::from(raw).code(), raw);
        }
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "Success");
        assert_eq!(format!("{}", ErrorCode::AccessDenied), "Access denied (5)");
        assert_eq!(format!("{}", ErrorCode::Unknown(123)), "Unknown error: 123");
    }

    #[test]
    fn test_access_refusal() {
        assert!(ErrorCode::AccessDenied.is_access_refusal());
        assert!(ErrorCode::NotAllAssigned.is_access_refusal());
        assert!(ErrorCode::from(1314).is_access_refusal());
        assert!(!ErrorCode::InvalidParameter.is_access_refusal());
        assert!(!ErrorCode::InvalidWindowHandle.is_access_refusal());
    }

    #[test]
    fn test_vanished_window() {
        assert!(ErrorCode::InvalidWindowHandle.is_vanished_window());
        assert!(!ErrorCode::AccessDenied.is_vanished_window());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::AccessDenied).unwrap();
        assert_eq!(json, "5");
    }
}
