//! NTDLL.dll bindings for the OS version query

use crate::core::types::OsVersion;
use std::mem;
use winapi::shared::minwindef::DWORD;
use winapi::shared::ntdef::NTSTATUS;
use winapi::um::winnt::OSVERSIONINFOW;

pub const STATUS_SUCCESS: NTSTATUS = 0x00000000;

// GetVersionEx lies to unmanifested binaries; RtlGetVersion does not
#[link(name = "ntdll")]
extern "system" {
    fn RtlGetVersion(version_information: *mut OSVERSIONINFOW) -> NTSTATUS;
}

/// Check if NTSTATUS indicates success
pub fn nt_success(status: NTSTATUS) -> bool {
    status >= 0
}

/// Running Windows version as `major.minor.build`
pub fn rtl_get_version() -> Option<OsVersion> {
    unsafe {
        let mut info: OSVERSIONINFOW = mem::zeroed();
        info.dwOSVersionInfoSize = mem::size_of::<OSVERSIONINFOW>() as DWORD;

        if !nt_success(RtlGetVersion(&mut info)) {
            return None;
        }

        Some(OsVersion::new(
            info.dwMajorVersion,
            info.dwMinorVersion,
            info.dwBuildNumber,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nt_success() {
        assert!(nt_success(STATUS_SUCCESS));
        assert!(nt_success(1));
        assert!(!nt_success(0xC0000022_u32 as i32));
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_rtl_get_version() {
        let version = rtl_get_version().unwrap();
        assert!(version.major >= 6);
        assert!(version.build > 0);
    }
}
