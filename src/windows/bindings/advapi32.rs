//! Advapi32.dll bindings for the access token of the current process

use crate::core::types::{ErrorCode, OsError};
use crate::windows::utils::error_codes::{last_error, last_os_error};
use crate::windows::utils::string_conv::string_to_wide;
use std::mem;
use winapi::shared::minwindef::{DWORD, FALSE, LPVOID};
use winapi::um::handleapi::CloseHandle;
use winapi::um::processthreadsapi::{GetCurrentProcess, OpenProcessToken};
use winapi::um::securitybaseapi::{AdjustTokenPrivileges, GetTokenInformation};
use winapi::um::winbase::LookupPrivilegeValueW;
use winapi::um::winnt::{
    TokenElevation, HANDLE, LUID, LUID_AND_ATTRIBUTES, SE_PRIVILEGE_ENABLED,
    TOKEN_ADJUST_PRIVILEGES, TOKEN_ELEVATION, TOKEN_PRIVILEGES, TOKEN_QUERY,
};

/// Token handle guard for RAII cleanup
struct TokenGuard {
    handle: HANDLE,
}

impl TokenGuard {
    fn open(desired_access: DWORD) -> Result<Self, OsError> {
        let mut handle: HANDLE = std::ptr::null_mut();
        unsafe {
            if OpenProcessToken(GetCurrentProcess(), desired_access, &mut handle) == FALSE {
                return Err(last_os_error("OpenProcessToken"));
            }
        }
        Ok(TokenGuard { handle })
    }
}

impl Drop for TokenGuard {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe {
                CloseHandle(self.handle);
            }
        }
    }
}

/// Whether the current process token is elevated
pub fn is_token_elevated() -> Result<bool, OsError> {
    let token = TokenGuard::open(TOKEN_QUERY)?;

    unsafe {
        let mut elevation: TOKEN_ELEVATION = mem::zeroed();
        let mut returned: DWORD = 0;
        if GetTokenInformation(
            token.handle,
            TokenElevation,
            &mut elevation as *mut TOKEN_ELEVATION as LPVOID,
            mem::size_of::<TOKEN_ELEVATION>() as DWORD,
            &mut returned,
        ) == FALSE
        {
            return Err(last_os_error("GetTokenInformation"));
        }
        Ok(elevation.TokenIsElevated != 0)
    }
}

/// Enable a named privilege on the current process token
///
/// `AdjustTokenPrivileges` succeeds even when the token does not hold the
/// privilege; that case is reported as `ERROR_NOT_ALL_ASSIGNED`.
pub fn enable_privilege(name: &str) -> Result<(), OsError> {
    let token = TokenGuard::open(TOKEN_ADJUST_PRIVILEGES | TOKEN_QUERY)?;

    unsafe {
        let mut luid = LUID {
            LowPart: 0,
            HighPart: 0,
        };
        let privilege_name = string_to_wide(name);
        if LookupPrivilegeValueW(std::ptr::null(), privilege_name.as_ptr(), &mut luid) == FALSE {
            return Err(last_os_error("LookupPrivilegeValueW"));
        }

        let mut privileges = TOKEN_PRIVILEGES {
            PrivilegeCount: 1,
            Privileges: [LUID_AND_ATTRIBUTES {
                Luid: luid,
                Attributes: SE_PRIVILEGE_ENABLED,
            }],
        };

        if AdjustTokenPrivileges(
            token.handle,
            FALSE,
            &mut privileges,
            mem::size_of::<TOKEN_PRIVILEGES>() as DWORD,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
        ) == FALSE
        {
            return Err(last_os_error("AdjustTokenPrivileges"));
        }

        if last_error() == ErrorCode::NotAllAssigned {
            return Err(OsError::new(
                "AdjustTokenPrivileges",
                ErrorCode::NotAllAssigned,
            ));
        }
    }

    Ok(())
}
