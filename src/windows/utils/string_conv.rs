//! UTF-16 conversions for Win32 wide-string APIs

use std::ffi::{OsStr, OsString};
use std::os::windows::ffi::{OsStrExt, OsStringExt};

/// Null-terminated UTF-16 copy of `s`
pub fn string_to_wide(s: &str) -> Vec<u16> {
    OsStr::new(s)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

/// Convert a UTF-16 buffer, stopping at the first null
pub fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    OsString::from_wide(&wide[..len])
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_name_is_null_terminated() {
        let wide = string_to_wide("SeDebugPrivilege");
        assert_eq!(wide.len(), "SeDebugPrivilege".len() + 1);
        assert_eq!(wide.last(), Some(&0));
    }

    #[test]
    fn test_image_path_buffer() {
        let mut buffer = string_to_wide("C:\\Program Files\\VideoLAN\\VLC\\vlc.exe");
        buffer.resize(64, 0);
        assert_eq!(
            wide_to_string(&buffer),
            "C:\\Program Files\\VideoLAN\\VLC\\vlc.exe"
        );
    }

    #[test]
    fn test_unicode_path() {
        let path = "C:\\Users\\José\\視聴.exe";
        assert_eq!(wide_to_string(&string_to_wide(path)), path);
    }
}
