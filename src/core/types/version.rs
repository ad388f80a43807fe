//! Operating system version numbers

use super::{VeilError, VeilResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Windows version as `major.minor.build`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl OsVersion {
    /// Windows 10 version 2004, the first release honoring `WDA_EXCLUDEFROMCAPTURE`
    pub const WINDOWS_10_2004: OsVersion = OsVersion::new(10, 0, 19041);

    pub const fn new(major: u32, minor: u32, build: u32) -> Self {
        OsVersion {
            major,
            minor,
            build,
        }
    }

    /// Check if this version is at least `minimum`
    pub fn at_least(&self, minimum: &OsVersion) -> bool {
        self >= minimum
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}

impl FromStr for OsVersion {
    type Err = VeilError;

    fn from_str(s: &str) -> VeilResult<Self> {
        let invalid = || VeilError::InvalidVersion(s.to_string());

        let mut parts = s.trim().split('.');
        let mut next = |required: bool| -> VeilResult<u32> {
            match parts.next() {
                Some(part) => part.trim().parse::<u32>().map_err(|_| invalid()),
                None if required => Err(invalid()),
                None => Ok(0),
            }
        };

        let major = next(true)?;
        let minor = next(false)?;
        let build = next(false)?;

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(OsVersion::new(major, minor, build))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_version() {
        let version: OsVersion = "10.0.19041".parse().unwrap();
        assert_eq!(version, OsVersion::WINDOWS_10_2004);
    }

    #[test]
    fn test_parse_partial_version() {
        assert_eq!("10".parse::<OsVersion>().unwrap(), OsVersion::new(10, 0, 0));
        assert_eq!("6.3".parse::<OsVersion>().unwrap(), OsVersion::new(6, 3, 0));
    }

    #[test]
    fn test_parse_invalid_version() {
        assert!("".parse::<OsVersion>().is_err());
        assert!("ten".parse::<OsVersion>().is_err());
        assert!("10.0.19041.1".parse::<OsVersion>().is_err());
        assert!("10..1".parse::<OsVersion>().is_err());
    }

    #[test]
    fn test_ordering() {
        let win7 = OsVersion::new(6, 1, 7601);
        let win10_1909 = OsVersion::new(10, 0, 18363);
        let win11 = OsVersion::new(10, 0, 22631);

        assert!(!win7.at_least(&OsVersion::WINDOWS_10_2004));
        assert!(!win10_1909.at_least(&OsVersion::WINDOWS_10_2004));
        assert!(win11.at_least(&OsVersion::WINDOWS_10_2004));
        assert!(OsVersion::WINDOWS_10_2004.at_least(&OsVersion::WINDOWS_10_2004));
    }

    #[test]
    fn test_display() {
        assert_eq!(OsVersion::new(10, 0, 22631).to_string(), "10.0.22631");
    }
}
