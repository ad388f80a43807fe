//! Target process specification and resolved process names

use super::{VeilError, VeilResult};
use serde::Serialize;
use std::fmt;

/// Executable base name of a process, or `Unknown` when it could not be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProcessName {
    Known(String),
    Unknown,
}

impl ProcessName {
    /// Returns the name if known
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ProcessName::Known(name) => Some(name),
            ProcessName::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ProcessName::Unknown)
    }
}

impl fmt::Display for ProcessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessName::Known(name) => write!(f, "{}", name),
            ProcessName::Unknown => write!(f, "unknown"),
        }
    }
}

/// Process file name whose windows should be hidden
///
/// Matching is case-insensitive over all of Unicode, like Windows file
/// names, and exact on the base name only. Paths and arguments are rejected
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    process_name: String,
    folded: String,
}

impl TargetSpec {
    /// Creates a target from an executable file name such as `vlc.exe`
    pub fn new(process_name: impl Into<String>) -> VeilResult<Self> {
        let process_name = process_name.into();
        let trimmed = process_name.trim();

        if trimmed.is_empty() {
            return Err(VeilError::InvalidTarget(
                "process name cannot be empty".to_string(),
            ));
        }
        if trimmed.contains(['\\', '/']) {
            return Err(VeilError::InvalidTarget(format!(
                "{} must be a file name, not a path",
                trimmed
            )));
        }
        if trimmed.contains('"') {
            return Err(VeilError::InvalidTarget(format!(
                "{} looks like a quoted command line",
                trimmed
            )));
        }

        Ok(TargetSpec {
            process_name: trimmed.to_string(),
            folded: trimmed.to_lowercase(),
        })
    }

    /// The configured process name
    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    /// Check whether a resolved name refers to the target
    pub fn matches(&self, name: &ProcessName) -> bool {
        match name {
            ProcessName::Known(name) => name.to_lowercase() == self.folded,
            ProcessName::Unknown => false,
        }
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.process_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_case_insensitive() {
        let target = TargetSpec::new("vlc.exe").unwrap();
        assert!(target.matches(&ProcessName::Known("vlc.exe".to_string())));
        assert!(target.matches(&ProcessName::Known("VLC.EXE".to_string())));
        assert!(target.matches(&ProcessName::Known("Vlc.Exe".to_string())));
    }

    #[test]
    fn test_matches_non_ascii_case_insensitive() {
        let target = TargetSpec::new("überwachung.exe").unwrap();
        assert!(target.matches(&ProcessName::Known("ÜBERWACHUNG.EXE".to_string())));
        assert!(target.matches(&ProcessName::Known("Überwachung.exe".to_string())));

        let target = TargetSpec::new("ПРОГРАММА.EXE").unwrap();
        assert!(target.matches(&ProcessName::Known("программа.exe".to_string())));
        assert!(!target.matches(&ProcessName::Known("программа2.exe".to_string())));
        assert_eq!(target.process_name(), "ПРОГРАММА.EXE");
    }

    #[test]
    fn test_exact_match_only() {
        let target = TargetSpec::new("vlc.exe").unwrap();
        assert!(!target.matches(&ProcessName::Known("vlc.exe.bak".to_string())));
        assert!(!target.matches(&ProcessName::Known("myvlc.exe".to_string())));
        assert!(!target.matches(&ProcessName::Known("vlc".to_string())));
    }

    #[test]
    fn test_unknown_never_matches() {
        let target = TargetSpec::new("vlc.exe").unwrap();
        assert!(!target.matches(&ProcessName::Unknown));
    }

    #[test]
    fn test_rejects_empty_and_paths() {
        assert!(TargetSpec::new("").is_err());
        assert!(TargetSpec::new("   ").is_err());
        assert!(TargetSpec::new("C:\\Program Files\\VLC\\vlc.exe").is_err());
        assert!(TargetSpec::new("bin/vlc.exe").is_err());
    }

    #[test]
    fn test_trims_whitespace() {
        let target = TargetSpec::new("  notepad.exe ").unwrap();
        assert_eq!(target.process_name(), "notepad.exe");
    }

    #[test]
    fn test_process_name_display() {
        assert_eq!(ProcessName::Known("a.exe".to_string()).to_string(), "a.exe");
        assert_eq!(ProcessName::Unknown.to_string(), "unknown");
        assert!(ProcessName::Unknown.is_unknown());
        assert_eq!(ProcessName::Unknown.as_str(), None);
    }
}
