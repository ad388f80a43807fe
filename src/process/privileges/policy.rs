//! What to do when the process is not elevated

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Handling of a missing administrator token at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElevationPolicy {
    /// Refuse to start
    Require,
    /// Log a warning and continue
    #[default]
    Warn,
    /// Report the elevation state without a warning
    Ignore,
}

impl FromStr for ElevationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "require" => Ok(ElevationPolicy::Require),
            "warn" => Ok(ElevationPolicy::Warn),
            "ignore" => Ok(ElevationPolicy::Ignore),
            other => Err(format!(
                "unknown elevation policy '{}', expected require, warn or ignore",
                other
            )),
        }
    }
}

impl fmt::Display for ElevationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevationPolicy::Require => write!(f, "require"),
            ElevationPolicy::Warn => write!(f, "warn"),
            ElevationPolicy::Ignore => write!(f, "ignore"),
        }
    }
}
