//! Strategy selection by name

use super::{CaptureExclusion, HidingStrategy, TransparencyGhost};
use crate::config::StrategyConfig;
use crate::core::types::{OsVersion, VeilError, VeilResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The available hiding techniques
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    CaptureExclusion,
    TransparencyGhost,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 2] = [
        StrategyKind::CaptureExclusion,
        StrategyKind::TransparencyGhost,
    ];

    /// Build the configured strategy
    pub fn build(&self, config: &StrategyConfig) -> VeilResult<Box<dyn HidingStrategy>> {
        match self {
            StrategyKind::CaptureExclusion => {
                let min_os_version: OsVersion = config.min_os_version.parse()?;
                Ok(Box::new(CaptureExclusion::new(min_os_version)))
            }
            StrategyKind::TransparencyGhost => {
                Ok(Box::new(TransparencyGhost::new(config.ghost_alpha)))
            }
        }
    }
}

impl FromStr for StrategyKind {
    type Err = VeilError;

    fn from_str(s: &str) -> VeilResult<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "capture-exclusion" | "exclude" => Ok(StrategyKind::CaptureExclusion),
            "transparency-ghost" | "ghost" => Ok(StrategyKind::TransparencyGhost),
            _ => Err(VeilError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::CaptureExclusion => write!(f, "capture-exclusion"),
            StrategyKind::TransparencyGhost => write!(f, "transparency-ghost"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!(
            "capture-exclusion".parse::<StrategyKind>().unwrap(),
            StrategyKind::CaptureExclusion
        );
        assert_eq!(
            "Capture_Exclusion".parse::<StrategyKind>().unwrap(),
            StrategyKind::CaptureExclusion
        );
        assert_eq!(
            "ghost".parse::<StrategyKind>().unwrap(),
            StrategyKind::TransparencyGhost
        );
        assert!(matches!(
            "overlay".parse::<StrategyKind>(),
            Err(VeilError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_display_matches_config_name() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.to_string().parse::<StrategyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_build_uses_config() {
        let config = StrategyConfig::default();
        for kind in StrategyKind::ALL {
            let strategy = kind.build(&config).unwrap();
            assert_eq!(strategy.kind(), kind);
        }
    }

    #[test]
    fn test_build_rejects_bad_version() {
        let config = StrategyConfig {
            min_os_version: "ten".to_string(),
            ..StrategyConfig::default()
        };
        assert!(StrategyKind::CaptureExclusion.build(&config).is_err());
        assert!(StrategyKind::TransparencyGhost.build(&config).is_ok());
    }
}
