//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! difficulty = 4
//! deadline_ms = 1500
//! seed = 42          # optional: reproducible mistakes at low levels
//! check_interval = 1 # nodes between clock reads
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use othello_core::DEFAULT_MOVE_TIME;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid engine config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Difficulty level used when a caller does not pass one explicitly
    pub difficulty: u8,
    /// Wall-clock think budget per move in milliseconds
    pub deadline_ms: u64,
    /// Seed for the random source; None draws fresh entropy for every call
    pub seed: Option<u64>,
    /// Nodes between clock reads
    pub check_interval: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: 3,
            deadline_ms: DEFAULT_MOVE_TIME.as_millis() as u64,
            seed: None,
            check_interval: 1,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deadline_ms == 0 {
            return Err(ConfigError::Invalid("deadline_ms must be positive"));
        }
        if self.check_interval == 0 {
            return Err(ConfigError::Invalid("check_interval must be positive"));
        }
        Ok(())
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = EngineConfig::default();
        assert_eq!(c.deadline(), Duration::from_millis(2000));
        assert_eq!(c.seed, None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let c = EngineConfig::from_toml_str("difficulty = 5\nseed = 7\n").unwrap();
        assert_eq!(c.difficulty, 5);
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.deadline_ms, 2000);
        assert_eq!(c.check_interval, 1);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EngineConfig::from_toml_str("deadline_ms = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("check_interval = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("difficulty = \"hard\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("depth = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let c = EngineConfig {
            difficulty: 2,
            deadline_ms: 750,
            seed: Some(99),
            check_interval: 16,
        };
        let text = toml::to_string(&c).unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), c);
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load(Path::new("/nonexistent/engine.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
