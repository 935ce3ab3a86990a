//! Match configuration and engine specs.
//!
//! ```toml
//! engine1 = "negamax:5"
//! engine2 = "random"
//! games = 20
//! deadline_ms = 500
//! max_plies = 120
//! seed = 1
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use negamax_engine::{EngineConfig, NegamaxEngine};
use othello_core::{Engine, SearchLimits, DEFAULT_MOVE_TIME};
use random_engine::RandomEngine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flips the configured seed for the second engine.
const ENGINE2_SEED_MASK: u64 = 0xA5A5_A5A5_A5A5_A5A5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse match config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown engine spec '{0}' (expected negamax:<level> or random)")]
    UnknownEngine(String),
    #[error("invalid match config: {0}")]
    Invalid(&'static str),
}

/// Which player to build for one side of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineSpec {
    Negamax { level: u8 },
    Random,
}

impl EngineSpec {
    /// Instantiate the engine. `seed` makes its random choices reproducible.
    pub fn build(&self, seed: Option<u64>) -> Box<dyn Engine> {
        match *self {
            EngineSpec::Negamax { level } => Box::new(NegamaxEngine::with_config(EngineConfig {
                difficulty: level,
                seed,
                ..EngineConfig::default()
            })),
            EngineSpec::Random => Box::new(match seed {
                Some(seed) => RandomEngine::seeded(seed),
                None => RandomEngine::new(),
            }),
        }
    }
}

impl FromStr for EngineSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ConfigError::UnknownEngine(s.to_string());
        let (kind, arg) = match s.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg)),
            None => (s, None),
        };
        match (kind.to_ascii_lowercase().as_str(), arg) {
            ("negamax" | "ai", None) => Ok(EngineSpec::Negamax { level: 3 }),
            ("negamax" | "ai", Some(level)) => level
                .parse()
                .map(|level| EngineSpec::Negamax { level })
                .map_err(|_| unknown()),
            ("random", None) => Ok(EngineSpec::Random),
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for EngineSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineSpec::Negamax { level } => write!(f, "negamax:{level}"),
            EngineSpec::Random => write!(f, "random"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TournamentConfig {
    /// First engine spec; plays Black in the first game
    pub engine1: String,
    pub engine2: String,
    /// Number of games to play
    pub games: u32,
    /// Think budget per move in milliseconds
    pub deadline_ms: u64,
    /// Plies (passes included) before the game is adjudicated on discs
    pub max_plies: u32,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
    /// Print the final board of every game
    pub verbose: bool,
    /// Seed for engine1's random choices; engine2 gets a derived one
    pub seed: Option<u64>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            engine1: "negamax:3".to_string(),
            engine2: "random".to_string(),
            games: 10,
            deadline_ms: DEFAULT_MOVE_TIME.as_millis() as u64,
            max_plies: 128,
            alternate_colors: true,
            verbose: false,
            seed: None,
        }
    }
}

impl TournamentConfig {
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
        if self.max_plies == 0 {
            return Err(ConfigError::Invalid("max_plies must be positive"));
        }
        self.engine_specs()?;
        Ok(())
    }

    pub fn engine_specs(&self) -> Result<(EngineSpec, EngineSpec), ConfigError> {
        Ok((self.engine1.parse()?, self.engine2.parse()?))
    }

    /// Seeds for engine1 and engine2. The sides never share a random stream.
    pub fn engine_seeds(&self) -> (Option<u64>, Option<u64>) {
        (self.seed, self.seed.map(|s| s ^ ENGINE2_SEED_MASK))
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }

    /// Fresh limits for one move (the clock starts when the engine searches).
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits::time(self.deadline())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_engine_specs() {
        assert_eq!("random".parse::<EngineSpec>().unwrap(), EngineSpec::Random);
        assert_eq!(
            "negamax:5".parse::<EngineSpec>().unwrap(),
            EngineSpec::Negamax { level: 5 }
        );
        assert_eq!(
            "Negamax".parse::<EngineSpec>().unwrap(),
            EngineSpec::Negamax { level: 3 }
        );
        assert!(matches!(
            "negamax:hard".parse::<EngineSpec>(),
            Err(ConfigError::UnknownEngine(_))
        ));
        assert!(matches!(
            "random:2".parse::<EngineSpec>(),
            Err(ConfigError::UnknownEngine(_))
        ));
        assert!("classical".parse::<EngineSpec>().is_err());
    }

    #[test]
    fn test_spec_display_round_trips() {
        for spec in [EngineSpec::Random, EngineSpec::Negamax { level: 4 }] {
            assert_eq!(spec.to_string().parse::<EngineSpec>().unwrap(), spec);
        }
    }

    #[test]
    fn test_built_engine_names() {
        assert_eq!(EngineSpec::Random.build(Some(1)).name(), "Random");
        assert_eq!(
            EngineSpec::Negamax { level: 2 }.build(None).name(),
            "Negamax L2"
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let c = TournamentConfig::from_toml_str("games = 4\nengine2 = \"negamax:1\"\n").unwrap();
        assert_eq!(c.games, 4);
        assert_eq!(c.engine1, "negamax:3");
        assert_eq!(
            c.engine_specs().unwrap(),
            (EngineSpec::Negamax { level: 3 }, EngineSpec::Negamax { level: 1 })
        );
        assert_eq!(c.deadline(), Duration::from_millis(2000));
        assert!(c.alternate_colors);
    }

    #[test]
    fn test_engines_get_distinct_seeds() {
        let c = TournamentConfig {
            seed: Some(0),
            ..Default::default()
        };
        let (s1, s2) = c.engine_seeds();
        assert_eq!(s1, Some(0));
        assert!(s2.is_some());
        assert_ne!(s1, s2);
        assert_eq!(TournamentConfig::default().engine_seeds(), (None, None));
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(matches!(
            TournamentConfig::from_toml_str("engine1 = \"gnuchess\""),
            Err(ConfigError::UnknownEngine(_))
        ));
        assert!(matches!(
            TournamentConfig::from_toml_str("max_plies = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            TournamentConfig::from_toml_str("rounds = 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
