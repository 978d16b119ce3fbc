// Game configuration.
//
// All tunables live in `GameConfig` instead of being hardcoded in the
// controller: how many pairs a deck holds, which octave the chords are
// voiced in, and the two resolution delays. Configs load from JSON; missing
// fields take their defaults, so `{}` is a valid config.
//
// The mismatch delay must be strictly longer than the match delay: a wrong
// pair stays visible a little longer so the player can memorize it.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

/// Octaves the reference keyboard can voice triads in.
pub const OCTAVE_RANGE: RangeInclusive<i8> = 0..=7;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Chords drawn per deck. Each becomes two cards. Clamped to the pool
    /// size when the catalog offers fewer chords.
    pub pair_count: usize,
    /// Octave of the root note for every chord in the deck.
    pub reference_octave: i8,
    /// Time a matched pair stays "flipped" before being marked matched.
    pub match_resolve_delay_ms: u64,
    /// Time a mismatched pair stays exposed before turning back over.
    pub mismatch_resolve_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: 15,
            reference_octave: 4,
            match_resolve_delay_ms: 500,
            mismatch_resolve_delay_ms: 1000,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pair_count == 0 {
            return Err(ConfigError::ZeroPairs);
        }
        if self.mismatch_resolve_delay_ms <= self.match_resolve_delay_ms {
            return Err(ConfigError::DelayOrder {
                match_ms: self.match_resolve_delay_ms,
                mismatch_ms: self.mismatch_resolve_delay_ms,
            });
        }
        if !OCTAVE_RANGE.contains(&self.reference_octave) {
            return Err(ConfigError::OctaveOutOfRange(self.reference_octave));
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pair_count, 15);
        assert!(config.mismatch_resolve_delay_ms > config.match_resolve_delay_ms);
    }

    #[test]
    fn full_json_parses() {
        let json = r#"{
            "pair_count": 6,
            "reference_octave": 3,
            "match_resolve_delay_ms": 250,
            "mismatch_resolve_delay_ms": 800
        }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.pair_count, 6);
        assert_eq!(config.reference_octave, 3);
        assert_eq!(config.match_resolve_delay_ms, 250);
        assert_eq!(config.mismatch_resolve_delay_ms, 800);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = GameConfig::from_json(r#"{"pair_count": 4}"#).unwrap();
        assert_eq!(config.pair_count, 4);
        assert_eq!(config.reference_octave, 4);
        assert_eq!(config.match_resolve_delay_ms, 500);
        assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn json_roundtrip() {
        let config = GameConfig {
            pair_count: 9,
            ..GameConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn rejects_zero_pairs() {
        let err = GameConfig::from_json(r#"{"pair_count": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroPairs));
    }

    #[test]
    fn rejects_mismatch_not_longer_than_match() {
        let json = r#"{"match_resolve_delay_ms": 700, "mismatch_resolve_delay_ms": 700}"#;
        let err = GameConfig::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DelayOrder {
                match_ms: 700,
                mismatch_ms: 700
            }
        ));
        assert!(err.to_string().contains("700 ms"));
    }

    #[test]
    fn rejects_octave_off_the_keyboard() {
        let err = GameConfig::from_json(r#"{"reference_octave": 9}"#).unwrap_err();
        assert!(matches!(err, ConfigError::OctaveOutOfRange(9)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = GameConfig::load(Path::new("/nonexistent/piano_memory.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
