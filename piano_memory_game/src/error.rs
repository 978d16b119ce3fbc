use thiserror::Error;

/// Failures loading or validating a `GameConfig`.
///
/// The game itself never fails at runtime; invalid clicks are ignored. Only
/// configuration has an error path.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pair_count must be at least 1")]
    ZeroPairs,

    #[error("mismatch delay ({mismatch_ms} ms) must be longer than match delay ({match_ms} ms)")]
    DelayOrder { match_ms: u64, mismatch_ms: u64 },

    #[error("reference octave {0} is outside the keyboard range 0..=7")]
    OctaveOutOfRange(i8),
}
