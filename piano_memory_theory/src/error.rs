use thiserror::Error;

/// Failures parsing textual notes and colors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TheoryError {
    #[error("invalid pitch '{0}': expected a letter A-G, optional accidentals, and an octave (e.g. C#4)")]
    InvalidPitch(String),

    #[error("invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),
}
