// Chord colors.
//
// `chord_color` maps (simplified root, quality, pitches) to an RGB color:
// - hue: the root's pitch class around the color wheel, 30 degrees apart,
// - saturation and base lightness: the chord quality (bright majors, darker
//   minors, muted diminished, vivid augmented),
// - a small lightness nudge from the mean MIDI register, so the same chord
//   voiced higher reads slightly lighter.
//
// The root is simplified again inside, and register uses MIDI numbers, so
// two enharmonic spellings of one chord always get the same color.
//
// Colors print and serialize as `#rrggbb`.

use crate::chord::ChordQuality;
use crate::error::TheoryError;
use crate::pitch::{NoteName, Pitch};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// MIDI note around which the register nudge is centered (E4).
const REGISTER_CENTER: f32 = 64.0;
/// Semitones of register offset that produce the full nudge.
const REGISTER_SPAN: f32 = 24.0;
const MAX_REGISTER_NUDGE: f32 = 0.08;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert from HSL. `hue` is in degrees (any value, wrapped),
    /// `saturation` and `lightness` are clamped to [0, 1].
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let h = hue.rem_euclid(360.0) / 60.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(channel(r1), channel(g1), channel(b1))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TheoryError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Deterministic display color for a chord.
pub fn chord_color(root: NoteName, quality: ChordQuality, pitches: &[Pitch]) -> Color {
    let hue = f32::from(root.simplified().pitch_class()) * 30.0;
    let (saturation, lightness) = match quality {
        ChordQuality::Major => (0.70, 0.62),
        ChordQuality::Minor => (0.50, 0.46),
        ChordQuality::Diminished => (0.35, 0.36),
        ChordQuality::Augmented => (0.85, 0.72),
    };
    Color::from_hsl(hue, saturation, lightness + register_nudge(pitches))
}

fn register_nudge(pitches: &[Pitch]) -> f32 {
    if pitches.is_empty() {
        return 0.0;
    }
    let total: f32 = pitches.iter().map(|p| f32::from(p.midi())).sum();
    let mean = total / pitches.len() as f32;
    ((mean - REGISTER_CENTER) / REGISTER_SPAN * MAX_REGISTER_NUDGE)
        .clamp(-MAX_REGISTER_NUDGE, MAX_REGISTER_NUDGE)
}
