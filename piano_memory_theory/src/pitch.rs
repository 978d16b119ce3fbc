// Spelled pitches.
//
// A pitch is a spelled note name (letter + accidental) plus an octave in
// scientific pitch notation, so middle C is `C4` (MIDI 60). Spelling is kept
// rather than collapsed to a MIDI number because chord labels and the card
// text show it (`C Eb G`, not `C D# G`). Enharmonic comparisons go through
// `pitch_class()` / `midi()`, and `NoteName::simplified()` picks the one
// canonical (sharp) spelling per pitch class.
//
// `Pitch` serializes as its display string (`"G#4"`), the same form the
// highlight layer keys piano keys by.

use crate::error::TheoryError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The seven natural note letters, in scale order starting from C.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteLetter {
    pub const ALL: [NoteLetter; 7] = [
        NoteLetter::C,
        NoteLetter::D,
        NoteLetter::E,
        NoteLetter::F,
        NoteLetter::G,
        NoteLetter::A,
        NoteLetter::B,
    ];

    /// Pitch class of the natural note (C = 0 ... B = 11).
    pub fn natural_pitch_class(self) -> u8 {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 2,
            NoteLetter::E => 4,
            NoteLetter::F => 5,
            NoteLetter::G => 7,
            NoteLetter::A => 9,
            NoteLetter::B => 11,
        }
    }

    /// Position in `ALL` (C = 0 ... B = 6).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Letter at a scale position, wrapping every seven steps.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 7]
    }

    pub fn as_char(self) -> char {
        match self {
            NoteLetter::C => 'C',
            NoteLetter::D => 'D',
            NoteLetter::E => 'E',
            NoteLetter::F => 'F',
            NoteLetter::G => 'G',
            NoteLetter::A => 'A',
            NoteLetter::B => 'B',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_char() == c.to_ascii_uppercase())
    }
}

impl fmt::Display for NoteLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    pub fn semitones(self) -> i8 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    pub fn from_semitones(semitones: i8) -> Option<Self> {
        match semitones {
            -2 => Some(Accidental::DoubleFlat),
            -1 => Some(Accidental::Flat),
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            2 => Some(Accidental::DoubleSharp),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
        }
    }
}

/// A spelled note without octave, e.g. `Eb` or `F#`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoteName {
    pub letter: NoteLetter,
    pub accidental: Accidental,
}

impl NoteName {
    pub const fn new(letter: NoteLetter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    pub const fn natural(letter: NoteLetter) -> Self {
        Self::new(letter, Accidental::Natural)
    }

    pub fn pitch_class(self) -> u8 {
        (i16::from(self.letter.natural_pitch_class()) + i16::from(self.accidental.semitones()))
            .rem_euclid(12) as u8
    }

    /// Canonical spelling for a pitch class: naturals where possible,
    /// otherwise the sharp of the letter below.
    pub fn from_pitch_class(pc: u8) -> Self {
        let (letter, accidental) = match pc % 12 {
            0 => (NoteLetter::C, Accidental::Natural),
            1 => (NoteLetter::C, Accidental::Sharp),
            2 => (NoteLetter::D, Accidental::Natural),
            3 => (NoteLetter::D, Accidental::Sharp),
            4 => (NoteLetter::E, Accidental::Natural),
            5 => (NoteLetter::F, Accidental::Natural),
            6 => (NoteLetter::F, Accidental::Sharp),
            7 => (NoteLetter::G, Accidental::Natural),
            8 => (NoteLetter::G, Accidental::Sharp),
            9 => (NoteLetter::A, Accidental::Natural),
            10 => (NoteLetter::A, Accidental::Sharp),
            _ => (NoteLetter::B, Accidental::Natural),
        };
        Self::new(letter, accidental)
    }

    /// Enharmonic normalization: `Db`, `C#` and `B##` all become `C#`.
    pub fn simplified(self) -> Self {
        Self::from_pitch_class(self.pitch_class())
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.accidental.symbol())
    }
}

/// A spelled note in a specific octave (scientific pitch notation).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pitch {
    pub name: NoteName,
    pub octave: i8,
}

impl Pitch {
    pub const fn new(name: NoteName, octave: i8) -> Self {
        Self { name, octave }
    }

    pub const fn natural(letter: NoteLetter, octave: i8) -> Self {
        Self::new(NoteName::natural(letter), octave)
    }

    /// MIDI note number; `C4` is 60. The octave belongs to the letter, so
    /// `Cb4` is 59 and `B#3` is 60.
    pub fn midi(self) -> i16 {
        (i16::from(self.octave) + 1) * 12
            + i16::from(self.name.letter.natural_pitch_class())
            + i16::from(self.name.accidental.semitones())
    }

    /// Canonical spelling of a MIDI note number.
    pub fn from_midi(midi: i16) -> Self {
        let octave = (midi.div_euclid(12) - 1) as i8;
        Self::new(NoteName::from_pitch_class(midi.rem_euclid(12) as u8), octave)
    }

    /// Spell `midi` on the given letter in the given octave, if it is within
    /// two semitones of the natural.
    pub fn spelled(letter: NoteLetter, octave: i8, midi: i16) -> Option<Self> {
        let natural = Self::natural(letter, octave).midi();
        let accidental = Accidental::from_semitones(i8::try_from(midi - natural).ok()?)?;
        Some(Self::new(NoteName::new(letter, accidental), octave))
    }

    /// Same note an octave higher. Stays put at the top of the `i8` range.
    pub fn octave_up(self) -> Self {
        Self::new(self.name, self.octave.saturating_add(1))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.octave)
    }
}

impl FromStr for Pitch {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TheoryError::InvalidPitch(s.to_string());
        let mut chars = s.chars();
        let letter = chars.next().and_then(NoteLetter::from_char).ok_or_else(invalid)?;
        let rest = chars.as_str();

        // Accidentals are a run of one repeated symbol; the letter is always
        // the first character, so a following 'b' is a flat, never the note B.
        let marks = rest.chars().take_while(|&c| c == '#' || c == 'b').count();
        let (marks_str, octave_str) = rest.split_at(marks);
        let accidental = match marks_str {
            "" => Accidental::Natural,
            "#" => Accidental::Sharp,
            "##" => Accidental::DoubleSharp,
            "b" => Accidental::Flat,
            "bb" => Accidental::DoubleFlat,
            _ => return Err(invalid()),
        };
        let octave: i8 = octave_str.parse().map_err(|_| invalid())?;
        Ok(Self::new(NoteName::new(letter, accidental), octave))
    }
}

impl Serialize for Pitch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Pitch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
