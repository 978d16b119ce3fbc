// Chords and the chord catalog.
//
// A `Chord` is a spelled triad with a stable identity. Its `ChordId` is built
// from root letter, octave, quality and inversion (`C4_maj`, `D4_min_inv1`),
// so generating the same logical chord twice always yields equal ids. The
// memory game pairs cards by comparing these ids.
//
// `ChordCatalog` is the seam between theory and game: given a root letter
// and an octave it returns every chord rooted there. `TriadCatalog` is the
// standard implementation: for each `ChordQuality` in order, the root
// position triad followed by its first and second inversions (12 chords per
// root). Tests substitute small stub catalogs.
//
// Spelling is by letter: the third sits two letters above the root and the
// fifth four letters above, with whatever accidental reaches the right
// semitone. C minor is `C Eb G`, B augmented is `B D# F##`.

use crate::color::{Color, chord_color};
use crate::pitch::{NoteLetter, NoteName, Pitch};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Id fragment that marks an inverted voicing.
const INVERSION_MARKER: &str = "_inv";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 4] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
    ];

    /// Semitones above the root of the third and the fifth.
    pub fn intervals(self) -> [i16; 2] {
        match self {
            ChordQuality::Major => [4, 7],
            ChordQuality::Minor => [3, 7],
            ChordQuality::Diminished => [3, 6],
            ChordQuality::Augmented => [4, 8],
        }
    }

    /// Short tag used in ids and display names.
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "maj",
            ChordQuality::Minor => "min",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
        }
    }
}

/// Stable chord identity, e.g. `C4_maj` or `A4_min_inv2`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChordId(String);

impl ChordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn for_triad(root: NoteLetter, quality: ChordQuality, octave: i8, inversion: u8) -> Self {
        let base = format!("{root}{octave}_{}", quality.suffix());
        if inversion == 0 {
            Self(base)
        } else {
            Self(format!("{base}{INVERSION_MARKER}{inversion}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_inversion(&self) -> bool {
        self.0.contains(INVERSION_MARKER)
    }
}

impl fmt::Display for ChordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A playable chord: pitches sounded together plus display metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    pub id: ChordId,
    /// Label shown on the card face, e.g. `Cmaj` or `Cmaj/E`.
    pub name: String,
    /// Lowest note first.
    pub pitches: Vec<Pitch>,
    /// Note names without octaves, space separated (`C E G`).
    pub display_notes: String,
    pub quality: ChordQuality,
    pub root: NoteLetter,
    /// 0 = root position, 1 = first inversion, 2 = second inversion.
    pub inversion: u8,
}

impl Chord {
    /// Root-position triad.
    pub fn triad(root: NoteLetter, quality: ChordQuality, octave: i8) -> Self {
        Self::triad_inversion(root, quality, octave, 0)
    }

    /// Triad with the lowest `inversion` notes moved up an octave. The id
    /// keeps the root-position octave so `C4_maj_inv1` is still "C4".
    pub fn triad_inversion(
        root: NoteLetter,
        quality: ChordQuality,
        octave: i8,
        inversion: u8,
    ) -> Self {
        let inversion = inversion % 3;
        let base = Pitch::natural(root, octave).midi();
        let [third, fifth] = quality.intervals();

        let mut pitches: Vec<Pitch> = [(0, 0), (2, third), (4, fifth)]
            .into_iter()
            .map(|(letter_steps, semitones)| {
                let position = root.index() + letter_steps;
                let letter = NoteLetter::from_index(position);
                let letter_octave = octave.saturating_add((position / 7) as i8);
                let midi = base + semitones;
                Pitch::spelled(letter, letter_octave, midi).unwrap_or_else(|| Pitch::from_midi(midi))
            })
            .collect();
        for _ in 0..inversion {
            let lowest = pitches.remove(0);
            pitches.push(lowest.octave_up());
        }

        let mut name = format!("{root}{}", quality.suffix());
        if inversion > 0 {
            name.push('/');
            name.push_str(&pitches[0].name.to_string());
        }
        let display_notes = pitches
            .iter()
            .map(|p| p.name.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            id: ChordId::for_triad(root, quality, octave, inversion),
            name,
            pitches,
            display_notes,
            quality,
            root,
            inversion,
        }
    }

    pub fn root_name(&self) -> NoteName {
        NoteName::natural(self.root)
    }

    pub fn is_inversion(&self) -> bool {
        self.id.is_inversion()
    }

    /// Display color for this chord (see `color.rs`).
    pub fn color(&self) -> Color {
        chord_color(self.root_name().simplified(), self.quality, &self.pitches)
    }
}

/// Source of the chords rooted at a note.
///
/// Implementations must be deterministic: identical arguments yield
/// structurally identical chords.
pub trait ChordCatalog {
    fn chords_for_note(&self, root: NoteLetter, octave: i8) -> Vec<Chord>;
}

/// Triads of every quality with their inversions.
#[derive(Clone, Copy, Debug, Default)]
pub struct TriadCatalog;

impl ChordCatalog for TriadCatalog {
    fn chords_for_note(&self, root: NoteLetter, octave: i8) -> Vec<Chord> {
        ChordQuality::ALL
            .into_iter()
            .flat_map(|quality| {
                (0..3).map(move |inversion| Chord::triad_inversion(root, quality, octave, inversion))
            })
            .collect()
    }
}
