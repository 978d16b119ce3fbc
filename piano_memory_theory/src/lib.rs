// Piano Memory music theory: the leaf layer under the game.
//
// Everything here is pure and deterministic. Nothing owns state, nothing
// draws random numbers.
//
// Module overview:
// - `pitch.rs`: Note letters, accidentals, spelled note names, pitches with
//   octave, MIDI numbers, enharmonic simplification.
// - `chord.rs`: `Chord`, `ChordQuality`, the `ChordCatalog` seam and the
//   standard `TriadCatalog` (root position + inversions per quality).
// - `color.rs`: `Color` and `chord_color`, the deterministic chord-to-color
//   mapping used for cards and the audition background.
// - `error.rs`: `TheoryError` for string parsing.
//
// The game crate (`piano_memory_game`) builds decks from this catalog.

pub mod chord;
pub mod color;
pub mod error;
pub mod pitch;

pub use chord::{Chord, ChordCatalog, ChordId, ChordQuality, TriadCatalog};
pub use color::{Color, chord_color};
pub use error::TheoryError;
pub use pitch::{Accidental, NoteLetter, NoteName, Pitch};
