// Small shared types: physical card ids, the game generation counter,
// per-pair phases and the outcome of a click.

use crate::theory::ChordId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one physical card: `<chordId>_1` or `<chordId>_2`.
///
/// Distinct from `ChordId`; the two cards of a pair share a chord id but
/// never a card id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Id of copy `copy` (1 or 2) of the given chord.
    pub fn for_copy(chord: &ChordId, copy: u8) -> Self {
        Self(format!("{chord}_{copy}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Counter bumped on every new game. Resolution timers carry the generation
/// they were scheduled in and are ignored once it has moved on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// Where the current pair-resolution cycle stands.
///
/// `Idle → OneFlipped → Resolving → Idle`, with `Won` once every card is
/// matched. Only `Resolving` rejects clicks wholesale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    OneFlipped,
    Resolving,
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairOutcome {
    Match,
    Mismatch,
}

/// Why a click was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Two cards are already exposed and waiting on their timer.
    Resolving,
    AlreadyMatched,
    AlreadyFlipped,
    OutOfRange,
}

/// What a single click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    Rejected(RejectReason),
    FirstFlip,
    /// Second flip of a pair; `attempts` went up and a resolution timer is
    /// pending.
    PairCompleted(PairOutcome),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_id_for_copy() {
        let chord = ChordId::new("C4_maj");
        assert_eq!(CardId::for_copy(&chord, 1).as_str(), "C4_maj_1");
        assert_eq!(CardId::for_copy(&chord, 2).to_string(), "C4_maj_2");
    }

    #[test]
    fn generation_advances() {
        let g = Generation::default();
        assert_eq!(g.next(), Generation(1));
        assert!(g.next() > g);
    }
}
