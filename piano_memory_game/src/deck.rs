// Deck building.
//
// A deck is built in five steps:
//   1. Ask the catalog for every chord rooted on each of the seven letters
//      at the reference octave (seven catalog calls per deck).
//   2. Drop inversions; only root-position chords go in a deck.
//   3. Sample `min(pair_count, pool)` chords uniformly without replacement.
//   4. Color each chosen chord once and emit two cards for it,
//      `<chordId>_1` and `<chordId>_2`, both unmatched.
//   5. Shuffle the cards.
//
// A pool smaller than `pair_count` just yields a smaller deck. Every chord
// contributes exactly two cards, so the deck length is always even.
//
// Card colors are fixed here and never recomputed during play.

use crate::prng::GameRng;
use crate::theory::{Chord, ChordCatalog, Color, NoteLetter};
use crate::types::CardId;
use serde::{Deserialize, Serialize};

/// One physical card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCard {
    pub id: CardId,
    pub chord: Chord,
    pub color: Color,
    /// Set once the pair is found; never cleared within a game.
    pub is_matched: bool,
}

/// All root-position chords the catalog offers at `octave`, in catalog order.
pub fn collect_pool<C: ChordCatalog + ?Sized>(catalog: &C, octave: i8) -> Vec<Chord> {
    NoteLetter::ALL
        .into_iter()
        .flat_map(|root| catalog.chords_for_note(root, octave))
        .filter(|chord| !chord.is_inversion())
        .collect()
}

/// Deal a shuffled deck of `2 * min(pair_count, pool size)` cards.
pub fn build_deck<C: ChordCatalog + ?Sized>(
    catalog: &C,
    pair_count: usize,
    octave: i8,
    rng: &mut GameRng,
) -> Vec<GameCard> {
    let mut pool = collect_pool(catalog, octave);
    let pool_size = pool.len();

    // Sort the picks so chords are taken out of the pool back to front and
    // `swap_remove` never disturbs an index still to be taken.
    let mut picks = rng.sample_indices(pool_size, pair_count);
    picks.sort_unstable_by(|a, b| b.cmp(a));
    let chosen: Vec<Chord> = picks.into_iter().map(|i| pool.swap_remove(i)).collect();

    let mut cards = Vec::with_capacity(chosen.len() * 2);
    for chord in chosen {
        let color = chord.color();
        cards.push(GameCard {
            id: CardId::for_copy(&chord.id, 1),
            chord: chord.clone(),
            color,
            is_matched: false,
        });
        cards.push(GameCard {
            id: CardId::for_copy(&chord.id, 2),
            chord,
            color,
            is_matched: false,
        });
    }
    rng.shuffle(&mut cards);

    log::debug!(
        "dealt {} cards ({} pairs requested, pool of {})",
        cards.len(),
        pair_count,
        pool_size
    );
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::{ChordId, ChordQuality, TriadCatalog};
    use std::collections::BTreeMap;

    /// Catalog that only knows five chords, all rooted on C's call.
    struct FiveChords;

    impl ChordCatalog for FiveChords {
        fn chords_for_note(&self, root: NoteLetter, octave: i8) -> Vec<Chord> {
            if root != NoteLetter::C {
                return Vec::new();
            }
            vec![
                Chord::triad(NoteLetter::C, ChordQuality::Major, octave),
                Chord::triad(NoteLetter::D, ChordQuality::Minor, octave),
                Chord::triad(NoteLetter::E, ChordQuality::Major, octave),
                Chord::triad(NoteLetter::F, ChordQuality::Major, octave),
                Chord::triad(NoteLetter::G, ChordQuality::Major, octave),
                Chord::triad_inversion(NoteLetter::C, ChordQuality::Major, octave, 1),
            ]
        }
    }

    fn copies_per_chord(cards: &[GameCard]) -> BTreeMap<ChordId, usize> {
        let mut counts = BTreeMap::new();
        for card in cards {
            *counts.entry(card.chord.id.clone()).or_default() += 1;
        }
        counts
    }

    #[test]
    fn every_chord_appears_exactly_twice() {
        for seed in 0..50 {
            let mut rng = GameRng::new(seed);
            let cards = build_deck(&TriadCatalog, 15, 4, &mut rng);
            assert_eq!(cards.len(), 30);
            let counts = copies_per_chord(&cards);
            assert_eq!(counts.len(), 15);
            assert!(counts.values().all(|&n| n == 2), "seed {seed}: {counts:?}");
        }
    }

    #[test]
    fn pair_cards_share_chord_and_color_but_not_id() {
        let mut rng = GameRng::new(7);
        let cards = build_deck(&TriadCatalog, 10, 4, &mut rng);
        for card in &cards {
            let twin = cards
                .iter()
                .find(|c| c.chord.id == card.chord.id && c.id != card.id)
                .unwrap();
            assert_eq!(twin.color, card.color);
            assert_eq!(card.color, card.chord.color());
        }
        let first = &cards[0];
        let id = first.id.as_str();
        assert!(id.ends_with("_1") || id.ends_with("_2"), "{id}");
        assert!(id.starts_with(first.chord.id.as_str()));
    }

    #[test]
    fn deck_starts_unmatched() {
        let mut rng = GameRng::new(1);
        let cards = build_deck(&TriadCatalog, 15, 4, &mut rng);
        assert!(cards.iter().all(|c| !c.is_matched));
    }

    #[test]
    fn inversions_never_dealt() {
        let mut rng = GameRng::new(3);
        let cards = build_deck(&TriadCatalog, 100, 4, &mut rng);
        assert!(cards.iter().all(|c| !c.chord.is_inversion()));
        // 7 roots x 4 qualities of root-position triads.
        assert_eq!(cards.len(), 56);
    }

    #[test]
    fn small_pool_uses_everything() {
        let mut rng = GameRng::new(11);
        let cards = build_deck(&FiveChords, 15, 4, &mut rng);
        assert_eq!(cards.len(), 10);
        assert_eq!(copies_per_chord(&cards).len(), 5);
    }

    #[test]
    fn length_is_twice_the_smaller_of_request_and_pool() {
        for requested in 1..8 {
            let mut rng = GameRng::new(requested as u64);
            let cards = build_deck(&FiveChords, requested, 4, &mut rng);
            assert_eq!(cards.len(), 2 * requested.min(5));
            assert_eq!(cards.len() % 2, 0);
        }
    }

    #[test]
    fn pool_respects_octave() {
        let pool = collect_pool(&TriadCatalog, 3);
        assert_eq!(pool.len(), 28);
        assert!(pool.iter().all(|c| c.id.as_str().contains('3')));
    }

    #[test]
    fn same_seed_same_deck() {
        let a = build_deck(&TriadCatalog, 15, 4, &mut GameRng::new(99));
        let b = build_deck(&TriadCatalog, 15, 4, &mut GameRng::new(99));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_deal_differently() {
        let a = build_deck(&TriadCatalog, 15, 4, &mut GameRng::new(1));
        let b = build_deck(&TriadCatalog, 15, 4, &mut GameRng::new(2));
        let ids = |cards: &[GameCard]| cards.iter().map(|c| c.id.clone()).collect::<Vec<_>>();
        assert_ne!(ids(&a), ids(&b));
    }

    #[test]
    fn empty_catalog_gives_empty_deck() {
        struct Nothing;
        impl ChordCatalog for Nothing {
            fn chords_for_note(&self, _root: NoteLetter, _octave: i8) -> Vec<Chord> {
                Vec::new()
            }
        }
        let cards = build_deck(&Nothing, 15, 4, &mut GameRng::new(5));
        assert!(cards.is_empty());
    }
}
