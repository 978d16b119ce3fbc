// Seeded pseudo-random number generator for the memory game.
//
// xoshiro256++ (Blackman & Vigna, 2019) seeded through SplitMix64. Every
// random decision the game makes (which chords end up in a deck, where each
// card lands after shuffling) draws from a `GameRng`, so a deck is fully
// reproducible from its seed. Tests rely on this to pin down deck layouts.
//
// On top of the raw generator this crate provides the two collection
// operations the deck builder needs:
// - `sample_indices`: k distinct indices out of n, uniformly, without
//   replacement (partial Fisher–Yates).
// - `shuffle`: uniform in-place permutation (full Fisher–Yates).
//
// Integer sampling uses rejection to avoid modulo bias. The generator core
// uses no floating point.

use serde::{Deserialize, Serialize};

/// Xoshiro256++ state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRng {
    s: [u64; 4],
}

impl GameRng {
    /// Create a generator from a `u64` seed. Equal seeds give equal streams.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Uniform integer in `[low, high)`.
    ///
    /// Panics if `low >= high`.
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "range_u64: low must be less than high");
        let range = high - low;
        if range.is_power_of_two() {
            return low + (self.next_u64() & (range - 1));
        }
        let threshold = range.wrapping_neg() % range;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % range);
            }
        }
    }

    /// Uniform `usize` in `[low, high)`.
    ///
    /// Panics if `low >= high`.
    pub fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.range_u64(low as u64, high as u64) as usize
    }

    /// Shuffle `items` in place. Every permutation is equally likely.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.range_usize(0, i + 1);
            items.swap(i, j);
        }
    }

    /// Pick `min(k, n)` distinct indices from `0..n`, uniformly at random.
    ///
    /// The returned order is itself random; callers that need sorted output
    /// should sort it.
    pub fn sample_indices(&mut self, n: usize, k: usize) -> Vec<usize> {
        let k = k.min(n);
        let mut pool: Vec<usize> = (0..n).collect();
        for i in 0..k {
            let j = self.range_usize(i, n);
            pool.swap(i, j);
        }
        pool.truncate(k);
        pool
    }
}

/// SplitMix64 step, used only to expand the seed into xoshiro state.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(43);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn range_usize_within_bounds() {
        let mut rng = GameRng::new(555);
        for _ in 0..10_000 {
            let v = rng.range_usize(5, 15);
            assert!((5..15).contains(&v), "range_usize out of range: {v}");
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = GameRng::new(7);
        let mut items: Vec<u32> = (0..30).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..30).collect::<Vec<_>>());
        // 30! orderings; landing on the identity would mean shuffle is a no-op.
        assert_ne!(items, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_handles_tiny_slices() {
        let mut rng = GameRng::new(1);
        let mut empty: [u8; 0] = [];
        rng.shuffle(&mut empty);
        let mut one = [9u8];
        rng.shuffle(&mut one);
        assert_eq!(one, [9]);
    }

    #[test]
    fn shuffle_visits_every_position() {
        // Element 0 of a 4-slice should end up in every slot eventually.
        let mut rng = GameRng::new(99);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let mut items = [0u8, 1, 2, 3];
            rng.shuffle(&mut items);
            let pos = items.iter().position(|&x| x == 0).unwrap();
            seen[pos] = true;
        }
        assert!(seen.iter().all(|&s| s), "positions reached: {seen:?}");
    }

    #[test]
    fn sample_indices_distinct_and_in_range() {
        let mut rng = GameRng::new(2024);
        for _ in 0..500 {
            let picked = rng.sample_indices(28, 15);
            assert_eq!(picked.len(), 15);
            let mut sorted = picked.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 15, "duplicate index in {picked:?}");
            assert!(picked.iter().all(|&i| i < 28));
        }
    }

    #[test]
    fn sample_indices_clamps_to_population() {
        let mut rng = GameRng::new(3);
        let mut picked = rng.sample_indices(5, 15);
        picked.sort_unstable();
        assert_eq!(picked, vec![0, 1, 2, 3, 4]);
        assert!(rng.sample_indices(0, 3).is_empty());
    }

    #[test]
    fn serialization_roundtrip_continues_stream() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: GameRng = serde_json::from_str(&json).unwrap();
        for _ in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }
}
