// Game events: the internal timer queue and the events reported outward.
//
// Pair resolution is deferred. When the second card of a pair is flipped,
// the controller schedules a `ResolveMatch` or `ResolveMismatch` event some
// milliseconds ahead; the step loop (see `game.rs`) fires it once the clock
// gets there. Events sit in a min-heap keyed by `(tick, sequence)`, so equal
// ticks fire in scheduling order.
//
// Every scheduled event records the `Generation` it was created in. Starting
// a new game bumps the generation instead of purging the heap; an event from
// an older generation is dropped when it fires, so an old timer can never
// touch a freshly dealt deck.
//
// `GameEvent`s are the outward narrative: what happened, at which tick, for
// logs and front ends. They carry no state of their own.

use crate::types::{Generation, PairOutcome};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

// ---------------------------------------------------------------------------
// Internal scheduled events (priority queue)
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub tick: u64,
    /// Tiebreaker within a tick; lower fires first.
    pub sequence: u64,
    /// Game generation at scheduling time.
    pub generation: Generation,
    pub kind: ScheduledEventKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledEventKind {
    /// Mark both cards matched, clear the selection, check for a win.
    ResolveMatch { first: usize, second: usize },
    /// Turn both cards back over and clear the audition.
    ResolveMismatch { first: usize, second: usize },
}

// Min-heap on (tick, sequence): BinaryHeap is a max-heap, so compare reversed.
impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.tick == other.tick && self.sequence == other.sequence
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .tick
            .cmp(&self.tick)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Pending resolution timers, earliest first.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventQueue {
    heap: BinaryHeap<ScheduledEvent>,
    /// Monotonic counter; orders events that share a tick.
    next_sequence: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an event at `tick`, tagged with the game generation it
    /// belongs to.
    pub fn schedule(&mut self, tick: u64, generation: Generation, kind: ScheduledEventKind) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(ScheduledEvent {
            tick,
            sequence,
            generation,
            kind,
        });
    }

    /// Tick of the earliest pending event, stale or not.
    pub fn peek_tick(&self) -> Option<u64> {
        self.heap.peek().map(|e| e.tick)
    }

    /// Pop the earliest event if it is due at or before `up_to_tick`.
    pub fn pop_if_ready(&mut self, up_to_tick: u64) -> Option<ScheduledEvent> {
        if self.heap.peek().is_some_and(|e| e.tick <= up_to_tick) {
            self.heap.pop()
        } else {
            None
        }
    }

    /// Earliest pending tick among events of `generation`.
    pub fn next_tick_for(&self, generation: Generation) -> Option<u64> {
        self.heap
            .iter()
            .filter(|e| e.generation == generation)
            .map(|e| e.tick)
            .min()
    }
}

// ---------------------------------------------------------------------------
// Outward events
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub tick: u64,
    pub kind: GameEventKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventKind {
    /// A fresh deck was dealt.
    NewGameStarted { generation: Generation, card_count: usize },
    /// A click was accepted and the card is now exposed.
    CardFlipped { index: usize },
    /// Second card of a pair flipped; `attempts` is the new count.
    PairCompleted {
        first: usize,
        second: usize,
        attempts: u32,
        outcome: PairOutcome,
    },
    /// A match timer fired; both cards are now matched.
    PairMatched { first: usize, second: usize },
    /// A mismatch timer fired; both cards are face down again.
    PairMismatched { first: usize, second: usize },
    /// Every card is matched.
    GameWon { attempts: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(first: usize) -> ScheduledEventKind {
        ScheduledEventKind::ResolveMatch {
            first,
            second: first + 1,
        }
    }

    #[test]
    fn event_queue_ordering() {
        let g = Generation::default();
        let mut queue = EventQueue::new();
        queue.schedule(1000, g, resolve(0));
        queue.schedule(500, g, resolve(2));
        queue.schedule(500, g, resolve(4));

        let first = queue.pop_if_ready(2000).unwrap();
        assert_eq!((first.tick, first.sequence), (500, 1));
        let second = queue.pop_if_ready(2000).unwrap();
        assert_eq!((second.tick, second.sequence), (500, 2));
        let third = queue.pop_if_ready(2000).unwrap();
        assert_eq!(third.tick, 1000);
        assert!(queue.pop_if_ready(2000).is_none());
        assert_eq!(queue.peek_tick(), None);
    }

    #[test]
    fn pop_if_ready_respects_tick_limit() {
        let mut queue = EventQueue::new();
        queue.schedule(100, Generation::default(), resolve(0));
        assert!(queue.pop_if_ready(99).is_none());
        assert_eq!(queue.peek_tick(), Some(100));
        assert!(queue.pop_if_ready(100).is_some());
    }

    #[test]
    fn events_keep_their_generation() {
        let mut queue = EventQueue::new();
        let old = Generation(3);
        queue.schedule(10, old, resolve(0));
        queue.schedule(20, old.next(), resolve(0));
        assert_eq!(queue.pop_if_ready(100).unwrap().generation, old);
        assert_eq!(queue.pop_if_ready(100).unwrap().generation, Generation(4));
    }

    #[test]
    fn next_tick_for_skips_other_generations() {
        let mut queue = EventQueue::new();
        queue.schedule(10, Generation(0), resolve(0));
        queue.schedule(40, Generation(1), resolve(0));
        queue.schedule(30, Generation(1), resolve(2));
        assert_eq!(queue.peek_tick(), Some(10));
        assert_eq!(queue.next_tick_for(Generation(1)), Some(30));
        assert_eq!(queue.next_tick_for(Generation(2)), None);
    }
}
