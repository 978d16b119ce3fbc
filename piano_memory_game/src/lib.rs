// The memory-game core.
//
// A deck of chord cards laid face down; the player flips two at a time,
// matching pairs stay face up, and the game is won when every card is
// matched. Each accepted flip auditions the chord through an `AudioBridge`
// (sound + piano highlight), and pair resolution happens on a timer.
//
// Module overview:
// - `game.rs`:    `GameState` and the `MemoryGame` controller: click handling,
//                 new game, the step loop that fires resolution timers.
// - `deck.rs`:    `GameCard` and the deck builder (pool → sample → pairs →
//                 shuffle).
// - `event.rs`:   Generation-tagged `EventQueue` for resolution timers, plus
//                 the `GameEvent`s reported to callers.
// - `command.rs`: `GameCommand` / `GameAction`: batched inbound input.
// - `bridge.rs`:  `AudioBridge` trait and the `Audition` it receives.
// - `view.rs`:    Read-only `GameView` for renderers and the `Renderer` trait.
// - `config.rs`:  `GameConfig` (pair count, octave, resolution delays).
// - `types.rs`:   Card ids, generation counter, phases, click outcomes.
// - `error.rs`:   `ConfigError`.
//
// Time is a millisecond tick counter owned by the controller. Nothing here
// reads the system clock or OS entropy: given a seed and a command sequence
// the game evolves identically every run.

pub mod bridge;
pub mod command;
pub mod config;
pub mod deck;
pub mod error;
pub mod event;
pub mod game;
pub mod types;
pub mod view;

pub use piano_memory_prng as prng;
pub use piano_memory_theory as theory;
