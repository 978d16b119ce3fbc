// Inbound commands.
//
// Everything a front end can ask of the game is a `GameAction`: flip a card
// or start over. Wrapped in a `GameCommand` with the tick it applies at,
// commands can be handed to `MemoryGame::step()` in batches alongside a
// target tick, and the step loop interleaves them with resolution timers in
// time order. `MemoryGame::on_card_click()` / `new_game()` are the
// single-command shorthands that apply at the current tick.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCommand {
    pub tick: u64,
    pub action: GameAction,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Flip the card at this deck index.
    CardClick { index: usize },
    /// Throw the current deck away and deal a fresh one.
    NewGame,
}

impl GameCommand {
    pub fn click(tick: u64, index: usize) -> Self {
        Self {
            tick,
            action: GameAction::CardClick { index },
        }
    }

    pub fn new_game(tick: u64) -> Self {
        Self {
            tick,
            action: GameAction::NewGame,
        }
    }
}
