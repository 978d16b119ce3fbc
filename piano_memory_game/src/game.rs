// Game state and the controller that drives it.
//
// `GameState` is the whole board: the cards, the (at most two) flipped
// indices of the pair in progress, the attempt counter and the win flag.
// Only `MemoryGame` mutates it. Whether a card shows its face is derived
// (`flipped` contains it, or it is matched); cards store no flip flag.
//
// `MemoryGame` owns the state plus everything needed to evolve it: the
// clock, the game generation, the PRNG, the config, the chord catalog and
// the audio bridge. It is generic over the catalog (so tests can feed a
// fixed pool) and the bridge (so tests can record calls).
//
// ## Click handling
//
// `on_card_click(index)` ignores the click (no state change, no bridge
// call) when:
//   - two cards are already exposed and waiting on their timer,
//   - the card is matched,
//   - the card is already exposed,
//   - the index is past the end of the deck.
// Otherwise the index joins `flipped` and the chord is auditioned. On the
// second flip `attempts` goes up by one, whatever the outcome, and a
// resolution event is scheduled:
//   - same chord id: `ResolveMatch` after `match_resolve_delay_ms`. When it
//     fires both cards become matched, `flipped` empties, and the game is
//     won if every card is now matched.
//   - different: `ResolveMismatch` after `mismatch_resolve_delay_ms`. When
//     it fires `flipped` empties and the audition is cleared.
//
// ## Time
//
// The clock is a millisecond tick. `step(commands, target_tick)` applies a
// sorted command batch and fires due timers in time order, the way the
// event loop would; `advance_by`/`advance_to` just move the clock.
//
// ## New game
//
// `new_game()` deals a fresh deck and resets attempts, win flag, selection
// and audition. It bumps the generation; timers from the old deck still sit
// in the queue but are dropped when they fire (see `event.rs`).

use crate::bridge::{AudioBridge, Audition, NullBridge};
use crate::command::{GameAction, GameCommand};
use crate::config::GameConfig;
use crate::deck::{GameCard, build_deck};
use crate::error::ConfigError;
use crate::event::{EventQueue, GameEvent, GameEventKind, ScheduledEvent, ScheduledEventKind};
use crate::prng::GameRng;
use crate::theory::{ChordCatalog, TriadCatalog};
use crate::types::{ClickOutcome, Generation, PairOutcome, Phase, RejectReason};
use crate::view::{GameView, Renderer};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The board of one game instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    cards: Vec<GameCard>,
    /// Indices of the pair in progress, in click order.
    flipped: SmallVec<[usize; 2]>,
    attempts: u32,
    game_won: bool,
}

impl GameState {
    pub fn new(cards: Vec<GameCard>) -> Self {
        Self {
            cards,
            flipped: SmallVec::new(),
            attempts: 0,
            game_won: false,
        }
    }

    pub fn cards(&self) -> &[GameCard] {
        &self.cards
    }

    pub fn flipped(&self) -> &[usize] {
        &self.flipped
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_won(&self) -> bool {
        self.game_won
    }

    /// Whether the card shows its face. Out-of-range indices are face down.
    pub fn is_flipped(&self, index: usize) -> bool {
        self.flipped.contains(&index) || self.cards.get(index).is_some_and(|c| c.is_matched)
    }

    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_matched).count()
    }

    fn all_matched(&self) -> bool {
        self.cards.iter().all(|c| c.is_matched)
    }

    pub fn phase(&self) -> Phase {
        if self.game_won {
            return Phase::Won;
        }
        match self.flipped.len() {
            0 => Phase::Idle,
            1 => Phase::OneFlipped,
            _ => Phase::Resolving,
        }
    }
}

/// Events produced by one call to `step()` (or gathered since the last one).
#[derive(Debug)]
pub struct StepResult {
    pub events: Vec<GameEvent>,
}

/// The memory-game controller.
pub struct MemoryGame<C = TriadCatalog, B = NullBridge> {
    tick: u64,
    generation: Generation,
    rng: GameRng,
    config: GameConfig,
    catalog: C,
    bridge: B,
    state: GameState,
    audition: Option<Audition>,
    event_queue: EventQueue,
    /// Events not yet handed out. Direct calls (`on_card_click`,
    /// `new_game`) only append here; the caller drains it through `step()`
    /// or `take_events()`.
    pending_events: Vec<GameEvent>,
}

impl MemoryGame {
    /// Headless game with the standard triad catalog and default config.
    pub fn new(seed: u64) -> Self {
        Self::deal_first(seed, GameConfig::default(), TriadCatalog, NullBridge)
    }
}

impl<C: ChordCatalog, B: AudioBridge> MemoryGame<C, B> {
    /// Build a game and deal its first deck. Fails if `config` does not
    /// validate; nothing is dealt in that case.
    pub fn with_parts(
        seed: u64,
        config: GameConfig,
        catalog: C,
        bridge: B,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::deal_first(seed, config, catalog, bridge))
    }

    fn deal_first(seed: u64, config: GameConfig, catalog: C, bridge: B) -> Self {
        let mut rng = GameRng::new(seed);
        let cards = build_deck(
            &catalog,
            config.pair_count,
            config.reference_octave,
            &mut rng,
        );
        log::info!("new game: {} cards, seed {seed}", cards.len());
        Self {
            tick: 0,
            generation: Generation::default(),
            rng,
            config,
            catalog,
            bridge,
            state: GameState::new(cards),
            audition: None,
            event_queue: EventQueue::new(),
            pending_events: Vec::new(),
        }
    }

    /// Current game clock in milliseconds.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Generation of the deck in play; bumped by every `new_game()`.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// The chord currently auditioned, if any.
    pub fn audition(&self) -> Option<&Audition> {
        self.audition.as_ref()
    }

    /// Tick at which the current game's pending resolution fires.
    pub fn pending_resolution_tick(&self) -> Option<u64> {
        self.event_queue.next_tick_for(self.generation)
    }

    /// Read-only snapshot for renderers.
    pub fn view(&self) -> GameView<'_> {
        GameView::new(&self.state, self.audition.as_ref())
    }

    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.render(&self.view());
    }

    /// Flip the card at `index` at the current tick.
    pub fn on_card_click(&mut self, index: usize) -> ClickOutcome {
        self.flip_card(index)
    }

    /// Discard the current game and deal a new one at the current tick.
    pub fn new_game(&mut self) {
        self.start_new_game();
    }

    /// Apply `commands` (sorted by tick) and advance to `target_tick`,
    /// firing every timer that comes due on the way.
    ///
    /// Commands at a tick are applied before timers at the same tick.
    /// Commands later than `target_tick` are ignored; commands earlier than
    /// the current tick apply immediately. The clock never runs backwards.
    pub fn step(&mut self, commands: &[GameCommand], target_tick: u64) -> StepResult {
        let target_tick = target_tick.max(self.tick);
        let mut cmd_idx = 0;

        loop {
            while let Some(cmd) = commands
                .get(cmd_idx)
                .filter(|c| c.tick <= self.tick && c.tick <= target_tick)
            {
                cmd_idx += 1;
                self.apply_command(cmd);
            }

            while let Some(event) = self.event_queue.pop_if_ready(self.tick) {
                self.process_event(event);
            }

            if self.tick >= target_tick {
                break;
            }

            let next_event_tick = self.event_queue.peek_tick();
            let next_cmd_tick = commands
                .get(cmd_idx)
                .filter(|c| c.tick <= target_tick)
                .map(|c| c.tick);
            self.tick = [next_event_tick, next_cmd_tick]
                .into_iter()
                .flatten()
                .min()
                .map_or(target_tick, |t| t.min(target_tick));
        }

        StepResult {
            events: self.take_events(),
        }
    }

    /// Advance to `target_tick` with no new input.
    pub fn advance_to(&mut self, target_tick: u64) -> StepResult {
        self.step(&[], target_tick)
    }

    /// Advance the clock by `millis`, saturating at `u64::MAX`.
    pub fn advance_by(&mut self, millis: u64) -> StepResult {
        self.step(&[], self.tick.saturating_add(millis))
    }

    /// Drain events produced by direct calls since the last `step()`.
    /// `step()` drains them too, returning them ahead of its own events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn apply_command(&mut self, cmd: &GameCommand) {
        match cmd.action {
            GameAction::CardClick { index } => {
                self.flip_card(index);
            }
            GameAction::NewGame => self.start_new_game(),
        }
    }

    fn emit(&mut self, kind: GameEventKind) {
        self.pending_events.push(GameEvent {
            tick: self.tick,
            kind,
        });
    }

    fn flip_card(&mut self, index: usize) -> ClickOutcome {
        let Some(card) = self.state.cards.get(index) else {
            log::warn!(
                "click on card {index} ignored: deck has {} cards",
                self.state.cards.len()
            );
            return ClickOutcome::Rejected(RejectReason::OutOfRange);
        };
        let rejection = if self.state.flipped.len() >= 2 {
            Some(RejectReason::Resolving)
        } else if card.is_matched {
            Some(RejectReason::AlreadyMatched)
        } else if self.state.flipped.contains(&index) {
            Some(RejectReason::AlreadyFlipped)
        } else {
            None
        };
        if let Some(reason) = rejection {
            log::debug!("click on card {index} ignored: {reason:?}");
            return ClickOutcome::Rejected(reason);
        }

        let audition = Audition {
            pitches: card.chord.pitches.clone(),
            color: card.color,
        };
        self.state.flipped.push(index);
        self.bridge.audition(&audition.pitches, audition.color);
        self.audition = Some(audition);
        self.emit(GameEventKind::CardFlipped { index });

        let (first, second) = match self.state.flipped.as_slice() {
            &[first, second] => (first, second),
            _ => return ClickOutcome::FirstFlip,
        };

        self.state.attempts += 1;
        let outcome = if self.state.cards[first].chord.id == self.state.cards[second].chord.id {
            PairOutcome::Match
        } else {
            PairOutcome::Mismatch
        };
        let (delay, kind) = match outcome {
            PairOutcome::Match => (
                self.config.match_resolve_delay_ms,
                ScheduledEventKind::ResolveMatch { first, second },
            ),
            PairOutcome::Mismatch => (
                self.config.mismatch_resolve_delay_ms,
                ScheduledEventKind::ResolveMismatch { first, second },
            ),
        };
        self.event_queue
            .schedule(self.tick.saturating_add(delay), self.generation, kind);
        self.emit(GameEventKind::PairCompleted {
            first,
            second,
            attempts: self.state.attempts,
            outcome,
        });
        ClickOutcome::PairCompleted(outcome)
    }

    fn process_event(&mut self, event: ScheduledEvent) {
        if event.generation != self.generation {
            log::debug!(
                "dropping {:?} from {} (now {})",
                event.kind,
                event.generation,
                self.generation
            );
            return;
        }
        match event.kind {
            ScheduledEventKind::ResolveMatch { first, second } => {
                self.resolve_match(first, second);
            }
            ScheduledEventKind::ResolveMismatch { first, second } => {
                self.resolve_mismatch(first, second);
            }
        }
    }

    fn resolve_match(&mut self, first: usize, second: usize) {
        for index in [first, second] {
            if let Some(card) = self.state.cards.get_mut(index) {
                card.is_matched = true;
            }
        }
        self.state.flipped.clear();
        self.emit(GameEventKind::PairMatched { first, second });

        // Checked against the cards as updated just above.
        if !self.state.game_won && self.state.all_matched() {
            self.state.game_won = true;
            log::info!("game won after {} attempts", self.state.attempts);
            self.emit(GameEventKind::GameWon {
                attempts: self.state.attempts,
            });
        }
    }

    fn resolve_mismatch(&mut self, first: usize, second: usize) {
        self.state.flipped.clear();
        self.audition = None;
        self.bridge.clear_audition();
        self.emit(GameEventKind::PairMismatched { first, second });
    }

    fn start_new_game(&mut self) {
        self.generation = self.generation.next();
        let cards = build_deck(
            &self.catalog,
            self.config.pair_count,
            self.config.reference_octave,
            &mut self.rng,
        );
        let card_count = cards.len();
        self.state = GameState::new(cards);
        self.audition = None;
        self.bridge.clear_audition();
        log::info!("new game ({}): {card_count} cards", self.generation);
        self.emit(GameEventKind::NewGameStarted {
            generation: self.generation,
            card_count,
        });
    }
}
