// Read-only view model for renderers.
//
// `GameView` is what a front end draws: one `CardView` per card with its
// derived face (a card is exposed while its index is in the flipped set and
// stays face up once matched), the attempt counter, the win flag and the
// current audition (chord + background color). Chord details are only
// present on face-up cards so a renderer cannot leak a face-down card.
//
// Renderers implement `Renderer`, a single method that receives the view.

use crate::bridge::Audition;
use crate::game::GameState;
use crate::theory::Color;
use crate::types::{CardId, Phase};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CardFace {
    FaceDown,
    /// Flipped in the current, unresolved pair.
    Exposed,
    Matched,
}

impl CardFace {
    pub fn is_face_up(self) -> bool {
        self != CardFace::FaceDown
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CardView<'a> {
    pub index: usize,
    pub id: &'a CardId,
    pub face: CardFace,
    pub name: Option<&'a str>,
    pub display_notes: Option<&'a str>,
    pub color: Option<Color>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GameView<'a> {
    pub cards: Vec<CardView<'a>>,
    pub attempts: u32,
    pub game_won: bool,
    pub phase: Phase,
    pub audition: Option<&'a Audition>,
}

impl<'a> GameView<'a> {
    pub fn new(state: &'a GameState, audition: Option<&'a Audition>) -> Self {
        let cards = state
            .cards()
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let face = if card.is_matched {
                    CardFace::Matched
                } else if state.flipped().contains(&index) {
                    CardFace::Exposed
                } else {
                    CardFace::FaceDown
                };
                let up = face.is_face_up();
                CardView {
                    index,
                    id: &card.id,
                    face,
                    name: up.then_some(card.chord.name.as_str()),
                    display_notes: up.then_some(card.chord.display_notes.as_str()),
                    color: up.then_some(card.color),
                }
            })
            .collect();
        Self {
            cards,
            attempts: state.attempts(),
            game_won: state.is_won(),
            phase: state.phase(),
            audition,
        }
    }

    /// Background color for the piano: the audition color, if any.
    pub fn background(&self) -> Option<Color> {
        self.audition.map(|a| a.color)
    }
}

pub trait Renderer {
    fn render(&mut self, view: &GameView<'_>);
}
