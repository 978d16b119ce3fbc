// Terminal front-end pieces: a plain-text board renderer and an audio
// bridge that logs instead of playing.
//
// The board is a grid of fixed-width cells, five per row. Face-down cards
// show their index so the player knows what to type; face-up cards show the
// chord name (and, unless hidden, its notes); matched cards are starred.

use piano_memory_game::bridge::AudioBridge;
use piano_memory_game::theory::{Color, Pitch};
use piano_memory_game::view::{CardFace, CardView, GameView, Renderer};

const COLUMNS: usize = 5;
const CELL_WIDTH: usize = 22;

pub struct TextRenderer {
    show_notes: bool,
    /// The last rendered board.
    pub output: String,
}

impl TextRenderer {
    pub fn new(show_notes: bool) -> Self {
        Self {
            show_notes,
            output: String::new(),
        }
    }

    fn cell(&self, card: &CardView<'_>) -> String {
        let label = match (card.face, card.name) {
            (CardFace::FaceDown, _) | (_, None) => format!("[{:>2}]", card.index),
            (face, Some(name)) => {
                let label = match card.display_notes {
                    Some(notes) if self.show_notes => format!("{name} ({notes})"),
                    _ => name.to_string(),
                };
                if face == CardFace::Matched {
                    format!("*{label}*")
                } else {
                    format!("{:>2}:{label}", card.index)
                }
            }
        };
        format!("{label:<CELL_WIDTH$}")
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, view: &GameView<'_>) {
        let mut out = String::new();
        for row in view.cards.chunks(COLUMNS) {
            let line: String = row.iter().map(|card| self.cell(card)).collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out.push_str(&format!("attempts: {}", view.attempts));
        if let Some(color) = view.background() {
            out.push_str(&format!("   background: {color}"));
        }
        if view.game_won {
            out.push_str("   solved!");
        }
        out.push('\n');
        self.output = out;
    }
}

/// Bridge that reports auditions through the logger.
#[derive(Debug, Default)]
pub struct LogBridge;

impl AudioBridge for LogBridge {
    fn audition(&mut self, pitches: &[Pitch], color: Color) {
        let notes: Vec<String> = pitches.iter().map(Pitch::to_string).collect();
        log::info!("audition [{}] on {color}", notes.join(" "));
    }

    fn clear_audition(&mut self) {
        log::info!("audition cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use piano_memory_game::config::GameConfig;
    use piano_memory_game::game::MemoryGame;
    use piano_memory_game::theory::TriadCatalog;

    fn game() -> MemoryGame<TriadCatalog, LogBridge> {
        let config = GameConfig {
            pair_count: 6,
            ..GameConfig::default()
        };
        MemoryGame::with_parts(3, config, TriadCatalog, LogBridge).unwrap()
    }

    #[test]
    fn fresh_board_shows_only_indices() {
        let game = game();
        let mut renderer = TextRenderer::new(true);
        game.render(&mut renderer);
        let lines: Vec<&str> = renderer.output.lines().collect();
        // 12 cards in rows of five, then the status line.
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("[ 0]"));
        assert!(lines[2].contains("[11]"));
        assert_eq!(lines[3], "attempts: 0");
    }

    #[test]
    fn exposed_card_shows_name_and_notes() {
        let mut game = game();
        game.on_card_click(1);
        let card = &game.state().cards()[1];
        let mut renderer = TextRenderer::new(true);
        game.render(&mut renderer);
        let expected = format!("1:{} ({})", card.chord.name, card.chord.display_notes);
        assert!(renderer.output.contains(&expected), "{}", renderer.output);
        assert!(renderer.output.contains(&format!("background: {}", card.color)));
    }

    #[test]
    fn hidden_notes_leave_the_name() {
        let mut game = game();
        game.on_card_click(0);
        let card = &game.state().cards()[0];
        let mut renderer = TextRenderer::new(false);
        game.render(&mut renderer);
        assert!(renderer.output.contains(&card.chord.name));
        assert!(!renderer.output.contains(&card.chord.display_notes));
    }
}
