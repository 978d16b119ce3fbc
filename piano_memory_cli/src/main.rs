// Terminal front end for Piano Memory.
//
// Deals a deck with the standard triad catalog and plays it over stdin:
// type a card index to flip it, `new` for a fresh deck, `quit` to leave.
// Auditions go to the log (see `text.rs`); run with `RUST_LOG=debug` to also
// see rejected clicks and deck details.
//
// When a pair is complete the loop sleeps for the pending resolution delay
// and then advances the game clock, so the timer fires the same way it
// would under a real event loop.
//
// Usage:
//   piano-memory [--seed N] [--config FILE] [--pairs N] [--hide-notes] [--json]

mod text;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use piano_memory_game::config::GameConfig;
use piano_memory_game::event::GameEvent;
use piano_memory_game::game::MemoryGame;
use piano_memory_game::theory::TriadCatalog;
use piano_memory_game::types::ClickOutcome;
use piano_memory_game::view::Renderer;

use text::{LogBridge, TextRenderer};

type Game = MemoryGame<TriadCatalog, LogBridge>;

#[derive(Debug, Parser)]
#[command(name = "piano-memory", version, about = "Chord-matching memory game")]
struct Cli {
    /// Deck seed (default: derived from the system clock)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON game config; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of chord pairs to deal (overrides the config)
    #[arg(long)]
    pairs: Option<usize>,

    /// Show chord names only, not their notes
    #[arg(long)]
    hide_notes: bool,

    /// Print the board as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Flip(usize),
    NewGame,
    Quit,
    Blank,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    match line {
        "" => Input::Blank,
        "new" => Input::NewGame,
        "quit" | "q" | "exit" => Input::Quit,
        _ => line
            .parse()
            .map_or_else(|_| Input::Unknown(line.to_string()), Input::Flip),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(pairs) = cli.pairs {
        config.pair_count = pairs;
        config.validate().context("--pairs")?;
    }
    Ok(config)
}

fn show(game: &Game, renderer: &mut TextRenderer, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&game.view())?);
    } else {
        renderer.render(&game.view());
        print!("{}", renderer.output);
    }
    Ok(())
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        log::debug!("t={} {:?}", event.tick, event.kind);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let seed = cli.seed.unwrap_or_else(clock_seed);
    log::info!("seed {seed}");

    let mut game = MemoryGame::with_parts(seed, config, TriadCatalog, LogBridge)?;
    let mut renderer = TextRenderer::new(!cli.hide_notes);
    show(&game, &mut renderer, cli.json)?;

    for line in io::stdin().lock().lines() {
        match parse_input(&line?) {
            Input::Quit => break,
            Input::Blank => continue,
            Input::Unknown(text) => {
                println!("unknown command {text:?}: type a card index, `new` or `quit`");
                continue;
            }
            Input::NewGame => game.new_game(),
            Input::Flip(index) => {
                if let ClickOutcome::Rejected(reason) = game.on_card_click(index) {
                    println!("card {index} ignored ({reason:?})");
                    continue;
                }
            }
        }
        log_events(&game.take_events());
        show(&game, &mut renderer, cli.json)?;

        if let Some(due) = game.pending_resolution_tick() {
            thread::sleep(Duration::from_millis(due.saturating_sub(game.tick())));
            log_events(&game.advance_to(due).events);
            show(&game, &mut renderer, cli.json)?;
        }
        if game.state().is_won() {
            println!(
                "Solved in {} attempts. Type `new` to play again.",
                game.state().attempts()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_input(" 12 \n"), Input::Flip(12));
        assert_eq!(parse_input("new"), Input::NewGame);
        assert_eq!(parse_input("quit"), Input::Quit);
        assert_eq!(parse_input("   "), Input::Blank);
        assert_eq!(parse_input("-1"), Input::Unknown("-1".into()));
        assert_eq!(parse_input("flip"), Input::Unknown("flip".into()));
    }

    #[test]
    fn pairs_flag_overrides_config() {
        let cli = Cli::parse_from(["piano-memory", "--pairs", "4"]);
        assert_eq!(load_config(&cli).unwrap().pair_count, 4);
    }

    #[test]
    fn zero_pairs_rejected() {
        let cli = Cli::parse_from(["piano-memory", "--pairs", "0"]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn cli_flags_parse() {
        let cli = Cli::parse_from(["piano-memory", "--seed", "9", "--hide-notes", "--json"]);
        assert_eq!(cli.seed, Some(9));
        assert!(cli.hide_notes && cli.json);
        assert!(cli.config.is_none());
    }
}
