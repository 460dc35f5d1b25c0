//! Draughts-Rust: an English draughts engine.
//!
//! ## Usage
//!
//! - `draughts-rust` - Show a demo
//! - `draughts-rust dtp` - Start the DTP server for GUI integration
//! - `draughts-rust demo` - Run the demo
//! - `draughts-rust selfplay` - Let the engine play both sides

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;

use draughts_rust::constants::DEFAULT_DEPTH;
use draughts_rust::dtp::DtpEngine;
use draughts_rust::game::Game;
use draughts_rust::hint::serialize_board;
use draughts_rust::rules::Rules;
use draughts_rust::search::SearchConfig;

/// Draughts-Rust: an English draughts engine
#[derive(Parser)]
#[command(name = "draughts-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search depth below each candidate move
    #[arg(long, global = true, default_value_t = DEFAULT_DEPTH)]
    depth: u32,

    /// Seed for the engine's random choices
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Strict English rules: men capture forward only
    #[arg(long, global = true)]
    english: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the DTP (Draughts Text Protocol) server for use with GUI applications
    Dtp,
    /// Run a simple demo of the engine
    Demo,
    /// Let the engine play against itself
    Selfplay {
        /// Stop after this many turns without a result
        #[arg(long, default_value_t = 200)]
        max_turns: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let rules = if cli.english {
        Rules::english()
    } else {
        Rules::default()
    };
    let config = SearchConfig {
        depth: cli.depth,
        seed: cli.seed,
    };
    let game = Game::with_config(rules, config);

    match cli.command {
        Some(Commands::Dtp) => {
            info!("starting DTP server");
            DtpEngine::new(game).run()
        }
        Some(Commands::Selfplay { max_turns }) => run_selfplay(game, max_turns),
        Some(Commands::Demo) | None => run_demo(game),
    }
}

fn run_demo(mut game: Game) -> anyhow::Result<()> {
    println!("Draughts-Rust: English Draughts Engine\n");

    println!("=== Opening ===");
    println!("{}", game.board());

    let ok = game.move_piece(2, 5, 3, 4);
    println!("White (2, 5) to (3, 4): {ok}");
    println!("{}", game.board());

    println!("=== Engine reply ===");
    let task = game.spawn_hint();
    let hint = task.join()?;
    match hint {
        Some(mv) => println!("Hint for Black: {mv}"),
        None => println!("Black has no legal move"),
    }
    for mv in game.engine_ply() {
        println!("Black played {mv}");
    }
    println!("{}", game.board());

    println!("=== Advisor wire format ===");
    print!("{}", serialize_board(game.board(), game.turn()));
    Ok(())
}

fn run_selfplay(mut game: Game, max_turns: usize) -> anyhow::Result<()> {
    for turn in 1..=max_turns {
        let side = game.turn();
        let played = game.engine_ply();
        if played.is_empty() {
            break;
        }
        let line = played
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("{turn:3}. {side}: {line}");
    }

    println!("\n{}", game.board());
    match game.winner() {
        Some(color) => println!("{color} wins"),
        None => println!("No result after {max_turns} turns"),
    }
    Ok(())
}
