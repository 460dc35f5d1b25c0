//! Draughts Text Protocol (DTP).
//!
//! A line-oriented command protocol modelled on GTP, so the engine can be
//! driven by a GUI or a script over stdin/stdout. Each command may carry a
//! numeric id; replies are `=id message` on success and `?id message` on
//! failure, followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return protocol version (1)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `clear_board` - Start a new game
//! - `play <fx> <fy> <tx> <ty>` - Play a move for the side to move
//! - `genmove` - Let the engine play a full turn and print its moves
//! - `hint` - Print the engine's choice without playing it
//! - `moves` - List the legal moves
//! - `turn` - Print the side to move
//! - `showboard` - Print the board
//! - `depth <n>` - Set the search depth
//!
//! ## Example
//!
//! ```ignore
//! use draughts_rust::dtp::DtpEngine;
//! let mut engine = DtpEngine::new(draughts_rust::game::Game::new());
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use log::warn;

use crate::board::Color;
use crate::game::Game;
use crate::moves::Move;

/// The list of known DTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "depth",
    "genmove",
    "hint",
    "known_command",
    "list_commands",
    "moves",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "turn",
    "version",
];

/// DTP engine state.
pub struct DtpEngine {
    game: Game,
}

fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

impl DtpEngine {
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop on stdin/stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run_with<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            if !success {
                warn!("command '{command_line}' failed: {message}");
            }

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());

        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Parse four board coordinates.
    fn parse_coords(args: &[&str]) -> Option<[usize; 4]> {
        if args.len() < 4 {
            return None;
        }
        let mut coords = [0usize; 4];
        for (slot, arg) in coords.iter_mut().zip(args) {
            *slot = arg.parse().ok()?;
        }
        Some(coords)
    }

    /// Execute a DTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "draughts-rust".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "clear_board" => {
                self.game.reset();
                (true, String::new())
            }

            "play" => {
                let Some([fx, fy, tx, ty]) = Self::parse_coords(args) else {
                    return (false, "expected four coordinates".to_string());
                };
                match self.game.try_move(fx, fy, tx, ty) {
                    Ok(_) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let played = self.game.engine_ply();
                if played.is_empty() {
                    (true, "resign".to_string())
                } else {
                    (true, format_moves(&played))
                }
            }

            "hint" => match self.game.hint() {
                Some(mv) => (true, mv.to_string()),
                None => (true, "none".to_string()),
            },

            "moves" => (true, format_moves(&self.game.legal_moves())),

            "turn" => (true, color_name(self.game.turn()).to_string()),

            "showboard" => (true, format!("\n{}", self.game.board())),

            "depth" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<u32>() {
                    Ok(depth) => {
                        self.game.searcher_mut().set_depth(depth);
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid depth".to_string()),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rules;
    use crate::search::SearchConfig;

    fn engine() -> DtpEngine {
        DtpEngine::new(Game::with_config(
            Rules::default(),
            SearchConfig {
                depth: 2,
                seed: Some(3),
            },
        ))
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = DtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = DtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = engine();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "draughts-rust");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();

        let (success, response) = engine.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["undo"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_play_and_turn() {
        let mut engine = engine();

        let (success, _) = engine.execute("play", &["2", "5", "3", "4"]);
        assert!(success);
        assert_eq!(engine.execute("turn", &[]), (true, "black".to_string()));

        let (success, message) = engine.execute("play", &["2", "5", "3", "4"]);
        assert!(!success);
        assert!(message.contains("no piece"), "got '{message}'");

        let (success, _) = engine.execute("play", &["2", "5"]);
        assert!(!success);
    }

    #[test]
    fn test_genmove_and_clear() {
        let mut engine = engine();

        let (success, response) = engine.execute("genmove", &[]);
        assert!(success);
        assert!(response.contains(" to "));
        assert_eq!(engine.game().turn(), Color::Black);

        let (success, _) = engine.execute("clear_board", &[]);
        assert!(success);
        assert!(engine.game().is_white_turn());
    }

    #[test]
    fn test_protocol_and_command_list() {
        let mut engine = engine();
        assert_eq!(engine.execute("protocol_version", &[]), (true, "1".to_string()));

        let (success, response) = engine.execute("list_commands", &[]);
        assert!(success);
        let listed: Vec<&str> = response.lines().collect();
        assert_eq!(listed, KNOWN_COMMANDS);
    }

    #[test]
    fn test_moves_command() {
        let mut engine = engine();
        let (success, response) = engine.execute("moves", &[]);
        assert!(success);
        assert_eq!(response.lines().count(), 7);
        assert!(response.lines().any(|l| l == "(2, 5) to (3, 4)"));
    }

    #[test]
    fn test_hint_does_not_play() {
        let mut engine = engine();
        let (success, response) = engine.execute("hint", &[]);
        assert!(success);
        let legal: Vec<String> = engine
            .game()
            .legal_moves()
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert!(legal.contains(&response), "hint '{response}' is not a legal move");
        assert!(engine.game().is_white_turn());
    }

    #[test]
    fn test_showboard_command() {
        let mut engine = engine();
        let (success, response) = engine.execute("showboard", &[]);
        assert!(success);
        assert!(response.starts_with('\n'));
        assert_eq!(response.matches('w').count(), 12);
        assert_eq!(response.matches('b').count(), 12);

        engine.execute("play", &["2", "5", "3", "4"]);
        let (_, after) = engine.execute("showboard", &[]);
        assert_ne!(after, response);
    }

    #[test]
    fn test_depth_command() {
        let mut engine = engine();
        assert!(engine.execute("depth", &["4"]).0);
        assert_eq!(engine.game.searcher_mut().config().depth, 4);
        assert!(!engine.execute("depth", &["deep"]).0);
    }

    #[test]
    fn test_run_with_script() {
        let mut engine = engine();
        let script = "1 name\n# comment\n\n2 play 2 5 3 4\n3 play 0 0 1 1\nquit\nname\n";
        let mut out = Vec::new();
        engine.run_with(script.as_bytes(), &mut out).expect("script runs");
        let out = String::from_utf8(out).expect("utf-8 output");

        assert!(out.contains("=1 draughts-rust"));
        assert!(out.contains("=2 \n"));
        assert!(out.contains("?3 Illegal move"));
        // Nothing is answered after quit.
        assert_eq!(out.matches("draughts-rust").count(), 1);
    }
}
