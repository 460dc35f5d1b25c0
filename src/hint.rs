//! Text hint exchange with an external advisor.
//!
//! The board is sent as plain text: a `Current Turn:` header followed by
//! eight rows (y = 0 first), one token per cell (`.`, `W`, `B`, `WK`, `BK`),
//! each token followed by a space. The advisor answers in free text; a
//! suggested move is recovered from the first `(x, y) to (x, y)` pair found.
//!
//! Advisor failures never reach the rules or the search: [`request_hint`]
//! turns them into a user-visible message.

use log::{error, info};

use crate::board::{Board, Color};
use crate::constants::N;
use crate::moves::Square;
use crate::position::Position;

/// Instructions sent ahead of the board.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant for checkers. Provide the best move in standard notation.";

/// Shown when the advisor answers with nothing.
pub const NO_HINT: &str = "No hint available.";

/// Anything that can answer a hint prompt with free text.
///
/// `system` carries the standing instructions, `prompt` the position.
pub trait HintProvider {
    fn advise(&self, system: &str, prompt: &str) -> anyhow::Result<String>;
}

impl<F> HintProvider for F
where
    F: Fn(&str, &str) -> anyhow::Result<String>,
{
    fn advise(&self, system: &str, prompt: &str) -> anyhow::Result<String> {
        self(system, prompt)
    }
}

/// Outcome of a hint request, ready to show to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HintReply {
    /// The advisor's text, or an `Error: ...` message.
    pub text: String,
    /// The move found in the text, if any.
    pub suggestion: Option<(Square, Square)>,
}

/// Serialize a board for the advisor.
pub fn serialize_board(board: &Board, turn: Color) -> String {
    let mut out = format!("Current Turn: {turn}\n");
    for y in 0..N {
        for x in 0..N {
            out.push_str(board.get(x, y).token());
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

/// Full user prompt for a position.
pub fn build_prompt(pos: &Position) -> String {
    format!(
        "Current position:\n{}\nBest move?",
        serialize_board(&pos.board, pos.turn)
    )
}

/// Parse `(x, y)` at the first `(` of `s`, returning the square and the
/// rest of the string after `)`.
fn parse_pair(s: &str) -> Option<(Square, &str)> {
    let rest = s.strip_prefix('(')?;
    let close = rest.find(')')?;
    let (xs, ys) = rest[..close].split_once(',')?;
    let x: usize = xs.trim().parse().ok()?;
    let y: usize = ys.trim().parse().ok()?;
    if x >= N || y >= N {
        return None;
    }
    Some(((x, y), &rest[close + 1..]))
}

/// Find the first `(x, y) to (x, y)` in free text.
pub fn parse_reply(text: &str) -> Option<(Square, Square)> {
    text.match_indices('(').find_map(|(i, _)| {
        let (from, rest) = parse_pair(&text[i..])?;
        let rest = rest.strip_prefix(',').unwrap_or(rest);
        let rest = rest.trim_start().strip_prefix("to")?;
        let (to, _) = parse_pair(rest.trim_start())?;
        Some((from, to))
    })
}

/// Ask `provider` about `pos`.
pub fn request_hint(provider: &dyn HintProvider, pos: &Position) -> HintReply {
    let prompt = build_prompt(pos);
    info!("requesting hint for {}", pos.turn);
    match provider.advise(SYSTEM_PROMPT, &prompt) {
        Ok(text) if text.trim().is_empty() => HintReply {
            text: NO_HINT.to_string(),
            suggestion: None,
        },
        Ok(text) => {
            let suggestion = parse_reply(&text);
            HintReply { text, suggestion }
        }
        Err(e) => {
            error!("failed to get hint: {e:#}");
            HintReply {
                text: format!("Error: {e}"),
                suggestion: None,
            }
        }
    }
}
