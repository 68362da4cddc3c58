//! Position evaluation at the search horizon.
//!
//! A heuristic is a capability: any [`Heuristic`] implementation can be handed
//! to the search entry points, which score positions for whichever player a
//! node says is to move.

use crate::{Player, State};
use std::fmt;

/// Scores a position for the side to move. Implementations must be pure:
/// the same state always evaluates to the same value, with no side effects.
pub trait Heuristic {
    fn evaluate(&self, state: &State) -> i32;
}

/// The mover's raw disc count.
pub struct DiscCount;

impl Heuristic for DiscCount {
    fn evaluate(&self, state: &State) -> i32 {
        let score = state.board.score();
        match state.player {
            Player::Black => score.black as i32,
            Player::White => score.white as i32,
        }
    }
}

/// Coin parity: `100 * (max - min) / (max + min)`, where `max` is the mover's
/// disc count and `min` the opponent's, truncated toward zero. Reachable
/// boards always hold at least the four opening discs; an empty board scores 0.
pub struct CoinParity;

impl Heuristic for CoinParity {
    fn evaluate(&self, state: &State) -> i32 {
        let score = state.board.score();
        let (max, min) = match state.player {
            Player::Black => (score.black as i32, score.white as i32),
            Player::White => (score.white as i32, score.black as i32),
        };
        if max + min == 0 {
            return 0;
        }
        (100.0 * f64::from(max - min) / f64::from(max + min)) as i32
    }
}

/// Names the built-in heuristics, for callers that pick one at run time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum HeuristicKind {
    DiscCount,
    #[default]
    CoinParity,
}

impl HeuristicKind {
    pub fn as_heuristic(self) -> &'static dyn Heuristic {
        match self {
            HeuristicKind::DiscCount => &DiscCount,
            HeuristicKind::CoinParity => &CoinParity,
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeuristicKind::DiscCount => f.write_str("disc-count"),
            HeuristicKind::CoinParity => f.write_str("coin-parity"),
        }
    }
}

impl std::str::FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disc-count" => Ok(HeuristicKind::DiscCount),
            "coin-parity" => Ok(HeuristicKind::CoinParity),
            other => Err(format!(
                "unknown heuristic '{}' (expected 'disc-count' or 'coin-parity')",
                other
            )),
        }
    }
}
