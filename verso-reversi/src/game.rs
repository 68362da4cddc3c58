//! Game-level types: players, turn state and scoring.
//!
//! [`State`] couples a board with the side to move. The interactive loop owns
//! turn alternation and pass handling; nothing in this module or in search
//! advances the turn implicitly.

use crate::{Board, BoardError, Move, MoveList};
use std::fmt;

/// One of the two players in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Default for Player {
    /// Gets the starting player (black).
    fn default() -> Self {
        Self::Black
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    /// Gets the other player.
    fn not(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl Player {
    /// The board character for this player's discs.
    pub fn disc(self) -> char {
        match self {
            Player::Black => 'X',
            Player::White => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("black"),
            Player::White => f.write_str("white"),
        }
    }
}

/// Disc counts for both colors. `black + white` never exceeds the cell count.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Score {
    pub black: u32,
    pub white: u32,
}

/// A board together with the side to move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct State {
    pub board: Board,
    pub player: Player,
}

impl State {
    /// The opening position of a game on a board of edge `size`, black to move.
    pub fn opening(size: usize) -> Result<Self, BoardError> {
        Ok(Self {
            board: Board::standard(size)?,
            player: Player::default(),
        })
    }

    #[inline]
    pub fn new(board: Board, player: Player) -> Self {
        Self { board, player }
    }

    /// The legal placements for the side to move.
    #[inline]
    pub fn legal_moves(&self) -> MoveList {
        self.board.legal_moves(self.player)
    }

    /// Play `mv` for the side to move and hand the turn to the opponent.
    pub fn apply(&self, mv: Move) -> Result<Self, BoardError> {
        Ok(Self {
            board: self.board.apply_move(self.player, mv)?,
            player: !self.player,
        })
    }

    /// Hand the turn to the opponent without placing a disc.
    #[inline]
    pub fn pass(&self) -> Self {
        Self {
            board: self.board,
            player: !self.player,
        }
    }

    /// The game ends when neither side has a legal placement.
    pub fn is_game_over(&self) -> bool {
        self.legal_moves().is_empty() && self.pass().legal_moves().is_empty()
    }

    /// The player with the most discs, or `None` on a draw.
    pub fn winner(&self) -> Option<Player> {
        let score = self.board.score();
        match score.black.cmp(&score.white) {
            std::cmp::Ordering::Greater => Some(Player::Black),
            std::cmp::Ordering::Less => Some(Player::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "{} ({}) to move", self.player, self.player.disc())
    }
}
