//! `verso-reversi` is a Reversi library for configurable board sizes (2x2 up to 8x8).
//!
//! The package is split into a few layers:
//!
//!  - [`bitboard`] contains the raw bit operations for working with packed boards.
//!    These are unchecked and fast; callers guarantee positions stay in range.
//!  - [`Board`] implements the game dynamics: the canonical opening, directional
//!    flip computation, legal-move enumeration and scoring. Every operation is a
//!    pure function from board values to board values.
//!  - [`Algorithm`] and the search functions implement depth-limited adversarial
//!    searches (minimax, negamax, their alpha-beta variants and negascout) over
//!    a pluggable [`Heuristic`].
//!
//! All boards use a single cell convention: bit `row * size + col`, with bit 0
//! at the upper-left of the board.

pub mod bitboard;

mod board;
mod eval;
mod game;
mod location;
mod search;

pub use board::*;
pub use eval::*;
pub use game::*;
pub use location::*;
pub use search::*;

/// The smallest supported board edge.
pub const MIN_EDGE_LENGTH: usize = 2;

/// The largest supported board edge.
pub const MAX_EDGE_LENGTH: usize = 8;

/// The number of cells on the largest supported board.
pub const MAX_SPACES: usize = MAX_EDGE_LENGTH * MAX_EDGE_LENGTH;
