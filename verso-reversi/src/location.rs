//! Code for working with cell coordinates ([`Move`]) on the board.

use crate::bitboard::{cell_index, Bitboard};
use crate::MAX_EDGE_LENGTH;
use std::fmt::{self, Display, Formatter, Write};

/// A target cell for a move: 0-indexed row and column.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    /// A distinguished out-of-range move returned by searches whose root was
    /// already terminal. Never legal on any board.
    pub const SENTINEL: Self = Self {
        row: usize::MAX,
        col: usize::MAX,
    };

    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether this is the terminal-root sentinel rather than a real cell.
    #[inline]
    pub fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }

    /// The row-major bit position of this move on a board of edge `size`.
    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        cell_index(self.row, self.col, size)
    }

    /// Convert from a row-major bit position on a board of edge `size`.
    #[inline]
    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }
}

/// Convert this [`Move`] into string notation: column letter, then 1-indexed
/// row ("c4"). The sentinel renders as "--".
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_sentinel() {
            return f.write_str("--");
        }
        let col_str = "abcdefgh".chars().nth(self.col).ok_or(fmt::Error)?;
        f.write_char(col_str)?;
        write!(f, "{}", self.row + 1)
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid move notation (expected a column letter and a row number, e.g. 'c4')")]
pub struct ParseMoveError;

/// Build a [`Move`] from notation like "c4" or "C 4" (case-insensitive,
/// interior spaces allowed, rows 1-indexed).
impl std::str::FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars().filter(|c| !c.is_whitespace());

        let col_char = chars.next().ok_or(ParseMoveError)?.to_ascii_lowercase();
        let col = "abcdefgh".find(col_char).ok_or(ParseMoveError)?;

        let row_str: String = chars.collect();
        let row: usize = row_str.parse().map_err(|_| ParseMoveError)?;
        if row == 0 || row > MAX_EDGE_LENGTH {
            return Err(ParseMoveError);
        }

        Ok(Self { row: row - 1, col })
    }
}

/// The legal moves out of a position, packed as a bitmask for the side to move.
/// Iterates in row-major order (rows outermost, columns innermost).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MoveList {
    mask: Bitboard,
    size: usize,
}

impl MoveList {
    #[inline]
    pub fn new(mask: Bitboard, size: usize) -> Self {
        Self { mask, size }
    }

    /// The raw legal-move bitmask.
    #[inline]
    pub fn mask(self) -> Bitboard {
        self.mask
    }

    /// Returns whether the side to move has no legal moves.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.mask.is_empty()
    }

    /// Returns whether `mv` is in this list.
    #[inline]
    pub fn contains(self, mv: Move) -> bool {
        mv.row < self.size && mv.col < self.size && self.mask.get_bit(mv.to_index(self.size))
    }
}

impl ExactSizeIterator for MoveList {
    fn len(&self) -> usize {
        self.mask.count_occupied() as usize
    }
}

impl Iterator for MoveList {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        if self.mask.is_empty() {
            return None;
        }

        let index = self.mask.first_occupied();
        self.mask = self.mask.set_bit(index, false);
        Some(Move::from_index(index, self.size))
    }
}

impl Display for MoveList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let string = self
            .into_iter()
            .map(|mv| mv.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        f.write_fmt(format_args!("[{}]", string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn move_index_round_trip() {
        assert_eq!(Move::new(0, 0).to_index(8), 0);
        assert_eq!(Move::new(7, 7).to_index(8), 63);
        assert_eq!(Move::from_index(63, 8), Move::new(7, 7));
        assert_eq!(Move::from_index(5, 4), Move::new(1, 1));
    }

    #[test]
    fn move_from_str_success() {
        assert_eq!(Move::from_str("a1"), Ok(Move::new(0, 0)));
        assert_eq!(Move::from_str("H8"), Ok(Move::new(7, 7)));
        assert_eq!(Move::from_str(" c 4 "), Ok(Move::new(3, 2)));
    }

    #[test]
    fn move_from_str_fail() {
        assert_eq!(Move::from_str(""), Err(ParseMoveError));
        assert_eq!(Move::from_str("i5"), Err(ParseMoveError));
        assert_eq!(Move::from_str("a0"), Err(ParseMoveError));
        assert_eq!(Move::from_str("a9"), Err(ParseMoveError));
        assert_eq!(Move::from_str("4c"), Err(ParseMoveError));
    }

    #[test]
    fn move_to_str() {
        assert_eq!(Move::new(0, 0).to_string(), "a1");
        assert_eq!(Move::new(7, 7).to_string(), "h8");
        assert_eq!(Move::from_str("e2").unwrap().to_string(), "e2");
        assert_eq!(Move::SENTINEL.to_string(), "--");
    }

    #[test]
    fn move_list_iterates_row_major() {
        // Bits 1 (row 0, col 1) and 4 (row 1, col 0) on a 4x4 board.
        let mask = Bitboard::EMPTY.set_bit(1, true).set_bit(4, true);
        let list = MoveList::new(mask, 4);
        assert_eq!(list.len(), 2);
        let moves: Vec<Move> = list.collect();
        assert_eq!(moves, vec![Move::new(0, 1), Move::new(1, 0)]);
    }

    #[test]
    fn move_list_contains() {
        let mask = Bitboard::EMPTY.set_bit(5, true);
        let list = MoveList::new(mask, 4);
        assert!(list.contains(Move::new(1, 1)));
        assert!(!list.contains(Move::new(1, 2)));
        assert!(!list.contains(Move::SENTINEL));
    }
}
