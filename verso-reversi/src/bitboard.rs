//! Low-level bitboard operations.
//!
//! For efficiency, [`Bitboard`] operations are unchecked: callers guarantee that
//! positions are below `size * size` for the board they work with.
//!
//! Under the hood everything is a u64. By convention bit 0 is the upper-left
//! cell and cells are numbered in row-major order, so the bit for `(row, col)`
//! on a board of edge `size` is `row * size + col`. Boards smaller than 8x8
//! simply leave the high bits unused.

use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, From, Into, Not};

/// Holds a single bit per cell of a Reversi board.
/// Wraps [`u64`] for efficient bit-twiddling, but avoids mixing with numerics.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    Default,
    From,
    Into,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

/// The row-major bit position of `(row, col)` on a board of edge `size`.
#[inline]
pub fn cell_index(row: usize, col: usize, size: usize) -> usize {
    row * size + col
}

impl Bitboard {
    /// The bitboard with no cells set.
    pub const EMPTY: Self = Self(0);

    /// Get the bit at `pos`.
    #[inline]
    pub fn get_bit(self, pos: usize) -> bool {
        (self.0 >> pos) & 1 == 1
    }

    /// Return a new bitboard with the bit at `pos` set or cleared.
    #[inline]
    pub fn set_bit(self, pos: usize, value: bool) -> Self {
        let mask = 1u64 << pos;
        if value {
            Self(self.0 | mask)
        } else {
            Self(self.0 & !mask)
        }
    }

    /// Count the number of occupied cells in the bitboard.
    #[inline]
    pub fn count_occupied(self) -> u32 {
        self.0.count_ones()
    }

    /// Return true if no cell is set.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The position of the lowest set bit. Undefined for an empty bitboard.
    #[inline]
    pub fn first_occupied(self) -> usize {
        self.0.trailing_zeros() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let bb = Bitboard::EMPTY.set_bit(0, true).set_bit(63, true);
        assert!(bb.get_bit(0));
        assert!(bb.get_bit(63));
        assert!(!bb.get_bit(1));
        assert_eq!(bb.count_occupied(), 2);
    }

    #[test]
    fn clearing_is_idempotent() {
        let bb = Bitboard::EMPTY.set_bit(5, true);
        let cleared = bb.set_bit(5, false);
        assert!(cleared.is_empty());
        assert_eq!(cleared.set_bit(5, false), cleared);
    }

    #[test]
    fn cell_index_is_row_major() {
        assert_eq!(cell_index(0, 0, 8), 0);
        assert_eq!(cell_index(0, 7, 8), 7);
        assert_eq!(cell_index(1, 0, 8), 8);
        assert_eq!(cell_index(7, 7, 8), 63);
        assert_eq!(cell_index(1, 1, 4), 5);
    }

    #[test]
    fn bit_ops_compose() {
        let a = Bitboard::from(0b1100u64);
        let b = Bitboard::from(0b1010u64);
        assert_eq!(a & b, Bitboard::from(0b1000u64));
        assert_eq!(a | b, Bitboard::from(0b1110u64));
        assert_eq!(a ^ b, Bitboard::from(0b0110u64));
    }
}
