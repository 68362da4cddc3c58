//! Board dynamics: the canonical opening, directional flip computation,
//! legal-move enumeration and scoring.
//!
//! A [`Board`] is a value: every operation returns a new board and never
//! mutates its input, so search code can hold boards for sibling branches
//! without aliasing concerns.

use crate::bitboard::{cell_index, Bitboard};
use crate::{Move, MoveList, Player, Score, MAX_EDGE_LENGTH, MAX_SPACES, MIN_EDGE_LENGTH};
use std::fmt;

/// The 8 compass offsets `(d_row, d_col)` a move can capture along.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board size {0} must be an even number between 2 and 8")]
    InvalidSize(usize),

    #[error("masks overlap or fall outside a {0}x{0} board")]
    InvalidMasks(usize),

    #[error("illegal move {mv} for {player}")]
    IllegalMove { player: Player, mv: Move },
}

/// A two-color occupancy board of fixed edge length.
///
/// Invariant: the black and white masks are disjoint and only use bits below
/// `size * size`. Constructors enforce this; operations preserve it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    size: usize,
    black: Bitboard,
    white: Bitboard,
}

impl Board {
    /// An empty board of edge `size`. Fails unless `size` is even and in [2, 8].
    pub fn empty(size: usize) -> Result<Self, BoardError> {
        if size < MIN_EDGE_LENGTH || size > MAX_EDGE_LENGTH || size % 2 != 0 {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            size,
            black: Bitboard::EMPTY,
            white: Bitboard::EMPTY,
        })
    }

    /// The canonical opening position: the central 2x2 block holds two discs
    /// per color, white on the main diagonal and black on the other.
    pub fn standard(size: usize) -> Result<Self, BoardError> {
        let board = Self::empty(size)?;
        let mid = size / 2;
        Ok(Self {
            white: board
                .white
                .set_bit(cell_index(mid - 1, mid - 1, size), true)
                .set_bit(cell_index(mid, mid, size), true),
            black: board
                .black
                .set_bit(cell_index(mid - 1, mid, size), true)
                .set_bit(cell_index(mid, mid - 1, size), true),
            ..board
        })
    }

    /// Build a board from raw color masks, e.g. a loaded position.
    /// Fails if the masks overlap or use bits outside the board.
    pub fn from_masks(size: usize, black: Bitboard, white: Bitboard) -> Result<Self, BoardError> {
        let board = Self::empty(size)?;
        let cells = size * size;
        let in_range = |mask: Bitboard| {
            cells == MAX_SPACES || u64::from(mask) < (1u64 << cells)
        };
        if !(black & white).is_empty() || !in_range(black) || !in_range(white) {
            return Err(BoardError::InvalidMasks(size));
        }
        Ok(Self {
            black,
            white,
            ..board
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn black(&self) -> Bitboard {
        self.black
    }

    #[inline]
    pub fn white(&self) -> Bitboard {
        self.white
    }

    /// The mask of `player`'s discs.
    #[inline]
    pub fn mask(&self, player: Player) -> Bitboard {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// A mask of every occupied cell.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.black | self.white
    }

    /// The disc at `(row, col)`, if any.
    pub fn disc_at(&self, row: usize, col: usize) -> Option<Player> {
        let index = cell_index(row, col, self.size);
        if self.black.get_bit(index) {
            Some(Player::Black)
        } else if self.white.get_bit(index) {
            Some(Player::White)
        } else {
            None
        }
    }

    /// Count the discs of each color.
    pub fn score(&self) -> Score {
        Score {
            black: self.black.count_occupied(),
            white: self.white.count_occupied(),
        }
    }

    /// The discs `player` would capture along one compass direction by playing
    /// `mv`, or an empty mask if the direction yields no capture.
    ///
    /// A direction captures when the cells adjacent to `mv` hold an unbroken
    /// run of opponent discs terminated by one of `player`'s own discs; a run
    /// that reaches an empty cell or the edge captures nothing.
    fn flips_along(&self, player: Player, mv: Move, d_row: isize, d_col: isize) -> Bitboard {
        let own = self.mask(player);
        let opponent = self.mask(!player);
        let edge = self.size as isize;

        let mut row = mv.row as isize + d_row;
        let mut col = mv.col as isize + d_col;
        let mut flips = Bitboard::EMPTY;

        while row >= 0 && row < edge && col >= 0 && col < edge {
            let index = cell_index(row as usize, col as usize, self.size);
            if own.get_bit(index) {
                return flips;
            }
            if !opponent.get_bit(index) {
                break;
            }
            flips = flips.set_bit(index, true);
            row += d_row;
            col += d_col;
        }
        Bitboard::EMPTY
    }

    /// Every disc `player` would capture by playing `mv`, across all 8
    /// directions. Empty iff the move is illegal (given an empty target cell).
    fn flips_for(&self, player: Player, mv: Move) -> Bitboard {
        DIRECTIONS
            .iter()
            .fold(Bitboard::EMPTY, |flips, &(d_row, d_col)| {
                flips | self.flips_along(player, mv, d_row, d_col)
            })
    }

    /// Whether `mv` is a legal placement for `player`.
    pub fn is_legal(&self, player: Player, mv: Move) -> bool {
        mv.row < self.size
            && mv.col < self.size
            && !self.occupied().get_bit(mv.to_index(self.size))
            && !self.flips_for(player, mv).is_empty()
    }

    /// Play `mv` for `player`, returning the resulting board.
    ///
    /// Fails without producing a partial board when the target is out of
    /// range, occupied by either color, or flips no disc in any direction.
    pub fn apply_move(&self, player: Player, mv: Move) -> Result<Self, BoardError> {
        let illegal = || BoardError::IllegalMove { player, mv };

        if mv.row >= self.size || mv.col >= self.size {
            return Err(illegal());
        }
        let target = mv.to_index(self.size);
        if self.occupied().get_bit(target) {
            return Err(illegal());
        }

        let flips = self.flips_for(player, mv);
        if flips.is_empty() {
            return Err(illegal());
        }

        let own = (self.mask(player) | flips).set_bit(target, true);
        let opponent = self.mask(!player) & !flips;
        Ok(match player {
            Player::Black => Self {
                black: own,
                white: opponent,
                ..*self
            },
            Player::White => Self {
                black: opponent,
                white: own,
                ..*self
            },
        })
    }

    /// Enumerate every legal placement for `player` as a bitmask.
    ///
    /// Sweeps all cells in row-major order and tests each non-destructively.
    /// An empty result means `player` must pass; the game is over only when
    /// both sides are in that position, which is the caller's call to make.
    pub fn legal_moves(&self, player: Player) -> MoveList {
        let mut mask = Bitboard::EMPTY;
        for row in 0..self.size {
            for col in 0..self.size {
                if self.is_legal(player, Move::new(row, col)) {
                    mask = mask.set_bit(cell_index(row, col, self.size), true);
                }
            }
        }
        MoveList::new(mask, self.size)
    }
}

/// Render the board as a grid: column letters on top, 1-indexed rows on the
/// left, `X` for black, `O` for white, `_` for empty.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..self.size {
            write!(f, " {}", "abcdefgh".chars().nth(col).ok_or(fmt::Error)?)?;
        }
        for row in 0..self.size {
            write!(f, "\n{} ", row + 1)?;
            for col in 0..self.size {
                let cell = match self.disc_at(row, col) {
                    Some(Player::Black) => 'X',
                    Some(Player::White) => 'O',
                    None => '_',
                };
                write!(f, " {}", cell)?;
            }
        }
        Ok(())
    }
}
