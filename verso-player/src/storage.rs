//! Plain-text position files.
//!
//! Format: the first meaningful line names the side to move (`X` or `O`);
//! each following line is one board row of `X`, `O` and `_` cells, whitespace
//! between cells optional. `#` starts a comment anywhere on a line. The grid
//! must be square with an even edge between 2 and 8.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use verso_reversi::bitboard::{cell_index, Bitboard};
use verso_reversi::{Board, Player, State, MAX_EDGE_LENGTH};

/// Parse a position file into a game state.
pub fn load(path: &Path) -> Result<State> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read position file {}", path.display()))?;
    parse(&text).with_context(|| format!("invalid position file {}", path.display()))
}

/// Write `state` back out in the same format `load` reads.
pub fn save(path: &Path, state: &State) -> Result<()> {
    fs::write(path, render(state))
        .with_context(|| format!("cannot write position file {}", path.display()))
}

fn parse(text: &str) -> Result<State> {
    let mut lines = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty());

    let player = match lines.next() {
        Some("X") => Player::Black,
        Some("O") => Player::White,
        Some(other) => bail!("expected side to move ('X' or 'O'), found '{}'", other),
        None => bail!("empty position file"),
    };

    let mut black = Bitboard::EMPTY;
    let mut white = Bitboard::EMPTY;
    let mut width = None;
    let mut rows = 0usize;

    for line in lines {
        let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
        let size = *width.get_or_insert(cells.len());
        if size > MAX_EDGE_LENGTH {
            bail!("board edge {} is wider than {}", size, MAX_EDGE_LENGTH);
        }
        if cells.len() != size {
            bail!(
                "row {} has {} cells, expected {}",
                rows + 1,
                cells.len(),
                size
            );
        }
        if rows == size {
            bail!("board has more than {} rows", size);
        }
        for (col, cell) in cells.iter().enumerate() {
            let index = cell_index(rows, col, size);
            match cell {
                'X' => black = black.set_bit(index, true),
                'O' => white = white.set_bit(index, true),
                '_' => {}
                other => bail!("unexpected character '{}' in row {}", other, rows + 1),
            }
        }
        rows += 1;
    }

    let Some(size) = width else {
        bail!("position file has no board rows");
    };
    if rows != size {
        bail!("board has {} rows, expected {}", rows, size);
    }

    let board = Board::from_masks(size, black, white)?;
    Ok(State::new(board, player))
}

fn render(state: &State) -> String {
    let size = state.board.size();
    let mut out = String::new();
    out.push(state.player.disc());
    out.push('\n');
    for row in 0..size {
        let cells: Vec<String> = (0..size)
            .map(|col| {
                state
                    .board
                    .disc_at(row, col)
                    .map_or('_', Player::disc)
                    .to_string()
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}
