//! The interactive game loop.
//!
//! Owns everything the core library deliberately does not: turn alternation,
//! pass handling, game-over detection, human input and AI turns.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use verso_reversi::{choose_move, HeuristicKind, Move, State, DEFAULT_DEPTH};

use crate::storage;

/// Which sides are driven by the built-in AI.
#[derive(Clone, Copy, Debug, Default)]
pub struct Seats {
    pub black_ai: bool,
    pub white_ai: bool,
}

impl Seats {
    fn is_ai(self, state: &State) -> bool {
        match state.player {
            verso_reversi::Player::Black => self.black_ai,
            verso_reversi::Player::White => self.white_ai,
        }
    }
}

/// Play a full game on `state`, reading human moves from `input` and writing
/// to `output`. Returns once the game ends or the human quits.
pub fn run<R: BufRead, W: Write>(
    mut state: State,
    seats: Seats,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "Welcome to verso reversi!")?;
    writeln!(
        output,
        "Black (X) is {}, white (O) is {}. Black starts.",
        seat_name(seats.black_ai),
        seat_name(seats.white_ai)
    )?;

    loop {
        if state.is_game_over() {
            finish(&state, output)?;
            return Ok(());
        }

        if state.legal_moves().is_empty() {
            writeln!(output, "{} has no moves, the turn passes.", state.player)?;
            state = state.pass();
            continue;
        }

        let score = state.board.score();
        writeln!(output, "\n{}", state.board)?;
        writeln!(output, "Score: X {} - O {}", score.black, score.white)?;

        if seats.is_ai(&state) {
            let mv = choose_move(&state, DEFAULT_DEPTH, HeuristicKind::CoinParity);
            writeln!(output, "{} plays {}.", state.player, mv)?;
            state = state.apply(mv)?;
        } else {
            match human_turn(&state, input, output)? {
                Some(next) => state = next,
                // Quit requested (or end of input).
                None => return Ok(()),
            }
        }
    }
}

fn seat_name(ai: bool) -> &'static str {
    if ai {
        "the AI"
    } else {
        "human"
    }
}

/// Prompt until the human enters a legal move. `None` means quit.
fn human_turn<R: BufRead, W: Write>(
    state: &State,
    input: &mut R,
    output: &mut W,
) -> Result<Option<State>> {
    loop {
        writeln!(
            output,
            "{} to move. Enter a move (e.g. 'c4'), or 'q' to quit:",
            state.player
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();

        if line.eq_ignore_ascii_case("q") {
            offer_save(state, input, output)?;
            return Ok(None);
        }

        let mv: Move = match line.parse() {
            Ok(mv) => mv,
            Err(_) => {
                writeln!(output, "Cannot parse '{}'.", line)?;
                continue;
            }
        };

        match state.apply(mv) {
            Ok(next) => return Ok(Some(next)),
            Err(_) => {
                writeln!(
                    output,
                    "Move not valid. Legal moves: {}",
                    state.legal_moves()
                )?;
            }
        }
    }
}

fn offer_save<R: BufRead, W: Write>(state: &State, input: &mut R, output: &mut W) -> Result<()> {
    writeln!(output, "Quitting. Save the game first (y/N)?")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 || !line.trim().eq_ignore_ascii_case("y") {
        return Ok(());
    }

    writeln!(output, "Filename (default 'board.txt'):")?;
    output.flush()?;
    let mut name = String::new();
    input.read_line(&mut name)?;
    let name = name.trim();
    let path = PathBuf::from(if name.is_empty() { "board.txt" } else { name });

    storage::save(&path, state)?;
    writeln!(output, "Saved to {}.", path.display())?;
    Ok(())
}

fn finish<W: Write>(state: &State, output: &mut W) -> Result<()> {
    let score = state.board.score();
    writeln!(output, "\nGame over!")?;
    writeln!(output, "{}", state.board)?;
    writeln!(output, "Score: X {} - O {}", score.black, score.white)?;
    match state.winner() {
        Some(winner) => writeln!(output, "{} ({}) wins the game.", winner, winner.disc())?,
        None => writeln!(output, "Draw game, no winner.")?,
    }
    writeln!(output, "Thanks for playing!")?;
    Ok(())
}
