//! Depth-limited adversarial tree search.
//!
//! Five variants share one skeleton: enumerate legal moves in row-major order,
//! recurse into each child with a fresh board value, and evaluate the
//! [`Heuristic`] at the horizon. A node with no legal moves is terminal and is
//! evaluated where it stands; turn passing is the game loop's business, not
//! the search's.
//!
//! Tie-break contract: a child whose value *equals* the current best replaces
//! the recorded best move, so every search returns the last best move in
//! row-major order. Callers rely on this for reproducible play.
//!
//! The pruned variants cut a branch once `alpha >= beta`; they return the same
//! move and value as their unpruned counterparts and only visit fewer nodes.
//! To keep tie overwrites exact under pruning, each child is searched with the
//! bound on the best-tracking side backed off by one point, so any value that
//! comes back equal to the running best lies strictly inside the child's
//! window and is exact rather than a cut bound.

use crate::{Heuristic, HeuristicKind, Move, State};
use std::fmt;

/// Search depth used by the default automated player.
pub const DEFAULT_DEPTH: u32 = 2;

/// Effective infinity for search windows. Kept at `i32::MAX` so window bounds
/// can be negated without overflow.
const INF: i32 = i32::MAX;

/// The value of a subtree together with the move that achieves it.
/// The move is [`Move::SENTINEL`] for terminal nodes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct SearchOutcome {
    value: i32,
    mv: Move,
}

impl SearchOutcome {
    fn terminal(value: i32) -> Self {
        Self {
            value,
            mv: Move::SENTINEL,
        }
    }
}

/// Plain two-ply alternating minimax.
pub fn minimax(state: &State, depth: u32, heuristic: &dyn Heuristic) -> Move {
    minimax_value(state, depth, heuristic, true).mv
}

/// Negamax: minimax folded into one recursion with a `color` sign.
/// Chooses the same move as [`minimax`] and reports the same root value.
pub fn negamax(state: &State, depth: u32, heuristic: &dyn Heuristic) -> Move {
    negamax_value(state, depth, heuristic, 1).mv
}

/// Minimax with alpha-beta pruning. The default automated-player algorithm.
pub fn minimax_alphabeta(state: &State, depth: u32, heuristic: &dyn Heuristic) -> Move {
    minimax_alphabeta_value(state, depth, -INF, INF, heuristic, true).mv
}

/// Negamax with alpha-beta pruning.
pub fn negamax_alphabeta(state: &State, depth: u32, heuristic: &dyn Heuristic) -> Move {
    negamax_alphabeta_value(state, depth, -INF, INF, heuristic, 1).mv
}

/// Negascout (principal variation search): the first child gets the full
/// window, later children a null-window probe with a re-search on fail-high.
pub fn negascout(state: &State, depth: u32, heuristic: &dyn Heuristic) -> Move {
    negascout_value(state, depth, -INF, INF, heuristic, 1).mv
}

fn minimax_value(
    state: &State,
    depth: u32,
    heuristic: &dyn Heuristic,
    maximizing: bool,
) -> SearchOutcome {
    let moves = state.legal_moves();
    if depth == 0 || moves.is_empty() {
        return SearchOutcome::terminal(heuristic.evaluate(state));
    }

    let mut best = SearchOutcome::terminal(if maximizing { -INF } else { INF });
    for mv in moves {
        // Enumerated moves are legal by construction.
        let Ok(child) = state.apply(mv) else { continue };
        let value = minimax_value(&child, depth - 1, heuristic, !maximizing).value;
        let improves = if maximizing {
            value >= best.value
        } else {
            value <= best.value
        };
        if improves {
            best = SearchOutcome { value, mv };
        }
    }
    best
}

fn negamax_value(
    state: &State,
    depth: u32,
    heuristic: &dyn Heuristic,
    color: i32,
) -> SearchOutcome {
    let moves = state.legal_moves();
    if depth == 0 || moves.is_empty() {
        return SearchOutcome::terminal(heuristic.evaluate(state) * color);
    }

    let mut best = SearchOutcome::terminal(-INF);
    for mv in moves {
        let Ok(child) = state.apply(mv) else { continue };
        let value = -negamax_value(&child, depth - 1, heuristic, -color).value;
        if value >= best.value {
            best = SearchOutcome { value, mv };
        }
    }
    best
}

fn minimax_alphabeta_value(
    state: &State,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    heuristic: &dyn Heuristic,
    maximizing: bool,
) -> SearchOutcome {
    let moves = state.legal_moves();
    if depth == 0 || moves.is_empty() {
        return SearchOutcome::terminal(heuristic.evaluate(state));
    }

    if maximizing {
        let mut best = SearchOutcome::terminal(-INF);
        for mv in moves {
            let Ok(child) = state.apply(mv) else { continue };
            // One point of slack below alpha: a child value that comes back
            // equal to the running best is then strictly inside the window
            // and exact, so tie overwrites match the unpruned search.
            let lower = alpha.saturating_sub(1).max(-INF);
            let value =
                minimax_alphabeta_value(&child, depth - 1, lower, beta, heuristic, false).value;
            if value >= best.value {
                best = SearchOutcome { value, mv };
            }
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }
        best
    } else {
        let mut best = SearchOutcome::terminal(INF);
        for mv in moves {
            let Ok(child) = state.apply(mv) else { continue };
            let upper = beta.saturating_add(1).min(INF);
            let value =
                minimax_alphabeta_value(&child, depth - 1, alpha, upper, heuristic, true).value;
            if value <= best.value {
                best = SearchOutcome { value, mv };
            }
            beta = beta.min(value);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

fn negamax_alphabeta_value(
    state: &State,
    depth: u32,
    mut alpha: i32,
    beta: i32,
    heuristic: &dyn Heuristic,
    color: i32,
) -> SearchOutcome {
    let moves = state.legal_moves();
    if depth == 0 || moves.is_empty() {
        return SearchOutcome::terminal(heuristic.evaluate(state) * color);
    }

    let mut best = SearchOutcome::terminal(-INF);
    for mv in moves {
        let Ok(child) = state.apply(mv) else { continue };
        // Same slack as the minimax variant: values equal to the running
        // best are exact, so tie overwrites match the unpruned search.
        let lower = alpha.saturating_sub(1).max(-INF);
        let value =
            -negamax_alphabeta_value(&child, depth - 1, -beta, -lower, heuristic, -color).value;
        if value >= best.value {
            best = SearchOutcome { value, mv };
        }
        alpha = alpha.max(value);
        if alpha >= beta {
            break;
        }
    }
    best
}

fn negascout_value(
    state: &State,
    depth: u32,
    mut alpha: i32,
    beta: i32,
    heuristic: &dyn Heuristic,
    color: i32,
) -> SearchOutcome {
    let moves = state.legal_moves();
    if depth == 0 || moves.is_empty() {
        return SearchOutcome::terminal(heuristic.evaluate(state) * color);
    }

    let mut best = SearchOutcome::terminal(-INF);
    let mut first = true;
    for mv in moves {
        let Ok(child) = state.apply(mv) else { continue };
        // The probe keeps one point of slack below alpha, so a probe that
        // lands exactly on the running best is exact and tie overwrites
        // match the plain negamax search.
        let lower = alpha.saturating_sub(1).max(-INF);
        let value = if first {
            -negascout_value(&child, depth - 1, -beta, -lower, heuristic, -color).value
        } else {
            // Null-window probe; widen only when the probe fails high inside
            // the real window.
            let probe =
                -negascout_value(&child, depth - 1, -(alpha + 1), -lower, heuristic, -color).value;
            if probe > alpha && probe < beta {
                -negascout_value(&child, depth - 1, -beta, -probe, heuristic, -color).value
            } else {
                probe
            }
        };
        if value >= best.value {
            best = SearchOutcome { value, mv };
        }
        alpha = alpha.max(value);
        if alpha >= beta {
            return best;
        }
        first = false;
    }
    best
}

/// Names the five search variants, for callers that pick one at run time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Algorithm {
    Minimax,
    Negamax,
    #[default]
    AlphaBetaMinimax,
    AlphaBetaNegamax,
    Negascout,
}

impl Algorithm {
    /// Run this search variant. Returns [`Move::SENTINEL`] when the root is
    /// already terminal (depth 0 or no legal moves); callers that need a legal
    /// move back guarantee `depth >= 1` and a non-empty root move list.
    pub fn search(self, state: &State, depth: u32, heuristic: &dyn Heuristic) -> Move {
        match self {
            Algorithm::Minimax => minimax(state, depth, heuristic),
            Algorithm::Negamax => negamax(state, depth, heuristic),
            Algorithm::AlphaBetaMinimax => minimax_alphabeta(state, depth, heuristic),
            Algorithm::AlphaBetaNegamax => negamax_alphabeta(state, depth, heuristic),
            Algorithm::Negascout => negascout(state, depth, heuristic),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Minimax => "minimax",
            Algorithm::Negamax => "negamax",
            Algorithm::AlphaBetaMinimax => "alpha-beta minimax",
            Algorithm::AlphaBetaNegamax => "alpha-beta negamax",
            Algorithm::Negascout => "negascout",
        };
        f.write_str(name)
    }
}

/// The automated-player entry point: alpha-beta minimax at the given depth
/// with the named heuristic.
pub fn choose_move(state: &State, depth: u32, kind: HeuristicKind) -> Move {
    let mv = minimax_alphabeta(state, depth, kind.as_heuristic());
    log::debug!(
        "alpha-beta minimax (depth {}, {}) chose {} for {}",
        depth,
        kind,
        mv,
        state.player
    );
    mv
}

/// The default automated player: depth 2, coin parity.
pub fn default_player(state: &State) -> Move {
    choose_move(state, DEFAULT_DEPTH, HeuristicKind::CoinParity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::{cell_index, Bitboard};
    use crate::{Board, CoinParity, DiscCount, Move, State};

    const ALL: [Algorithm; 5] = [
        Algorithm::Minimax,
        Algorithm::Negamax,
        Algorithm::AlphaBetaMinimax,
        Algorithm::AlphaBetaNegamax,
        Algorithm::Negascout,
    ];

    /// A reproducible position a few plies into an 8x8 game.
    fn midgame() -> State {
        State::opening(8)
            .unwrap()
            .apply(Move::new(2, 3))
            .unwrap()
            .apply(Move::new(2, 2))
            .unwrap()
    }

    #[test]
    fn all_variants_return_legal_moves() {
        for size in [4, 6, 8] {
            let state = State::opening(size).unwrap();
            let legal = state.legal_moves();
            for algorithm in ALL {
                for depth in 1..=3 {
                    let mv = algorithm.search(&state, depth, &CoinParity);
                    assert!(
                        legal.contains(mv),
                        "{} depth {} on {}x{} returned illegal {}",
                        algorithm,
                        depth,
                        size,
                        size,
                        mv
                    );
                }
            }
        }
    }

    #[test]
    fn terminal_root_returns_sentinel() {
        let state = State::opening(8).unwrap();
        for algorithm in ALL {
            assert!(algorithm.search(&state, 0, &CoinParity).is_sentinel());
        }
        // 2x2 boards open with no legal moves at any depth.
        let full = State::opening(2).unwrap();
        for algorithm in ALL {
            assert!(algorithm.search(&full, 3, &CoinParity).is_sentinel());
        }
    }

    #[test]
    fn tie_break_returns_last_in_row_major_order() {
        // The 4x4 opening is symmetric under rotation and reflection, so all
        // four legal moves score identically under count-based heuristics at
        // any depth. The tie-break contract picks the last one: (3, 2).
        let state = State::opening(4).unwrap();
        for algorithm in ALL {
            for depth in 1..=3 {
                assert_eq!(
                    algorithm.search(&state, depth, &DiscCount),
                    Move::new(3, 2),
                    "{} depth {}",
                    algorithm,
                    depth
                );
                assert_eq!(
                    algorithm.search(&state, depth, &CoinParity),
                    Move::new(3, 2),
                    "{} depth {}",
                    algorithm,
                    depth
                );
            }
        }
    }

    #[test]
    fn pruning_preserves_minimax_outcome() {
        let openings = [
            State::opening(8).unwrap(),
            State::opening(6).unwrap(),
            State::opening(4).unwrap(),
        ];
        for state in openings.into_iter().chain([midgame()]) {
            for depth in 1..=4 {
                let plain = minimax_value(&state, depth, &CoinParity, true);
                let pruned = minimax_alphabeta_value(&state, depth, -INF, INF, &CoinParity, true);
                assert_eq!(plain.value, pruned.value, "depth {}", depth);
                assert_eq!(plain.mv, pruned.mv, "depth {}", depth);
            }
        }
    }

    #[test]
    fn pruning_preserves_negamax_outcome() {
        let openings = [
            State::opening(8).unwrap(),
            State::opening(6).unwrap(),
            State::opening(4).unwrap(),
        ];
        for state in openings.into_iter().chain([midgame()]) {
            for depth in 1..=4 {
                let plain = negamax_value(&state, depth, &CoinParity, 1);
                let pruned = negamax_alphabeta_value(&state, depth, -INF, INF, &CoinParity, 1);
                assert_eq!(plain.value, pruned.value, "depth {}", depth);
                assert_eq!(plain.mv, pruned.mv, "depth {}", depth);
            }
        }
    }

    /// Drive whole games and check at every position that the pruned
    /// searches return the exact (move, value) pair of their unpruned
    /// counterparts, ties included.
    #[test]
    fn pruning_matches_plain_search_in_played_games() {
        for (size, max_depth) in [(4, 3), (6, 3), (8, 2)] {
            let mut state = State::opening(size).unwrap();
            for _ in 0..(2 * size * size) {
                if state.is_game_over() {
                    break;
                }
                if state.legal_moves().is_empty() {
                    state = state.pass();
                    continue;
                }

                for depth in 1..=max_depth {
                    let plain = minimax_value(&state, depth, &DiscCount, true);
                    let pruned =
                        minimax_alphabeta_value(&state, depth, -INF, INF, &DiscCount, true);
                    assert_eq!(
                        (plain.mv, plain.value),
                        (pruned.mv, pruned.value),
                        "minimax depth {} on {}x{}\n{}",
                        depth,
                        size,
                        size,
                        state
                    );

                    let plain = negamax_value(&state, depth, &DiscCount, 1);
                    let pruned = negamax_alphabeta_value(&state, depth, -INF, INF, &DiscCount, 1);
                    assert_eq!(
                        (plain.mv, plain.value),
                        (pruned.mv, pruned.value),
                        "negamax depth {} on {}x{}\n{}",
                        depth,
                        size,
                        size,
                        state
                    );
                }

                let mv = minimax(&state, 2, &DiscCount);
                state = state.apply(mv).unwrap();
            }
        }
    }

    /// Black holds all of column b, white all of column c on a 4x4 board:
    /// every d-column cell captures, and the replies a move opens up differ
    /// from row to row, so best-move ties sit next to strictly worse moves.
    #[test]
    fn pruning_agrees_on_filled_column_position() {
        let size = 4;
        let mut black = Bitboard::EMPTY;
        let mut white = Bitboard::EMPTY;
        for row in 0..size {
            black = black.set_bit(cell_index(row, 1, size), true);
            white = white.set_bit(cell_index(row, 2, size), true);
        }
        let board = Board::from_masks(size, black, white).unwrap();
        let state = State::new(board, crate::Player::Black);

        for depth in 1..=3 {
            let plain = minimax_value(&state, depth, &DiscCount, true);
            let pruned = minimax_alphabeta_value(&state, depth, -INF, INF, &DiscCount, true);
            assert_eq!((plain.mv, plain.value), (pruned.mv, pruned.value), "depth {}", depth);

            let plain = negamax_value(&state, depth, &DiscCount, 1);
            let pruned = negamax_alphabeta_value(&state, depth, -INF, INF, &DiscCount, 1);
            assert_eq!((plain.mv, plain.value), (pruned.mv, pruned.value), "depth {}", depth);
        }
    }

    #[test]
    fn negascout_matches_negamax_value() {
        for state in [State::opening(8).unwrap(), State::opening(4).unwrap(), midgame()] {
            for depth in 1..=3 {
                let reference = negamax_value(&state, depth, &CoinParity, 1);
                let scout = negascout_value(&state, depth, -INF, INF, &CoinParity, 1);
                assert_eq!(reference.value, scout.value, "depth {}", depth);
            }
        }
    }

    #[test]
    fn negamax_matches_minimax_sign_convention() {
        for state in [State::opening(8).unwrap(), State::opening(4).unwrap(), midgame()] {
            for depth in 0..=3 {
                for heuristic in [&CoinParity as &dyn Heuristic, &DiscCount] {
                    let max_root = minimax_value(&state, depth, heuristic, true);
                    let nega_root = negamax_value(&state, depth, heuristic, 1);
                    assert_eq!(max_root.value, nega_root.value, "depth {}", depth);
                    assert_eq!(max_root.mv, nega_root.mv, "depth {}", depth);
                }
            }
        }
    }

    #[test]
    fn search_does_not_mutate_state() {
        let state = State::opening(8).unwrap();
        let copy = state;
        for algorithm in ALL {
            algorithm.search(&state, 3, &CoinParity);
        }
        assert_eq!(state, copy);
    }

    #[test]
    fn choose_move_uses_alphabeta_minimax() {
        let state = midgame();
        assert_eq!(
            choose_move(&state, DEFAULT_DEPTH, HeuristicKind::CoinParity),
            minimax_alphabeta(&state, DEFAULT_DEPTH, &CoinParity)
        );
        assert_eq!(default_player(&state), choose_move(&state, 2, HeuristicKind::CoinParity));
    }
}
