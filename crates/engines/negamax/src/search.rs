//! Negamax search with alpha-beta pruning and iterative deepening

use std::cmp::Reverse;

use othello_core::{weight, Board, Pos, Stone, TimeControl};
use tracing::debug;

use crate::eval::evaluate;
use crate::tt::{node_key, Bound, TTEntry, TranspositionTable};

/// Larger than any reachable evaluation.
pub const INFINITY: i32 = 1_000_000;

/// The deadline passed mid-search. Unwinds the whole tree back to the
/// iterative-deepening loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aborted;

/// Result of iterative deepening at the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best move of the deepest completed iteration (None if `side` cannot move)
    pub best_move: Option<Pos>,
    pub score: i32,
    /// Deepest completed iteration, 0 if none finished
    pub depth: u8,
    /// True if the deadline cut the search short
    pub stopped: bool,
}

/// Orders moves for search: the transposition move first, then the rest by
/// descending positional weight. The sort is stable, so equal weights keep
/// their row-major order.
pub fn order_moves(moves: &mut Vec<Pos>, tt_move: Option<Pos>) {
    moves.sort_by_key(|&p| Reverse(weight(p)));
    if let Some(i) = tt_move.and_then(|m| moves.iter().position(|&p| p == m)) {
        let m = moves.remove(i);
        moves.insert(0, m);
    }
}

/// Search state for one `best_move` call: the transposition table, the
/// deadline, and the node counter.
pub struct Searcher<'a> {
    tt: TranspositionTable,
    tc: &'a TimeControl,
    use_mobility: bool,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(tc: &'a TimeControl, use_mobility: bool) -> Self {
        Self {
            tt: TranspositionTable::new(),
            tc,
            use_mobility,
            nodes: 0,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[cfg(test)]
    pub fn table(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Searches even depths 2, 4, ... up to `max_depth` until the deadline.
    ///
    /// Each completed iteration replaces the chosen move with the root's
    /// transposition entry. An aborted iteration is discarded; if none
    /// completes, the highest-weight legal move stands.
    pub fn iterative_deepening(
        &mut self,
        board: &mut Board,
        side: Stone,
        max_depth: u8,
    ) -> SearchOutcome {
        self.tt.clear();

        let mut moves = board.get_valid_moves(side);
        order_moves(&mut moves, None);

        let mut outcome = SearchOutcome {
            best_move: moves.first().copied(),
            score: 0,
            depth: 0,
            stopped: false,
        };
        if moves.is_empty() {
            return outcome;
        }

        let root_key = node_key(board, side);
        for depth in (2..=max_depth.max(2)).step_by(2) {
            if self.tc.check_time() {
                outcome.stopped = true;
                break;
            }

            match self.negamax(board, depth, -INFINITY, INFINITY, side) {
                Ok(score) => {
                    if let Some(mv) = self.tt.probe(root_key).and_then(|e| e.best_move) {
                        outcome.best_move = Some(mv);
                    }
                    outcome.score = score;
                    outcome.depth = depth;
                    debug!(
                        depth,
                        score,
                        best = ?outcome.best_move,
                        nodes = self.nodes,
                        tt_entries = self.tt.len(),
                        "iteration complete"
                    );
                }
                Err(Aborted) => {
                    debug!(depth, nodes = self.nodes, "deadline hit mid-iteration");
                    outcome.stopped = true;
                    break;
                }
            }
        }

        outcome
    }

    /// Negamax with alpha-beta pruning. Returns the score of `board` from
    /// `side`'s perspective, or `Aborted` once the deadline has passed.
    pub fn negamax(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        side: Stone,
    ) -> Result<i32, Aborted> {
        self.nodes += 1;
        if self.tc.should_check_time(self.nodes) && self.tc.check_time() {
            return Err(Aborted);
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let key = node_key(board, side);

        let mut tt_move = None;
        if let Some(entry) = self.tt.probe(key) {
            tt_move = entry.best_move;
            if entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => return Ok(entry.score),
                    Bound::LowerBound => alpha = alpha.max(entry.score),
                    Bound::UpperBound => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    return Ok(entry.score);
                }
            }
        }

        if depth == 0 {
            return Ok(evaluate(board, side, self.use_mobility));
        }

        let mut moves = Vec::with_capacity(32);
        board.valid_moves_into(side, &mut moves);

        if moves.is_empty() {
            let opp = side.opponent();
            if !board.has_valid_move(opp) {
                return Ok(evaluate(board, side, self.use_mobility));
            }
            // Forced pass: costs a ply
            let score = self.negamax(board, depth - 1, -beta, -alpha, opp)?;
            return Ok(-score);
        }

        order_moves(&mut moves, tt_move);

        let mut best = -INFINITY;
        let mut best_move = moves[0];
        for mv in moves {
            board.place_stone(mv, side);
            let result = self.negamax(board, depth - 1, -beta, -alpha, side.opponent());
            board.undo();
            let score = -result?;

            if score > best {
                best = score;
                best_move = mv;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break; // Beta cutoff
            }
        }

        let bound = if best <= alpha_orig {
            Bound::UpperBound
        } else if best >= beta_orig {
            Bound::LowerBound
        } else {
            Bound::Exact
        };
        self.tt.store(
            key,
            TTEntry {
                depth,
                score: best,
                bound,
                best_move: Some(best_move),
            },
        );

        Ok(best)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
