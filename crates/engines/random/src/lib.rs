//! Random Move Othello Engine
//!
//! Picks uniformly among the legal placements, passing when there are none.
//! Serves as the baseline opponent in matches and as a driver for playouts.

use othello_core::{Board, Engine, Move, Pos, SearchLimits, SearchResult, Stone};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[cfg(test)]
mod lib_tests;

/// An engine that plays random legal moves.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
    moves: Vec<Pos>,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible sequence of choices.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            moves: Vec::with_capacity(32),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, board: &Board, side: Stone, _limits: SearchLimits) -> SearchResult {
        board.valid_moves_into(side, &mut self.moves);

        let best_move = self
            .moves
            .choose(&mut self.rng)
            .map_or(Move::Pass, |&p| Move::Place(p));

        SearchResult {
            best_move,
            score: 0,
            depth: 1,
            nodes: 1,
            stopped: false,
        }
    }

    fn name(&self) -> &str {
        "Random"
    }
}
