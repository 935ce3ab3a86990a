pub mod board;
pub mod perft;
pub mod session;
pub mod time_control;
pub mod types;
pub mod weights;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use perft::perft;
pub use session::*;
pub use time_control::*;
pub use types::*;
pub use weights::{POSITION_WEIGHTS, weight};
pub use zobrist::ZOBRIST;

// =============================================================================
// Engine trait: implemented by every move-choosing player (negamax, random)
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen move (`Move::Pass` if the side has no legal placement)
    pub best_move: Move,
    /// Evaluation from the searching side's perspective
    pub score: i32,
    /// Deepest fully completed iteration (0 when no search ran)
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether the deadline cut the search short
    pub stopped: bool,
}

impl SearchResult {
    /// A result produced without entering search.
    pub fn immediate(best_move: Move) -> Self {
        Self {
            best_move,
            score: 0,
            depth: 0,
            nodes: 0,
            stopped: false,
        }
    }
}

/// Trait that all engines implement so players can be swapped in a match.
pub trait Engine: Send {
    /// Choose a move for `side` on `board` within `limits`.
    fn search(&mut self, board: &Board, side: Stone, limits: SearchLimits) -> SearchResult;

    /// Display name used in match reports
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
