//! Negamax Othello Engine
//!
//! Time-bounded iterative deepening over negamax with alpha-beta pruning and a
//! per-call transposition table, tuned by a difficulty level.
//!
//! # Usage
//!
//! ```no_run
//! use negamax_engine::{EngineConfig, SearchEngine};
//! use othello_core::{Board, Stone};
//!
//! # async fn demo() -> Result<(), negamax_engine::SearchError> {
//! let engine = SearchEngine::new(EngineConfig::default());
//! let board = Board::new();
//! let mv = engine.best_move(&board, Stone::Black, 4).await?;
//! println!("AI plays {mv}");
//! # Ok(())
//! # }
//! ```

mod config;
mod difficulty;
mod eval;
mod search;
mod tt;

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use othello_core::{Board, Engine, Move, SearchLimits, SearchResult, Stone, TimeControl};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info};

pub use config::{ConfigError, EngineConfig};
pub use difficulty::{Difficulty, ENDGAME_EMPTIES};
pub use eval::evaluate;
pub use search::{order_moves, SearchOutcome, INFINITY};
pub use tt::{Bound, TTEntry};

use search::Searcher;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The blocking worker running the search panicked or was cancelled.
    #[error("search worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Odd multiplier spreading consecutive call numbers across the seed space.
const SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// Move chooser shared by the async API and the [`Engine`] implementation.
///
/// Clones share the call counter, so a seeded engine handed to worker tasks
/// still draws a fresh stream on every call.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    config: EngineConfig,
    calls: Arc<AtomicU64>,
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            calls: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Random source for the next call. With a configured seed the n-th call
    /// of an engine always gets the same stream, and consecutive calls get
    /// different ones. Without a seed every call draws fresh entropy.
    pub fn call_rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => {
                let call = self.calls.fetch_add(1, Ordering::Relaxed);
                StdRng::seed_from_u64(seed ^ call.wrapping_mul(SEED_STEP))
            }
            None => StdRng::from_entropy(),
        }
    }

    /// Limits for one call: the configured deadline and the level's depth.
    pub fn limits_for(&self, difficulty: &Difficulty) -> SearchLimits {
        let deadline = self.config.deadline();
        SearchLimits {
            depth: difficulty.max_depth,
            move_time: Some(deadline),
            time_control: TimeControl::new(Some(deadline))
                .with_check_interval(self.config.check_interval),
        }
    }

    /// Chooses a move for `side` without blocking on anything but the search
    /// itself. The returned future owns a snapshot of `board` and runs the
    /// search on tokio's blocking pool, so the caller's thread stays free.
    pub fn best_move(
        &self,
        board: &Board,
        side: Stone,
        level: u8,
    ) -> impl Future<Output = Result<Move, SearchError>> + Send + 'static {
        let analysis = self.analyze(board, side, level);
        async move { Ok(analysis.await?.best_move) }
    }

    /// Like [`SearchEngine::best_move`] but resolves to the full search report.
    pub fn analyze(
        &self,
        board: &Board,
        side: Stone,
        level: u8,
    ) -> impl Future<Output = Result<SearchResult, SearchError>> + Send + 'static {
        let snapshot = board.clone();
        let engine = self.clone();
        async move {
            let result = tokio::task::spawn_blocking(move || {
                let difficulty = Difficulty::from_level(level);
                let mut rng = engine.call_rng();
                engine.think(&snapshot, side, &difficulty, &mut rng)
            })
            .await?;
            Ok(result)
        }
    }

    /// Synchronous search under the configured deadline.
    pub fn think<R: Rng + ?Sized>(
        &self,
        board: &Board,
        side: Stone,
        difficulty: &Difficulty,
        rng: &mut R,
    ) -> SearchResult {
        let limits = self.limits_for(difficulty);
        self.think_with_limits(board, side, difficulty, limits, rng)
    }

    /// Synchronous search under explicit limits. `limits.depth` further caps
    /// the level's depth outside the endgame.
    pub fn think_with_limits<R: Rng + ?Sized>(
        &self,
        board: &Board,
        side: Stone,
        difficulty: &Difficulty,
        limits: SearchLimits,
        rng: &mut R,
    ) -> SearchResult {
        let mut root = board.clone();
        let moves = root.get_valid_moves(side);

        match moves.as_slice() {
            [] => {
                debug!(%side, "no legal move, passing");
                return SearchResult::immediate(Move::Pass);
            }
            [only] => {
                debug!(%side, mv = %only, "single legal move");
                return SearchResult::immediate(Move::Place(*only));
            }
            _ => {}
        }

        if difficulty.error_probability > 0.0 && rng.gen_bool(difficulty.error_probability.min(1.0))
        {
            if let Some(&mv) = moves.choose(rng) {
                debug!(%side, %mv, level = difficulty.level, "playing a random move");
                return SearchResult::immediate(Move::Place(mv));
            }
        }

        let empties = root.empty_count();
        let max_depth = if difficulty.use_endgame_solver && empties <= ENDGAME_EMPTIES {
            difficulty.depth_for(empties)
        } else {
            difficulty.max_depth.min(limits.depth)
        };

        limits.start();
        let mut searcher = Searcher::new(&limits.time_control, difficulty.use_mobility);
        let outcome = searcher.iterative_deepening(&mut root, side, max_depth);

        let best_move = outcome.best_move.map_or(Move::Pass, Move::Place);
        info!(
            %side,
            mv = %best_move,
            score = outcome.score,
            depth = outcome.depth,
            nodes = searcher.nodes(),
            stopped = outcome.stopped,
            elapsed_ms = limits.time_control.elapsed().as_millis() as u64,
            "search finished"
        );

        SearchResult {
            best_move,
            score: outcome.score,
            depth: outcome.depth,
            nodes: searcher.nodes(),
            stopped: outcome.stopped,
        }
    }
}

/// [`Engine`] adapter playing at a fixed difficulty.
#[derive(Debug, Clone)]
pub struct NegamaxEngine {
    engine: SearchEngine,
    difficulty: Difficulty,
    /// Advances across moves and games
    rng: StdRng,
    name: String,
    nodes: u64,
}

impl NegamaxEngine {
    pub fn new(level: u8) -> Self {
        Self::with_config(EngineConfig {
            difficulty: level,
            ..EngineConfig::default()
        })
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let difficulty = Difficulty::from_level(config.difficulty);
        let engine = SearchEngine::new(config);
        Self {
            name: format!("Negamax L{}", engine.config().difficulty),
            rng: engine.call_rng(),
            engine,
            difficulty,
            nodes: 0,
        }
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    /// Total nodes searched since the last `new_game`.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Engine for NegamaxEngine {
    fn search(&mut self, board: &Board, side: Stone, limits: SearchLimits) -> SearchResult {
        let result =
            self.engine
                .think_with_limits(board, side, &self.difficulty, limits, &mut self.rng);
        self.nodes += result.nodes;
        result
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
