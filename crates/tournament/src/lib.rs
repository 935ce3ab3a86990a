//! Tournament Runner for Othello engines
//!
//! Plays engine-vs-engine matches and reports win/loss/draw tallies.
//!
//! # Usage
//!
//! ```bash
//! # Level 4 negamax against the random baseline
//! cargo run -p tournament -- match negamax:4 random --games 20
//!
//! # Settings from a file, 500 ms per move
//! cargo run -p tournament -- match negamax:2 negamax:5 --config match.toml --deadline 500
//! ```

mod config;
mod match_runner;

pub use config::*;
pub use match_runner::*;
