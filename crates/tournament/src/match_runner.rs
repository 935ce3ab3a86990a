//! Match runner for playing games between engines

use othello_core::{Board, Engine, Move, Stone};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::TournamentConfig;

/// Result of a single game from one engine's point of view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

/// Result of a match (multiple games) from engine1's point of view
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Total discs engine1 ended its games with
    pub discs_for: u32,
    pub discs_against: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Points fraction in [0, 1], draws counting half
    pub fn score(&self) -> f64 {
        let total = self.total_games();
        if total == 0 {
            return 0.5;
        }
        (f64::from(self.wins) + 0.5 * f64::from(self.draws)) / f64::from(total)
    }

    fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }
}

/// How a single game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub black_discs: u32,
    pub white_discs: u32,
    /// Plies played, passes included
    pub plies: u32,
    /// Stopped at `max_plies` before either side ran out of moves
    pub adjudicated: bool,
    /// Side that lost by returning an illegal move
    pub forfeit: Option<Stone>,
    pub final_board: Board,
}

impl GameRecord {
    /// Disc majority, unless a side forfeited. None means a draw.
    pub fn winner(&self) -> Option<Stone> {
        if let Some(loser) = self.forfeit {
            return Some(loser.opponent());
        }
        match self.black_discs.cmp(&self.white_discs) {
            std::cmp::Ordering::Greater => Some(Stone::Black),
            std::cmp::Ordering::Less => Some(Stone::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Outcome for whoever played `color`.
    pub fn result_for(&self, color: Stone) -> GameResult {
        match self.winner() {
            Some(w) if w == color => GameResult::Win,
            Some(_) => GameResult::Loss,
            None => GameResult::Draw,
        }
    }

    pub fn discs(&self, color: Stone) -> u32 {
        match color {
            Stone::Black => self.black_discs,
            Stone::White => self.white_discs,
            Stone::Empty => 0,
        }
    }
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: TournamentConfig,
}

impl MatchRunner {
    pub fn new(config: TournamentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    /// Run a match between two engines
    ///
    /// engine1 plays Black in the first game. Returns the result from
    /// engine1's perspective.
    pub fn run_match(&self, engine1: &mut dyn Engine, engine2: &mut dyn Engine) -> MatchResult {
        let mut result = MatchResult::new();

        for game_num in 0..self.config.games {
            let engine1_black = !self.config.alternate_colors || game_num % 2 == 0;
            let (engine1_color, record) = if engine1_black {
                (Stone::Black, self.play_game(engine1, engine2))
            } else {
                (Stone::White, self.play_game(engine2, engine1))
            };

            let game_result = record.result_for(engine1_color);
            result.record(game_result);
            result.discs_for += record.discs(engine1_color);
            result.discs_against += record.discs(engine1_color.opponent());

            info!(
                game = game_num + 1,
                of = self.config.games,
                engine1 = %engine1_color,
                black = record.black_discs,
                white = record.white_discs,
                plies = record.plies,
                adjudicated = record.adjudicated,
                result = ?game_result,
                "game finished"
            );
            if self.config.verbose {
                println!(
                    "Game {}/{}: {} {}-{} ({}) - Score: {}-{}-{}",
                    game_num + 1,
                    self.config.games,
                    if engine1_black { "B" } else { "W" },
                    record.black_discs,
                    record.white_discs,
                    match game_result {
                        GameResult::Win => "win",
                        GameResult::Loss => "loss",
                        GameResult::Draw => "draw",
                    },
                    result.wins,
                    result.losses,
                    result.draws
                );
                println!("{}", record.final_board);
            }
        }

        result
    }

    /// Play a single game from the initial position.
    pub fn play_game(&self, black: &mut dyn Engine, white: &mut dyn Engine) -> GameRecord {
        let mut board = Board::new();
        let mut side = Stone::Black;
        let mut plies = 0;
        let mut forfeit = None;
        black.new_game();
        white.new_game();

        while !board.is_game_over() {
            if plies >= self.config.max_plies {
                break;
            }
            plies += 1;

            if !board.has_valid_move(side) {
                debug!(%side, "forced pass");
                side = side.opponent();
                continue;
            }

            // Fresh limits per move so each search gets its own clock
            let limits = self.config.search_limits();
            let result = if side == Stone::Black {
                black.search(&board, side, limits)
            } else {
                white.search(&board, side, limits)
            };

            let legal = match result.best_move {
                Move::Place(pos) => board.place_stone(pos, side),
                Move::Pass => false,
            };
            if !legal {
                warn!(%side, mv = %result.best_move, "illegal move, forfeiting");
                forfeit = Some(side);
                break;
            }
            side = side.opponent();
        }

        let (black_discs, white_discs) = board.get_score();
        GameRecord {
            black_discs,
            white_discs,
            plies,
            adjudicated: forfeit.is_none() && !board.is_game_over(),
            forfeit,
            final_board: board,
        }
    }
}

/// Quick utility to run a single match
pub fn quick_match(
    engine1: &mut dyn Engine,
    engine2: &mut dyn Engine,
    games: u32,
) -> MatchResult {
    let config = TournamentConfig {
        games,
        ..Default::default()
    };
    MatchRunner::new(config).run_match(engine1, engine2)
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
