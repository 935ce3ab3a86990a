//! Owned game session: the board a driver plays on, whose turn it is, an
//! append-only move log, and change notifications for subscribers.

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::board::Board;
use crate::types::{Move, Pos, Stone};

/// Change notifications raised by a successful placement or undo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    StonePlaced { pos: Pos, color: Stone },
    /// Every listed cell now holds `to`, the opposite of its previous occupant.
    StonesFlipped { positions: Vec<Pos>, to: Stone },
    ScoreChanged { black: u32, white: u32 },
}

/// A placement as it happened, for history and replay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub pos: Pos,
    pub color: Stone,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&BoardEvent) + Send>;

pub struct GameSession {
    board: Board,
    side_to_move: Stone,
    moves: Vec<MoveRecord>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            side_to_move: Stone::Black,
            moves: Vec::new(),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Resets to the opening position with Black to move. Subscribers stay.
    pub fn initialize(&mut self) {
        self.board.initialize();
        self.side_to_move = Stone::Black;
        self.moves.clear();
        let (black, white) = self.board.get_score();
        self.emit(BoardEvent::ScoreChanged { black, white });
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&BoardEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Independent copy of the board for a search to work on.
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    pub fn side_to_move(&self) -> Stone {
        self.side_to_move
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn get_stone(&self, pos: Pos) -> Stone {
        self.board.get_stone(pos)
    }

    pub fn can_place(&self, pos: Pos, color: Stone) -> bool {
        self.board.can_place(pos, color)
    }

    pub fn valid_moves(&self, color: Stone) -> Vec<Pos> {
        self.board.get_valid_moves(color)
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    pub fn get_score(&self) -> (u32, u32) {
        self.board.get_score()
    }

    /// Plays `color` on `pos` when it is that side's turn and the placement is
    /// legal. The turn then passes to the opponent, or stays with the mover
    /// when the opponent has no legal reply.
    pub fn place_stone(&mut self, pos: Pos, color: Stone) -> bool {
        if color != self.side_to_move || !self.board.place_stone(pos, color) {
            return false;
        }

        let flipped = self
            .board
            .last_record()
            .map(|r| r.flipped.clone())
            .unwrap_or_default();
        self.moves.push(MoveRecord {
            pos,
            color,
            timestamp: Utc::now(),
        });

        let opp = color.opponent();
        if self.board.has_valid_move(opp) || !self.board.has_valid_move(color) {
            self.side_to_move = opp;
        } else {
            trace!(side = %opp, "no legal reply, turn stays with {}", color);
        }

        self.emit(BoardEvent::StonePlaced { pos, color });
        self.emit(BoardEvent::StonesFlipped {
            positions: flipped,
            to: color,
        });
        let (black, white) = self.board.get_score();
        self.emit(BoardEvent::ScoreChanged { black, white });
        true
    }

    /// Applies an engine's answer for the side to move.
    pub fn play(&mut self, mv: Move) -> bool {
        match mv {
            Move::Place(pos) => self.place_stone(pos, self.side_to_move),
            Move::Pass => self.pass(),
        }
    }

    /// Hands the turn over. Only allowed when the side to move has no legal
    /// placement and the game is not over.
    pub fn pass(&mut self) -> bool {
        let side = self.side_to_move;
        if self.board.has_valid_move(side) || !self.board.has_valid_move(side.opponent()) {
            return false;
        }
        self.side_to_move = side.opponent();
        true
    }

    /// Reverts the last placement and gives the turn back to whoever made it.
    /// The move log is append-only and keeps the reverted entry.
    pub fn undo(&mut self) {
        let Some(record) = self.board.undo() else {
            return;
        };
        self.side_to_move = record.color;
        let (black, white) = self.board.get_score();
        self.emit(BoardEvent::ScoreChanged { black, white });
    }

    fn emit(&mut self, event: BoardEvent) {
        trace!(?event, "board event");
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
