use std::fmt;

use thiserror::Error;

use crate::types::*;
use crate::weights::weight;
use crate::zobrist::ZOBRIST;

/// One reversible placement: the cell played, the mover, and every cell it flipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndoRecord {
    pub pos: Pos,
    pub color: Stone,
    pub flipped: Vec<Pos>,
}

/// Snapshot of the incrementally maintained bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Tally {
    pub black_count: u32,
    pub white_count: u32,
    pub black_weight: i32,
    pub white_weight: i32,
    pub hash: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiagramError {
    #[error("expected 8 rows, found {0}")]
    RowCount(usize),
    #[error("row {row} has {len} cells, expected 8")]
    RowLength { row: usize, len: usize },
    #[error("unknown cell character {ch:?} in row {row}")]
    BadCell { row: usize, ch: char },
}

/// An 8x8 Othello board with incremental counts, positional weights and
/// Zobrist hash, plus an undo stack of every successful placement.
#[derive(Clone, Debug)]
pub struct Board {
    cells: [Stone; NUM_CELLS],
    tally: Tally,
    history: Vec<UndoRecord>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board set up with the four opening stones.
    pub fn new() -> Self {
        let mut b = Self::empty();
        b.initialize();
        b
    }

    /// A board with no stones at all.
    pub fn empty() -> Self {
        Self {
            cells: [Stone::Empty; NUM_CELLS],
            tally: Tally::default(),
            history: Vec::with_capacity(NUM_CELLS),
        }
    }

    /// Clears everything and places the opening cluster:
    /// White on d4/e5 (3,3)/(4,4), Black on e4/d5 (3,4)/(4,3).
    pub fn initialize(&mut self) {
        self.cells = [Stone::Empty; NUM_CELLS];
        self.tally = Tally::default();
        self.history.clear();

        self.put(Pos::new(3, 3), Stone::White);
        self.put(Pos::new(4, 4), Stone::White);
        self.put(Pos::new(3, 4), Stone::Black);
        self.put(Pos::new(4, 3), Stone::Black);
    }

    /// Parses eight rows of `.`, `B`/`X`, `W`/`O` (whitespace between cells is
    /// ignored). Bookkeeping is computed from scratch and history starts empty.
    pub fn from_diagram(text: &str) -> Result<Self, DiagramError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(DiagramError::RowCount(rows.len()));
        }

        let mut b = Self::empty();
        for (r, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return Err(DiagramError::RowLength {
                    row: r,
                    len: cells.len(),
                });
            }
            for (c, &ch) in cells.iter().enumerate() {
                let stone = match ch {
                    '.' | '-' => Stone::Empty,
                    'B' | 'b' | 'X' | 'x' => Stone::Black,
                    'W' | 'w' | 'O' | 'o' => Stone::White,
                    _ => return Err(DiagramError::BadCell { row: r, ch }),
                };
                if stone.is_color() {
                    b.put(Pos::new(r as i8, c as i8), stone);
                }
            }
        }
        Ok(b)
    }

    /// Stone on `pos`; `Empty` for positions off the board.
    #[inline]
    pub fn get_stone(&self, pos: Pos) -> Stone {
        if pos.is_valid() {
            self.cells[pos.index()]
        } else {
            Stone::Empty
        }
    }

    pub fn can_place(&self, pos: Pos, color: Stone) -> bool {
        if !color.is_color() || !pos.is_valid() || self.cells[pos.index()] != Stone::Empty {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.run_length(pos, color, dr, dc) > 0)
    }

    /// Every opponent stone that placing `color` on `pos` would flip.
    /// Empty when the placement is illegal.
    pub fn get_flippable(&self, pos: Pos, color: Stone) -> Vec<Pos> {
        let mut out = Vec::new();
        self.flippable_into(pos, color, &mut out);
        out
    }

    fn flippable_into(&self, pos: Pos, color: Stone, out: &mut Vec<Pos>) {
        if !color.is_color() || !pos.is_valid() || self.cells[pos.index()] != Stone::Empty {
            return;
        }
        for (dr, dc) in DIRECTIONS {
            let n = self.run_length(pos, color, dr, dc);
            let mut p = pos;
            for _ in 0..n {
                p = p.offset(dr, dc);
                out.push(p);
            }
        }
    }

    /// Length of the opponent run starting next to `pos` in direction (dr, dc)
    /// if it is capped by a `color` stone, otherwise 0.
    fn run_length(&self, pos: Pos, color: Stone, dr: i8, dc: i8) -> usize {
        let opp = color.opponent();
        let mut p = pos.offset(dr, dc);
        let mut n = 0;
        while p.is_valid() {
            let s = self.cells[p.index()];
            if s == opp {
                n += 1;
                p = p.offset(dr, dc);
            } else if s == color {
                return n;
            } else {
                return 0;
            }
        }
        0
    }

    /// Legal placements for `color` in row-major order.
    pub fn get_valid_moves(&self, color: Stone) -> Vec<Pos> {
        let mut moves = Vec::with_capacity(32);
        self.valid_moves_into(color, &mut moves);
        moves
    }

    pub fn valid_moves_into(&self, color: Stone, moves: &mut Vec<Pos>) {
        moves.clear();
        for idx in 0..NUM_CELLS {
            let p = Pos::from_index(idx);
            if self.can_place(p, color) {
                moves.push(p);
            }
        }
    }

    pub fn has_valid_move(&self, color: Stone) -> bool {
        (0..NUM_CELLS).any(|idx| self.can_place(Pos::from_index(idx), color))
    }

    pub fn move_count(&self, color: Stone) -> usize {
        (0..NUM_CELLS)
            .filter(|&idx| self.can_place(Pos::from_index(idx), color))
            .count()
    }

    /// Places `color` on `pos` and flips every capped run. Returns false and
    /// leaves the board untouched when the placement is illegal.
    pub fn place_stone(&mut self, pos: Pos, color: Stone) -> bool {
        let mut flipped = Vec::with_capacity(16);
        self.flippable_into(pos, color, &mut flipped);
        if flipped.is_empty() {
            return false;
        }

        self.put(pos, color);
        for &p in &flipped {
            self.put(p, color);
        }
        self.history.push(UndoRecord {
            pos,
            color,
            flipped,
        });
        true
    }

    /// Reverts the most recent placement. Returns the reverted record, or
    /// None when there is nothing to undo.
    pub fn undo(&mut self) -> Option<UndoRecord> {
        let record = self.history.pop()?;
        self.put(record.pos, Stone::Empty);
        let previous = record.color.opponent();
        for &p in &record.flipped {
            self.put(p, previous);
        }
        Some(record)
    }

    /// The most recent placement, if any.
    pub fn last_record(&self) -> Option<&UndoRecord> {
        self.history.last()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_game_over(&self) -> bool {
        !self.has_valid_move(Stone::Black) && !self.has_valid_move(Stone::White)
    }

    /// Disc majority. None means a tie.
    pub fn winner(&self) -> Option<Stone> {
        let (b, w) = self.get_score();
        match b.cmp(&w) {
            std::cmp::Ordering::Greater => Some(Stone::Black),
            std::cmp::Ordering::Less => Some(Stone::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// (black, white) disc counts.
    pub fn get_score(&self) -> (u32, u32) {
        (self.tally.black_count, self.tally.white_count)
    }

    pub fn count(&self, color: Stone) -> u32 {
        match color {
            Stone::Black => self.tally.black_count,
            Stone::White => self.tally.white_count,
            Stone::Empty => NUM_CELLS as u32 - self.filled_count(),
        }
    }

    pub fn weighted_score(&self, color: Stone) -> i32 {
        match color {
            Stone::Black => self.tally.black_weight,
            Stone::White => self.tally.white_weight,
            Stone::Empty => 0,
        }
    }

    pub fn filled_count(&self) -> u32 {
        self.tally.black_count + self.tally.white_count
    }

    pub fn empty_count(&self) -> u32 {
        NUM_CELLS as u32 - self.filled_count()
    }

    /// Zobrist hash of the occupied cells.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.tally.hash
    }

    /// Incrementally maintained bookkeeping.
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Bookkeeping recomputed from the grid alone.
    pub fn recompute(&self) -> Tally {
        let mut t = Tally::default();
        for idx in 0..NUM_CELLS {
            let p = Pos::from_index(idx);
            match self.cells[idx] {
                Stone::Black => {
                    t.black_count += 1;
                    t.black_weight += weight(p);
                }
                Stone::White => {
                    t.white_count += 1;
                    t.white_weight += weight(p);
                }
                Stone::Empty => continue,
            }
            t.hash ^= ZOBRIST.stone_key(p, self.cells[idx]);
        }
        t
    }

    /// Sets a cell and moves its contribution between the two sides' tallies.
    fn put(&mut self, pos: Pos, to: Stone) {
        let idx = pos.index();
        let from = self.cells[idx];
        if from == to {
            return;
        }
        let w = weight(pos);
        match from {
            Stone::Black => {
                self.tally.black_count -= 1;
                self.tally.black_weight -= w;
            }
            Stone::White => {
                self.tally.white_count -= 1;
                self.tally.white_weight -= w;
            }
            Stone::Empty => {}
        }
        match to {
            Stone::Black => {
                self.tally.black_count += 1;
                self.tally.black_weight += w;
            }
            Stone::White => {
                self.tally.white_count += 1;
                self.tally.white_weight += w;
            }
            Stone::Empty => {}
        }
        self.tally.hash ^= ZOBRIST.stone_key(pos, from) ^ ZOBRIST.stone_key(pos, to);
        self.cells[idx] = to;
    }
}

/// Grid equality only; history is ignored.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..BOARD_SIZE {
            let row: String = (0..BOARD_SIZE)
                .map(|c| self.cells[r * BOARD_SIZE + c].symbol())
                .collect();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
