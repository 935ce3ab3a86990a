//! Transposition table for caching search results
//!
//! Stores the outcome of each searched node keyed by position, so a position
//! reached again through another move order, or searched again by a later
//! iteration, can reuse the score or at least try the previous best move first.
//! The table lives for one `best_move` call and is cleared at its start.

use std::collections::HashMap;

use othello_core::{Board, Pos, Stone, ZOBRIST};

/// How a stored score relates to the true value of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The search completed inside its window
    Exact,
    /// True value >= score (beta cutoff)
    LowerBound,
    /// True value <= score (failed low)
    UpperBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Pos>,
}

/// Key for a node: the board hash plus whose turn it is, so a position reached
/// with different parity after a pass does not alias.
#[inline]
pub fn node_key(board: &Board, side: Stone) -> u64 {
    board.hash() ^ ZOBRIST.side_key(side)
}

#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, TTEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn probe(&self, key: u64) -> Option<TTEntry> {
        self.entries.get(&key).copied()
    }

    /// Stores `entry` unless an existing entry for `key` was searched deeper.
    pub fn store(&mut self, key: u64, entry: TTEntry) {
        match self.entries.get_mut(&key) {
            Some(existing) if existing.depth > entry.depth => {}
            Some(existing) => *existing = entry,
            None => {
                self.entries.insert(key, entry);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(depth: u8, score: i32) -> TTEntry {
        TTEntry {
            depth,
            score,
            bound: Bound::Exact,
            best_move: Some(Pos::new(2, 3)),
        }
    }

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::new();
        assert!(tt.probe(42).is_none());
        tt.store(42, entry(4, 10));
        assert_eq!(tt.probe(42), Some(entry(4, 10)));
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_shallower_result_does_not_overwrite() {
        let mut tt = TranspositionTable::new();
        tt.store(1, entry(6, 10));
        tt.store(1, entry(4, 99));
        assert_eq!(tt.probe(1).unwrap().score, 10);

        tt.store(1, entry(6, 20));
        assert_eq!(tt.probe(1).unwrap().score, 20);
        tt.store(1, entry(8, 30));
        assert_eq!(tt.probe(1).unwrap().depth, 8);
    }

    #[test]
    fn test_clear() {
        let mut tt = TranspositionTable::new();
        tt.store(1, entry(2, 0));
        tt.clear();
        assert!(tt.is_empty());
    }

    #[test]
    fn test_node_key_includes_side() {
        let b = Board::new();
        assert_ne!(node_key(&b, Stone::Black), node_key(&b, Stone::White));
        assert_ne!(node_key(&b, Stone::Black), b.hash());
    }
}
