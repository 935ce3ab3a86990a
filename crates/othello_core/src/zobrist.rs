//! Zobrist hashing for Othello boards.
//!
//! Every occupied cell contributes one pseudorandom 64-bit key for its color,
//! so placing or flipping a stone updates the hash with one or two XORs
//! instead of rescanning the grid. Keys come from a fixed seed and are
//! identical across runs; they are meant for transposition-table keys only.

use crate::types::{NUM_CELLS, Pos, Stone};

/// Pre-computed random values for Zobrist hashing.
pub struct ZobristKeys {
    /// Indexed by [cell index][color index] (Black = 0, White = 1).
    pub cells: [[u64; 2]; NUM_CELLS],
    /// Side-to-move keys, mixed into search keys but never into the board hash.
    pub side: [u64; 2],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Generate keys with xorshift64 from a fixed seed.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x9E37_79B9_7F4A_7C15u64;

        let mut cells = [[0u64; 2]; NUM_CELLS];
        let mut sq = 0;
        while sq < NUM_CELLS {
            let mut color = 0;
            while color < 2 {
                state = xorshift64(state);
                cells[sq][color] = state;
                color += 1;
            }
            sq += 1;
        }

        let mut side = [0u64; 2];
        let mut i = 0;
        while i < 2 {
            state = xorshift64(state);
            side[i] = state;
            i += 1;
        }

        ZobristKeys { cells, side }
    }

    /// Key for a stone of `color` on `pos`. Zero for `Empty` or invalid positions.
    #[inline(always)]
    pub fn stone_key(&self, pos: Pos, color: Stone) -> u64 {
        match color.idx() {
            Some(c) if pos.is_valid() => self.cells[pos.index()][c],
            _ => 0,
        }
    }

    /// Key for the side to move. Zero for `Empty`.
    #[inline(always)]
    pub fn side_key(&self, color: Stone) -> u64 {
        color.idx().map_or(0, |c| self.side[c])
    }
}

/// Process-wide keys, computed at compile time and read-only afterwards.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
