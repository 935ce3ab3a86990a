//! Static positional weights.
//!
//! Corners are worth the most since they can never be flipped. The X-squares
//! diagonally inside each corner are the worst cells on the board because they
//! hand the corner to the opponent; the C-squares beside the corners are
//! slightly less bad. Edges are mildly positive and the center is near neutral.

use crate::types::{BOARD_SIZE, Pos};

pub const CORNER_WEIGHT: i32 = 120;

#[rustfmt::skip]
pub const POSITION_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [120, -20,  20,   5,   5,  20, -20, 120],
    [-20, -40,  -5,  -5,  -5,  -5, -40, -20],
    [ 20,  -5,  15,   3,   3,  15,  -5,  20],
    [  5,  -5,   3,   3,   3,   3,  -5,   5],
    [  5,  -5,   3,   3,   3,   3,  -5,   5],
    [ 20,  -5,  15,   3,   3,  15,  -5,  20],
    [-20, -40,  -5,  -5,  -5,  -5, -40, -20],
    [120, -20,  20,   5,   5,  20, -20, 120],
];

/// Weight of a cell; 0 for positions off the board.
#[inline]
pub fn weight(pos: Pos) -> i32 {
    if pos.is_valid() {
        POSITION_WEIGHTS[pos.row as usize][pos.col as usize]
    } else {
        0
    }
}
