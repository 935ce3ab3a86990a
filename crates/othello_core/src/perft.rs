use crate::{board::Board, types::Pos, types::Stone};

/// Pure perft node count.
/// Counts all leaf positions `depth` plies below the current one. A forced
/// pass consumes a ply; a finished game is a leaf regardless of depth.
pub fn perft(board: &mut Board, side: Stone, depth: u8) -> u64 {
    fn inner(board: &mut Board, side: Stone, depth: u8, layers: &mut [Vec<Pos>]) -> u64 {
        if depth == 0 {
            return 1;
        }

        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        board.valid_moves_into(side, buf);
        if buf.is_empty() {
            if !board.has_valid_move(side.opponent()) {
                return 1;
            }
            return inner(board, side.opponent(), depth - 1, rest);
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            board.place_stone(mv, side);
            nodes += inner(board, side.opponent(), depth - 1, rest);
            board.undo();
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(32); depth as usize];
    inner(board, side, depth, &mut layers[..])
}
