//! Static position evaluation

use othello_core::{Board, Stone};

/// Filled-cell count above which raw disc count starts to matter.
pub const LATE_GAME_FILL: u32 = 48;

const WEIGHT_FACTOR: i32 = 2;
const DISC_FACTOR: i32 = 5;
const MOBILITY_FACTOR: i32 = 5;

/// Evaluates the board from `perspective`'s point of view.
///
/// - Positional weight difference, doubled
/// - Disc difference once more than 48 cells are filled
/// - Legal-move count difference when `use_mobility` is set
pub fn evaluate(board: &Board, perspective: Stone, use_mobility: bool) -> i32 {
    let opp = perspective.opponent();
    let mut score =
        (board.weighted_score(perspective) - board.weighted_score(opp)) * WEIGHT_FACTOR;

    if board.filled_count() > LATE_GAME_FILL {
        score += (board.count(perspective) as i32 - board.count(opp) as i32) * DISC_FACTOR;
    }

    if use_mobility {
        score += (board.move_count(perspective) as i32 - board.move_count(opp) as i32)
            * MOBILITY_FACTOR;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello_core::Pos;

    #[test]
    fn test_initial_position_is_balanced() {
        let b = Board::new();
        assert_eq!(evaluate(&b, Stone::Black, false), 0);
        assert_eq!(evaluate(&b, Stone::White, true), 0);
    }

    #[test]
    fn test_opening_sequence_scores() {
        let mut b = Board::new();
        assert!(b.place_stone(Pos::new(2, 3), Stone::Black));
        assert!(b.place_stone(Pos::new(2, 2), Stone::White));
        assert!(b.place_stone(Pos::new(2, 1), Stone::Black));
        // Weighted 19 vs 6, only 7 cells filled.
        assert_eq!(evaluate(&b, Stone::Black, false), 26);
        assert_eq!(evaluate(&b, Stone::White, false), -26);
    }

    #[test]
    fn test_evaluation_is_antisymmetric() {
        let mut b = Board::new();
        assert!(b.place_stone(Pos::new(2, 3), Stone::Black));
        for mobility in [false, true] {
            assert_eq!(
                evaluate(&b, Stone::Black, mobility),
                -evaluate(&b, Stone::White, mobility)
            );
        }
    }

    #[test]
    fn test_disc_count_only_late() {
        // 49 filled cells: the material term kicks in.
        let b = Board::from_diagram(
            "BBBBBBBB
             BBBBBBBB
             BBBBBBBB
             BBBBBBBB
             BBBBBBBB
             BBBBBBBB
             B.......
             ........",
        )
        .unwrap();
        assert_eq!(b.filled_count(), 49);
        let weights = b.weighted_score(Stone::Black) * 2;
        assert_eq!(evaluate(&b, Stone::Black, false), weights + 49 * 5);
    }
}
