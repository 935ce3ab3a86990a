use super::*;

#[test]
fn random_engine_returns_legal_move() {
    let mut engine = RandomEngine::new();
    let board = Board::new();

    let result = engine.search(&board, Stone::Black, SearchLimits::depth(1));

    let pos = result.best_move.pos().expect("opening has moves");
    assert!(board.get_valid_moves(Stone::Black).contains(&pos));
}

#[test]
fn random_engine_passes_without_moves() {
    let mut engine = RandomEngine::new();
    let board = Board::from_diagram(
        "BW......
         ........
         ........
         ........
         ........
         ........
         ........
         ........",
    )
    .unwrap();

    let result = engine.search(&board, Stone::White, SearchLimits::depth(1));

    assert_eq!(result.best_move, Move::Pass);
}

#[test]
fn seeded_engines_agree() {
    let board = Board::new();
    let mut a = RandomEngine::seeded(11);
    let mut b = RandomEngine::seeded(11);
    for _ in 0..16 {
        let ra = a.search(&board, Stone::White, SearchLimits::default());
        let rb = b.search(&board, Stone::White, SearchLimits::default());
        assert_eq!(ra.best_move, rb.best_move);
    }
}

#[test]
fn random_engine_reaches_every_move() {
    let board = Board::new();
    let mut engine = RandomEngine::seeded(5);
    let mut seen: Vec<Pos> = Vec::new();
    for _ in 0..200 {
        let pos = engine
            .search(&board, Stone::Black, SearchLimits::default())
            .best_move
            .pos()
            .unwrap();
        if !seen.contains(&pos) {
            seen.push(pos);
        }
    }
    seen.sort();
    assert_eq!(seen, board.get_valid_moves(Stone::Black));
}
