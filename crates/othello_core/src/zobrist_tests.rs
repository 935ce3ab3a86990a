use super::*;

#[test]
fn test_zobrist_keys_unique() {
    let mut seen = std::collections::HashSet::new();

    for sq in 0..NUM_CELLS {
        for color in 0..2 {
            let key = ZOBRIST.cells[sq][color];
            assert_ne!(key, 0);
            assert!(seen.insert(key), "Duplicate Zobrist key found");
        }
    }

    for i in 0..2 {
        assert!(seen.insert(ZOBRIST.side[i]), "Side key collision");
    }
}

#[test]
fn test_keys_are_deterministic() {
    let fresh = ZobristKeys::new();
    assert_eq!(fresh.cells, ZOBRIST.cells);
    assert_eq!(fresh.side, ZOBRIST.side);
}

#[test]
fn test_stone_key_per_color_and_cell() {
    let a = ZOBRIST.stone_key(Pos::new(0, 0), Stone::Black);
    let b = ZOBRIST.stone_key(Pos::new(0, 0), Stone::White);
    let c = ZOBRIST.stone_key(Pos::new(0, 1), Stone::Black);
    assert_ne!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_empty_and_invalid_keys_are_zero() {
    assert_eq!(ZOBRIST.stone_key(Pos::new(3, 3), Stone::Empty), 0);
    assert_eq!(ZOBRIST.stone_key(Pos::new(8, 0), Stone::Black), 0);
    assert_eq!(ZOBRIST.stone_key(Pos::new(-1, 2), Stone::White), 0);
    assert_eq!(ZOBRIST.side_key(Stone::Empty), 0);
}
