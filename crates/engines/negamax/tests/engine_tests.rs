use std::time::{Duration, Instant};

use negamax_engine::{Difficulty, EngineConfig, NegamaxEngine, SearchEngine};
use othello_core::{Board, Engine, Move, Pos, SearchLimits, Stone};

fn lone_pair() -> Board {
    Board::from_diagram(
        "BW......
         ........
         ........
         ........
         ........
         ........
         ........
         ........",
    )
    .unwrap()
}

fn opening_line() -> Board {
    let mut b = Board::new();
    assert!(b.place_stone(Pos::new(2, 3), Stone::Black));
    assert!(b.place_stone(Pos::new(2, 2), Stone::White));
    assert!(b.place_stone(Pos::new(2, 1), Stone::Black));
    b
}

/// Two empty corners, both legal for Black.
fn two_empties() -> Board {
    Board::from_diagram(
        "BWWWWWW.
         WWWWWWWW
         WWWWWWWW
         WWWWWWWW
         WWWWWWWW
         WWWWWWWW
         WWWWWWWW
         BWWWWWW.",
    )
    .unwrap()
}

fn seeded(seed: u64) -> SearchEngine {
    SearchEngine::new(EngineConfig {
        seed: Some(seed),
        ..EngineConfig::default()
    })
}

#[tokio::test]
async fn single_legal_move_is_played_without_search() {
    let engine = SearchEngine::default();
    let board = lone_pair();

    let result = engine.analyze(&board, Stone::Black, 6).await.unwrap();
    assert_eq!(result.best_move, Move::Place(Pos::new(0, 2)));
    assert_eq!(result.nodes, 0);

    let mv = engine.best_move(&board, Stone::Black, 6).await.unwrap();
    assert_eq!(mv, Move::Place(Pos::new(0, 2)));
}

#[tokio::test]
async fn no_legal_move_returns_pass() {
    let engine = SearchEngine::default();
    let mv = engine.best_move(&lone_pair(), Stone::White, 5).await.unwrap();
    assert_eq!(mv, Move::Pass);
}

#[tokio::test]
async fn caller_board_is_untouched() {
    let engine = SearchEngine::default();
    let board = opening_line();
    let before = board.tally();

    let mv = engine.best_move(&board, Stone::White, 2).await.unwrap();
    let pos = mv.pos().expect("white has moves");
    assert!(board.can_place(pos, Stone::White));
    assert_eq!(board.tally(), before);
    assert_eq!(board.history_len(), 3);
}

#[tokio::test]
async fn same_seed_same_choice() {
    for seed in 0..8 {
        let first = seeded(seed).best_move(&Board::new(), Stone::Black, 1).await.unwrap();
        let second = seeded(seed).best_move(&Board::new(), Stone::Black, 1).await.unwrap();
        assert_eq!(first, second, "seed {seed}");
    }
}

#[test]
fn low_levels_sometimes_skip_search() {
    let board = Board::new();
    let difficulty = Difficulty::from_level(0);
    let (mut random, mut searched) = (0, 0);

    for seed in 0..64 {
        let engine = seeded(seed);
        let mut rng = engine.call_rng();
        let result = engine.think(&board, Stone::Black, &difficulty, &mut rng);
        assert!(board.can_place(result.best_move.pos().unwrap(), Stone::Black));
        if result.nodes == 0 {
            random += 1;
        } else {
            searched += 1;
        }
    }
    assert!(random > 0 && searched > 0, "random={random} searched={searched}");
}

#[test]
fn top_level_never_plays_randomly() {
    let engine = seeded(3);
    let difficulty = Difficulty::from_level(5);
    for _ in 0..4 {
        let mut rng = engine.call_rng();
        let result = engine.think_with_limits(
            &Board::new(),
            Stone::Black,
            &difficulty,
            SearchLimits::depth(2),
            &mut rng,
        );
        assert!(result.nodes > 0);
        assert_eq!(result.depth, 2);
    }
}

#[test]
fn deadline_is_respected() {
    let engine = SearchEngine::new(EngineConfig {
        deadline_ms: 50,
        ..EngineConfig::default()
    });
    let board = opening_line();
    let difficulty = Difficulty::from_level(6);
    let mut rng = engine.call_rng();

    let start = Instant::now();
    let result = engine.think(&board, Stone::White, &difficulty, &mut rng);
    let elapsed = start.elapsed();

    assert!(elapsed < Duration::from_millis(1000), "took {elapsed:?}");
    assert!(board.can_place(result.best_move.pos().unwrap(), Stone::White));
}

#[test]
fn endgame_solver_searches_to_the_end() {
    let engine = SearchEngine::default();
    let board = two_empties();
    let difficulty = Difficulty::from_level(5);
    let mut rng = engine.call_rng();

    let result = engine.think(&board, Stone::Black, &difficulty, &mut rng);
    assert_eq!(result.depth, 4);
    assert!(!result.stopped);
    assert!(matches!(
        result.best_move,
        Move::Place(p) if p == Pos::new(0, 7) || p == Pos::new(7, 7)
    ));
}

#[test]
fn engine_trait_respects_depth_limit() {
    let mut engine = NegamaxEngine::new(5);
    assert_eq!(engine.name(), "Negamax L5");

    let board = Board::new();
    let result = engine.search(&board, Stone::Black, SearchLimits::depth(2));
    assert_eq!(result.depth, 2);
    assert!(board.can_place(result.best_move.pos().unwrap(), Stone::Black));
    assert_eq!(engine.nodes(), result.nodes);

    engine.new_game();
    assert_eq!(engine.nodes(), 0);
}

/// Plays a game with `engine` on both sides, returning how many contested
/// moves (two or more choices) were picked without search and with it.
fn self_play_rolls(engine: &mut NegamaxEngine, plies: usize) -> (usize, usize, Vec<Move>) {
    let mut board = Board::new();
    let mut side = Stone::Black;
    let (mut random, mut searched) = (0, 0);
    let mut played = Vec::new();

    for _ in 0..plies {
        if board.is_game_over() {
            break;
        }
        let contested = board.move_count(side) >= 2;
        let result = engine.search(&board, side, SearchLimits::depth(2));
        if let Move::Place(pos) = result.best_move {
            assert!(board.place_stone(pos, side));
        }
        if contested {
            if result.nodes == 0 {
                random += 1;
            } else {
                searched += 1;
            }
        }
        played.push(result.best_move);
        side = side.opponent();
    }
    (random, searched, played)
}

#[test]
fn seeded_engine_errs_on_some_moves_only() {
    for seed in 0..6 {
        let mut engine = NegamaxEngine::with_config(EngineConfig {
            difficulty: 1,
            seed: Some(seed),
            ..EngineConfig::default()
        });
        let (random, searched, _) = self_play_rolls(&mut engine, 30);
        assert!(random > 0 && searched > 0, "seed {seed}: random={random} searched={searched}");
    }
}

#[test]
fn seeded_engine_replays_the_same_game() {
    let config = EngineConfig {
        difficulty: 2,
        seed: Some(21),
        ..EngineConfig::default()
    };
    let (_, _, first) = self_play_rolls(&mut NegamaxEngine::with_config(config.clone()), 20);
    let (_, _, second) = self_play_rolls(&mut NegamaxEngine::with_config(config), 20);
    assert_eq!(first, second);
}

#[test]
fn reused_search_engine_draws_a_new_stream_per_call() {
    let board = Board::new();
    let difficulty = Difficulty::from_level(0);
    let engine = seeded(4);
    let (mut random, mut searched) = (0, 0);

    for _ in 0..32 {
        let mut rng = engine.call_rng();
        let result = engine.think(&board, Stone::Black, &difficulty, &mut rng);
        if result.nodes == 0 {
            random += 1;
        } else {
            searched += 1;
        }
    }
    assert!(random > 0 && searched > 0, "random={random} searched={searched}");
}
