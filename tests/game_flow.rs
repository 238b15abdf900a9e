//! Whole games driven through the public API only.

use mosaic::{
    floor_penalty, wall_column, Destination, Model, Move, Phase, Source, Token, FLOOR_CAPACITY,
    FLOOR_PENALTY,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Drive a two-player game to the end. `game_rng` deals the factories and
/// `pick_rng` chooses among the legal moves.
fn play_game(game_seed: u64, pick_seed: u64) -> (Model, Vec<Move>) {
    let mut game_rng = StdRng::seed_from_u64(game_seed);
    let mut pick_rng = StdRng::seed_from_u64(pick_seed);
    let mut model = Model::start();
    let mut history = Vec::new();

    model.setup_round(&mut game_rng).unwrap();
    while model.phase() != Phase::GameOver {
        assert!(history.len() < 1000, "game did not terminate");
        let legal = model.legal_moves();
        let mv = legal[pick_rng.random_range(0..legal.len())];
        assert!(model.is_valid_move(&mv, model.next_player()));
        model.make_move(mv).unwrap();
        history.push(mv);
        assert_eq!(model.check_conservation(), Ok(()));

        if model.round_over() {
            model.cleanup_round().unwrap();
            assert_eq!(model.check_conservation(), Ok(()));
            if !model.game_over() {
                model.setup_round(&mut game_rng).unwrap();
            }
        }
    }
    model.score_endgame().unwrap();
    (model, history)
}

#[test]
fn test_games_terminate_with_a_complete_row() {
    for seed in 0..5 {
        let (model, _) = play_game(seed, seed + 100);
        assert!(model.game_over());
        assert!(model
            .boards()
            .iter()
            .any(|board| board.has_complete_row()));
        assert_eq!(model.check_conservation(), Ok(()));
    }
}

#[test]
fn test_deterministic_replay() {
    let (first, history) = play_game(42, 999);

    // Replay the same moves against the same deal seed
    let mut game_rng = StdRng::seed_from_u64(42);
    let mut replay = Model::start();
    replay.setup_round(&mut game_rng).unwrap();
    for mv in history {
        replay.make_move(mv).unwrap();
        if replay.round_over() {
            replay.cleanup_round().unwrap();
            if !replay.game_over() {
                replay.setup_round(&mut game_rng).unwrap();
            }
        }
    }
    replay.score_endgame().unwrap();

    assert_eq!(replay.boards(), first.boards());
    assert_eq!(replay.winner(), first.winner());
}

#[test]
fn test_winner_has_top_score() {
    let (model, _) = play_game(7, 8);
    let winner = model.winner();
    let top = model.boards().iter().map(|b| b.score()).max().unwrap();
    assert_eq!(model.boards()[winner].score(), top);
}

#[test]
fn test_wall_placement_law_holds_every_round() {
    let mut game_rng = StdRng::seed_from_u64(2024);
    let mut pick_rng = StdRng::seed_from_u64(1);
    let mut model = Model::start();
    model.setup_round(&mut game_rng).unwrap();

    while model.phase() != Phase::GameOver {
        let legal = model.legal_moves();
        model
            .make_move(legal[pick_rng.random_range(0..legal.len())])
            .unwrap();
        if model.round_over() {
            model.cleanup_round().unwrap();
            for board in model.boards() {
                for (row, cells) in board.wall().iter().enumerate() {
                    for (col, cell) in cells.iter().enumerate() {
                        if let Some(color) = *cell {
                            assert_eq!(wall_column(row, color), col);
                        }
                    }
                }
                for line in board.pattern_lines() {
                    assert!(!line.is_full(), "full lines are tiled at cleanup");
                    assert_eq!(line.color().is_none(), line.count() == 0);
                }
            }
            if !model.game_over() {
                model.setup_round(&mut game_rng).unwrap();
            }
        }
    }
}

#[test]
fn test_marker_is_never_duplicated_or_lost() {
    let mut game_rng = StdRng::seed_from_u64(31337);
    let mut pick_rng = StdRng::seed_from_u64(5);
    let mut model = Model::start();
    model.setup_round(&mut game_rng).unwrap();

    for _ in 0..60 {
        if model.phase() == Phase::GameOver {
            break;
        }
        let legal = model.legal_moves();
        let mv = legal[pick_rng.random_range(0..legal.len())];
        model.make_move(mv).unwrap();

        let in_center = model.center().contains(&Token::Marker);
        assert_ne!(in_center, model.marker_holder().is_some());

        if model.round_over() {
            model.cleanup_round().unwrap();
            if !model.game_over() {
                assert_eq!(model.center(), &[Token::Marker]);
                model.setup_round(&mut game_rng).unwrap();
            }
        }
    }
}

#[test]
fn test_floor_line_never_exceeds_capacity() {
    let mut game_rng = StdRng::seed_from_u64(77);
    let mut model = Model::start();
    model.setup_round(&mut game_rng).unwrap();

    // Everyone dumps every draft on the floor
    while !model.round_over() {
        let mv = model
            .legal_moves()
            .into_iter()
            .find(|mv| mv.destination == Destination::Floor)
            .unwrap();
        model.make_move(mv).unwrap();
        for board in model.boards() {
            assert!(board.floor_line().len() <= FLOOR_CAPACITY);
        }
    }
    model.cleanup_round().unwrap();
    assert_eq!(model.check_conservation(), Ok(()));
    assert!(model.boards().iter().all(|b| b.score() == 0));
}

#[test]
fn test_rejected_move_reports_reason() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut model = Model::start();
    model.setup_round(&mut rng).unwrap();

    let mv = Move::new(Source::Center, model.factories()[0][0], Destination::Floor);
    assert!(!model.is_valid_move(&mv, 0));
    let err = model.make_move(mv).unwrap_err();
    assert!(err.to_string().contains("center holds no"));
    assert_eq!(model.next_player(), 0);
}

proptest! {
    /// Floor penalties only ever grow with floor length, and stop at capacity
    #[test]
    fn floor_penalty_is_monotone(len in 0usize..20) {
        prop_assert!(floor_penalty(len + 1) <= floor_penalty(len));
        let full: i32 = FLOOR_PENALTY.iter().sum();
        prop_assert!(floor_penalty(len) >= full);
        if len >= FLOOR_CAPACITY {
            prop_assert_eq!(floor_penalty(len), full);
        }
    }
}
