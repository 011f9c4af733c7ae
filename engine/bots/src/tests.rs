//! Tests for the bots and the arena loop.

use super::*;
use engine_config::CentralConfig;
use games_connect4::{Board, Piece};

/// Small budgets so every strategy finishes a full game quickly.
fn fast_config(seed: u64) -> CentralConfig {
    let mut config = CentralConfig::default();
    config.common.seed = Some(seed);
    config.minimax.depth = 2;
    config.expectimax.depth = 2;
    config.mcts.max_iterations = 200;
    config.mcts.timeout_ms = 0;
    config.annealing.iterations = 200;
    config.genetic.population_size = 16;
    config.genetic.elite_size = 4;
    config.genetic.generations = 8;
    config
}

fn board(rows: &[&str]) -> Board {
    Board::from_rows(rows).unwrap()
}

fn winning_position() -> Board {
    // Red to move, column 3 completes the bottom row
    board(&[
        ".......", //
        ".......", //
        ".......", //
        ".......", //
        "YYY....", //
        "RRR....", //
    ])
}

fn full_board() -> Board {
    board(&[
        "RYRYRYR", //
        "RYRYRYR", //
        "YRYRYRY", //
        "YRYRYRY", //
        "RYRYRYR", //
        "RYRYRYR", //
    ])
}

#[test]
fn test_factory_builds_every_kind() {
    let config = fast_config(0);
    for kind in BotKind::ALL {
        let bot = build_bot(kind, Piece::Yellow, &config).unwrap();
        assert_eq!(bot.name(), kind.as_str());
        assert_eq!(bot.piece(), Piece::Yellow);
    }
}

#[test]
fn test_every_bot_returns_valid_column() {
    let config = fast_config(1);
    let b = board(&[
        ".......", //
        ".......", //
        ".......", //
        "...Y...", //
        "..RR...", //
        "..YRY..", //
    ]);
    for kind in BotKind::ALL {
        let mut bot = build_bot(kind, b.current_player(), &config).unwrap();
        let column = bot.decide_move(&b).unwrap();
        assert!(b.is_valid_column(column), "{} played {}", kind, column);
    }
}

#[test]
fn test_searching_bots_take_immediate_win() {
    let mut config = fast_config(2);
    config.mcts.max_iterations = 1000;
    config.annealing = Default::default();
    config.genetic = Default::default();
    let kinds = [
        BotKind::Lookahead,
        BotKind::Minimax,
        BotKind::Expectimax,
        BotKind::Mcts,
        BotKind::Annealing,
        BotKind::Genetic,
    ];
    for kind in kinds {
        let mut bot = build_bot(kind, Piece::Red, &config).unwrap();
        assert_eq!(bot.decide_move(&winning_position()).unwrap(), 3, "{}", kind);
    }
}

#[test]
fn test_full_board_is_an_error() {
    let config = fast_config(3);
    for kind in BotKind::ALL {
        let mut bot = build_bot(kind, full_board().current_player(), &config).unwrap();
        assert!(bot.decide_move(&full_board()).is_err(), "{}", kind);
    }
}

#[test]
fn test_random_bot_full_board() {
    let mut bot = RandomBot::new(Piece::Red, Some(0));
    assert!(matches!(
        bot.decide_move(&full_board()),
        Err(BotError::NoLegalMoves)
    ));
}

#[test]
fn test_random_bot_covers_columns() {
    let mut bot = RandomBot::new(Piece::Red, Some(4));
    let mut seen = [false; 7];
    for _ in 0..200 {
        seen[bot.decide_move(&Board::new()).unwrap() as usize] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn test_lookahead_breaks_ties_randomly() {
    let mut evaluator_config = engine_config::EvaluatorConfig::default();
    evaluator_config.center = 0;
    let evaluator = evaluator_from_config(&evaluator_config).unwrap();

    // Without the center bonus every first move scores zero
    let mut bot = OneStepLookAheadBot::new(Piece::Red, evaluator, Some(5));
    let scores = bot.column_scores(&Board::new()).unwrap();
    assert!(scores.iter().all(|&(_, score)| score == 0));

    let mut seen = [false; 7];
    for _ in 0..200 {
        seen[bot.decide_move(&Board::new()).unwrap() as usize] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn test_lookahead_prefers_center() {
    let evaluator = evaluator_from_config(&Default::default()).unwrap();
    let mut bot = OneStepLookAheadBot::new(Piece::Red, evaluator, Some(6));
    assert_eq!(bot.decide_move(&Board::new()).unwrap(), 3);
}

#[test]
fn test_mcts_bot_refuses_wrong_turn() {
    let mut bot = build_bot(BotKind::Mcts, Piece::Yellow, &fast_config(7)).unwrap();
    let err = bot.decide_move(&Board::new()).unwrap_err();
    assert!(matches!(
        err,
        BotError::WrongTurn {
            expected: Piece::Yellow,
            found: Piece::Red
        }
    ));
}

#[test]
fn test_minimax_bot_reports_finished_game() {
    let b = board(&[
        ".......", //
        ".......", //
        ".......", //
        ".......", //
        "YYY....", //
        "RRRR...", //
    ]);
    let mut bot = build_bot(BotKind::Minimax, Piece::Yellow, &fast_config(8)).unwrap();
    assert!(matches!(
        bot.decide_move(&b),
        Err(BotError::Adversarial(adversarial::SearchError::GameOver(
            Piece::Red
        )))
    ));
}

#[test]
fn test_same_seed_same_moves() {
    for kind in BotKind::ALL {
        let config = fast_config(9);
        let mut a = build_bot(kind, Piece::Red, &config).unwrap();
        let mut b = build_bot(kind, Piece::Red, &config).unwrap();
        let mut first = build_bot(BotKind::Random, Piece::Yellow, &config).unwrap();
        let mut second = build_bot(BotKind::Random, Piece::Yellow, &config).unwrap();

        let x = play_game(a.as_mut(), first.as_mut()).unwrap();
        let y = play_game(b.as_mut(), second.as_mut()).unwrap();
        assert_eq!(x.moves, y.moves, "{}", kind);
    }
}

#[test]
fn test_every_bot_completes_games_as_both_colours() {
    for (i, kind) in BotKind::ALL.into_iter().enumerate() {
        let config = fast_config(10 + i as u64);

        let mut bot = build_bot(kind, Piece::Red, &config).unwrap();
        let mut random = build_bot(BotKind::Random, Piece::Yellow, &config).unwrap();
        let record = play_game(bot.as_mut(), random.as_mut()).unwrap();
        assert!(record.board.is_terminal());
        assert_eq!(record.moves.len(), record.board.moves_played());

        let mut random = build_bot(BotKind::Random, Piece::Red, &config).unwrap();
        let mut bot = build_bot(kind, Piece::Yellow, &config).unwrap();
        let record = play_game(random.as_mut(), bot.as_mut()).unwrap();
        assert!(record.board.is_terminal());
    }
}

#[test]
fn test_minimax_beats_random() {
    let mut wins = 0;
    for seed in 0..4 {
        let config = fast_config(seed);
        let mut minimax = build_bot(BotKind::Minimax, Piece::Red, &config).unwrap();
        let mut random = build_bot(BotKind::Random, Piece::Yellow, &config).unwrap();
        if play_game(minimax.as_mut(), random.as_mut()).unwrap().winner == Some(Piece::Red) {
            wins += 1;
        }
    }
    assert!(wins >= 3, "minimax won {} of 4", wins);
}

#[test]
fn test_game_record_winner_matches_board() {
    let config = fast_config(20);
    let mut red = build_bot(BotKind::Lookahead, Piece::Red, &config).unwrap();
    let mut yellow = build_bot(BotKind::Random, Piece::Yellow, &config).unwrap();
    let record = play_game(red.as_mut(), yellow.as_mut()).unwrap();
    assert_eq!(record.winner, record.board.winner());
    for &column in &record.moves {
        assert!((column as usize) < games_connect4::COLS);
    }
}

#[test]
fn test_tally() {
    let mut tally = Tally::default();
    tally.record(Piece::Red, Some(Piece::Red));
    tally.record(Piece::Yellow, Some(Piece::Red));
    tally.record(Piece::Yellow, Some(Piece::Yellow));
    tally.record(Piece::Red, None);

    assert_eq!(tally.first_wins, 2);
    assert_eq!(tally.second_wins, 1);
    assert_eq!(tally.draws, 1);
    assert_eq!(tally.games(), 4);
}
