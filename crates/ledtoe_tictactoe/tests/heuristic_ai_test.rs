//! Tests for the heuristic opponent over whole games.

use ledtoe_tictactoe::rules::{check_win, evaluate};
use ledtoe_tictactoe::{Board, HeuristicAi, MoveStrategy, Player, Position, Reason};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_fallback_is_uniform_on_empty_board() {
    let mut ai = HeuristicAi::new(StdRng::seed_from_u64(7));
    let board = Board::new();
    let mut counts = [0usize; 9];

    for _ in 0..9_000 {
        let choice = ai.select_move(&board, Player::A).unwrap();
        assert_eq!(choice.reason, Reason::Random);
        counts[choice.position.to_index()] += 1;
    }

    for (index, count) in counts.iter().enumerate() {
        assert!(
            (800..=1200).contains(count),
            "position {} chosen {} times out of 9000",
            index,
            count
        );
    }
}

#[test]
fn test_both_players_never_win_in_legal_play() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..500 {
        let mut board = Board::new();
        let mut player = if rng.random_bool(0.5) { Player::A } else { Player::B };

        loop {
            let empty: Vec<Position> = board.empty_positions().collect();
            let pos = empty[rng.random_range(0..empty.len())];
            board.place(pos, player).unwrap();

            assert!(
                !(check_win(&board, Player::A) && check_win(&board, Player::B)),
                "both players winning on\n{}",
                board.display()
            );

            if evaluate(&board).is_some() {
                break;
            }
            player = player.opponent();
        }
    }
}

#[test]
fn test_ai_versus_ai_always_terminates_legally() {
    let mut first = HeuristicAi::new(StdRng::seed_from_u64(1));
    let mut second = HeuristicAi::new(StdRng::seed_from_u64(2));

    for _ in 0..100 {
        let mut board = Board::new();
        let mut player = Player::A;
        let mut moves = 0;

        while evaluate(&board).is_none() {
            let ai = if player == Player::A { &mut first } else { &mut second };
            let choice = ai.select_move(&board, player).unwrap();
            board.place(choice.position, player).unwrap();
            player = player.opponent();
            moves += 1;
        }

        assert!(moves <= 9);
    }
}

#[test]
fn test_block_prevents_immediate_loss() {
    let mut ai = HeuristicAi::new(StdRng::seed_from_u64(3));
    let mut board = Board::new();
    board.place(Position::BottomLeft, Player::B).unwrap();
    board.place(Position::BottomCenter, Player::B).unwrap();
    board.place(Position::Center, Player::A).unwrap();

    let choice = ai.select_move(&board, Player::A).unwrap();
    assert_eq!(choice.position, Position::BottomRight);
    assert_eq!(choice.reason, Reason::Block);
}
