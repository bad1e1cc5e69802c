use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use parlor::games::tictactoe::{Cell, TicTacToe};
use parlor::{Game, Player, Winner};

fn play(game: &mut TicTacToe, cells: &[(u8, u8)]) {
    for &(x, y) in cells {
        game.commit(&Cell { x, y });
    }
}

#[test]
fn fresh_board_basics() {
    let game = TicTacToe::new();
    assert_eq!(game.turn(), 1);
    assert_eq!(game.player(), Player::Max);
    assert!(!game.is_terminal());
    assert_eq!(game.moves().len(), 9);
    assert!(game.history().is_empty());
}

#[test]
fn completed_row_ends_the_game() {
    let mut game = TicTacToe::new();
    // X takes the top row while O wanders.
    play(&mut game, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);

    assert!(game.is_terminal());
    assert!(game.moves().is_empty());
    assert_eq!(game.winner(), Winner::Max);
    assert_eq!(game.turn(), 6);
}

#[test]
fn full_board_without_a_line_is_a_draw() {
    let mut game = TicTacToe::new();
    play(
        &mut game,
        &[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (1, 2),
            (2, 1),
            (2, 0),
            (2, 2),
        ],
    );

    assert!(game.is_terminal());
    assert_eq!(game.winner(), Winner::Draw);
}

#[test]
fn state_key_distinguishes_the_side_to_move() {
    let marks: (&[(u8, u8)], &[(u8, u8)]) = (&[(0, 0), (2, 2)], &[(1, 1)]);
    let as_max = TicTacToe::from_cells(marks.0, marks.1, Player::Max);
    let as_min = TicTacToe::from_cells(marks.0, marks.1, Player::Min);

    assert_ne!(as_max.state_key(), as_min.state_key());
}

#[test]
fn commit_and_undo_restore_the_exact_position() {
    let mut rng = Pcg64::seed_from_u64(42);
    for _ in 0..20 {
        let mut game = TicTacToe::new();
        let reference = game.clone();
        let mut committed = 0;

        while !game.is_terminal() {
            let moves = game.moves();
            game.commit(moves.choose(&mut rng).expect("non-empty"));
            committed += 1;
        }
        for _ in 0..committed {
            game.undo();
        }

        assert_eq!(game, reference);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.state_key(), reference.state_key());
    }
}

#[test]
fn history_tracks_past_positions_only() {
    let mut game = TicTacToe::new();
    let first = game.state_key();
    game.commit(&Cell { x: 1, y: 1 });
    let second = game.state_key();
    game.commit(&Cell { x: 0, y: 0 });

    let history = game.history();
    assert_eq!(history, vec![first, second]);
    assert!(!history.contains(&game.state_key()));
}
