use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use parlor::games::konane::{Jump, Konane};
use parlor::{Game, Player};

#[test]
fn opening_removals() {
    let game = Konane::new();
    assert_eq!(game.pieces(), 36);
    assert_eq!(game.player(), Player::Max);

    let moves = game.moves();
    assert_eq!(moves.len(), 4);
    assert!(moves.iter().all(|m| m.to.is_none()), "openings are removals");
}

#[test]
fn second_removal_must_border_the_first_gap() {
    let mut game = Konane::new();
    game.commit(&Jump {
        from: (3, 2),
        to: None,
    });

    assert_eq!(game.pieces(), 35);
    assert_eq!(game.player(), Player::Min);

    let froms: Vec<(u8, u8)> = game.moves().iter().map(|m| m.from).collect();
    assert_eq!(froms, vec![(2, 2), (3, 3)]);
}

#[test]
fn jumps_capture_one_piece_per_hop() {
    let mut game = Konane::new();
    game.commit(&Jump {
        from: (3, 2),
        to: None,
    });
    game.commit(&Jump {
        from: (2, 2),
        to: None,
    });

    // White may land in the (3, 2) gap from three directions; the (2, 2)
    // gap sits on a black cell and is out of reach.
    let moves = game.moves();
    assert_eq!(moves.len(), 3);
    assert!(moves.iter().all(|m| m.to == Some((3, 2))));

    game.commit(&moves[0]);
    assert_eq!(game.pieces(), 33, "one piece moved, one was captured");
    assert_eq!(game.player(), Player::Min);
}

#[test]
fn state_key_distinguishes_the_side_to_move() {
    let game = Konane::new();
    let mut opened = game.clone();
    opened.commit(&Jump {
        from: (3, 2),
        to: None,
    });

    assert_ne!(game.state_key(), opened.state_key());
    opened.undo();
    assert_eq!(game.state_key(), opened.state_key());
}

#[test]
fn commit_and_undo_restore_the_exact_position() {
    let mut rng = Pcg64::seed_from_u64(99);
    for _ in 0..5 {
        let mut game = Konane::new();
        let reference = game.clone();
        let mut committed = 0;

        for _ in 0..60 {
            let moves = game.moves();
            if moves.is_empty() {
                break;
            }
            game.commit(moves.choose(&mut rng).expect("non-empty"));
            committed += 1;
        }
        for _ in 0..committed {
            game.undo();
        }

        assert_eq!(game, reference);
    }
}

#[test]
fn random_games_always_finish() {
    // Every jump removes at least one piece, so play cannot loop.
    let mut rng = Pcg64::seed_from_u64(1234);
    let mut game = Konane::new();
    while !game.is_terminal() {
        let moves = game.moves();
        game.commit(moves.choose(&mut rng).expect("non-empty"));
        assert!(game.turn() < 100, "konane games are finite");
    }
    assert!(game.moves().is_empty());
    assert!(game.turn() > 3, "both opening removals must have happened");
}
