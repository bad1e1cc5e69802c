use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use parlor::games::bagh_chal::{BaghChal, Step};
use parlor::{Game, Player};

#[test]
fn goats_open_by_placing_anywhere_free() {
    let game = BaghChal::new();
    assert_eq!(game.player(), Player::Max);
    assert_eq!(game.goats_in_hand(), 20);
    assert_eq!(game.captured_goats(), 0);

    let moves = game.moves();
    // 25 crossings minus the 4 corner tigers.
    assert_eq!(moves.len(), 21);
    assert!(moves.iter().all(|m| m.from.is_none()));
}

#[test]
fn corner_tigers_start_with_three_steps_each() {
    let mut game = BaghChal::new();
    game.commit(&Step {
        from: None,
        to: (2, 2),
    });

    assert_eq!(game.player(), Player::Min);
    let moves = game.moves();
    assert_eq!(moves.len(), 12);
    assert!(moves.iter().all(|m| m.from.is_some()));
}

#[test]
fn a_tiger_leaps_an_adjacent_goat() {
    let mut game = BaghChal::new();
    // Goat steps straight into the jaws: diagonal neighbour of the
    // (0, 0) tiger with the landing square behind it free.
    game.commit(&Step {
        from: None,
        to: (1, 1),
    });

    let leap = Step {
        from: Some((0, 0)),
        to: (2, 2),
    };
    assert!(
        game.moves().contains(&leap),
        "capture jump missing from the tiger's moves"
    );

    game.commit(&leap);
    assert_eq!(game.captured_goats(), 1);
    assert_eq!(game.goats_in_hand(), 19);
    assert_eq!(game.player(), Player::Max);
}

#[test]
fn goats_only_walk_once_every_goat_is_placed() {
    let mut rng = Pcg64::seed_from_u64(5);
    let mut game = BaghChal::new();

    while game.goats_in_hand() > 0 && !game.is_terminal() {
        if game.player() == Player::Max {
            assert!(
                game.moves().iter().all(|m| m.from.is_none()),
                "goats must keep placing while any are in hand"
            );
        }
        let moves = game.moves();
        game.commit(moves.choose(&mut rng).expect("non-empty"));
    }

    if !game.is_terminal() && game.player() == Player::Max {
        assert!(
            game.moves().iter().all(|m| m.from.is_some()),
            "placements must stop once the hand is empty"
        );
    }
}

#[test]
fn evaluation_tracks_captures() {
    let mut game = BaghChal::new();
    let fresh = game.evaluate();
    assert_eq!(fresh, 0.0, "no captures and no penned tigers at the start");

    game.commit(&Step {
        from: None,
        to: (1, 1),
    });
    game.commit(&Step {
        from: Some((0, 0)),
        to: (2, 2),
    });
    assert!(
        game.evaluate() < fresh,
        "a captured goat must show up as a tiger advantage"
    );
}

#[test]
fn commit_and_undo_restore_the_exact_position() {
    let mut rng = Pcg64::seed_from_u64(17);
    for _ in 0..5 {
        let mut game = BaghChal::new();
        let reference = game.clone();
        let mut committed = 0;

        for _ in 0..80 {
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
