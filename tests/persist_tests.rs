use parlor::games::tictactoe::{Cell, TicTacToe};
use parlor::persist::{load_game, save_game};
use parlor::Game;

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("saves").join("tictactoe.json");

    let mut game = TicTacToe::new();
    game.commit(&Cell { x: 1, y: 1 });
    game.commit(&Cell { x: 0, y: 0 });
    game.commit(&Cell { x: 2, y: 2 });

    save_game(&path, &game).expect("save");
    let loaded: TicTacToe = load_game(&path).expect("load");

    assert_eq!(loaded, game);
    assert_eq!(loaded.turn(), 4);
    assert_eq!(loaded.state_key(), game.state_key());
    assert_eq!(loaded.history(), game.history());
}

#[test]
fn save_overwrites_previous_state() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("game.json");

    let mut game = TicTacToe::new();
    save_game(&path, &game).expect("first save");
    game.commit(&Cell { x: 0, y: 2 });
    save_game(&path, &game).expect("second save");

    let loaded: TicTacToe = load_game(&path).expect("load");
    assert_eq!(loaded.turn(), 2);
}

#[test]
fn version_mismatch_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("stale.json");
    std::fs::write(&path, r#"{"version": 99, "game": {"stack": []}}"#).expect("write");

    let result: Result<TicTacToe, String> = load_game(&path);
    let err = result.expect_err("stale version must not load");
    assert!(err.contains("version"), "unexpected error: {err}");
}

#[test]
fn missing_file_reports_the_path() {
    let result: Result<TicTacToe, String> = load_game("does/not/exist.json");
    let err = result.expect_err("missing file must not load");
    assert!(err.contains("does/not/exist.json"));
}
