use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cpu_vs_cpu_tictactoe_plays_out_the_draw() {
    let mut cmd = Command::cargo_bin("play").expect("bin");
    cmd.args([
        "--game",
        "tictactoe",
        "--mode",
        "cpu-cpu",
        "--timeout-ms",
        "1000",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Draw!"))
        .stdout(predicate::str::contains("cpu is playing optimally"));
}

#[test]
fn ply_limit_stops_a_perpetual_game() {
    let mut cmd = Command::cargo_bin("play").expect("bin");
    cmd.args([
        "--game",
        "mutorere",
        "--mode",
        "cpu-cpu",
        "--timeout-ms",
        "500",
        "--max-plies",
        "6",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ply limit reached"))
        .stdout(predicate::str::contains("the game can go on forever"));
}

#[test]
fn save_file_is_written_and_resumable() {
    let dir = tempfile::tempdir().expect("temp dir");
    let save = dir.path().join("game.json");

    let mut first = Command::cargo_bin("play").expect("bin");
    first.args([
        "--game",
        "connect-four",
        "--mode",
        "cpu-cpu",
        "--timeout-ms",
        "20",
        "--max-plies",
        "4",
    ]);
    first.arg("--save").arg(&save);
    first.assert().success();
    assert!(save.exists(), "no save file written");

    let mut second = Command::cargo_bin("play").expect("bin");
    second.args([
        "--game",
        "connect-four",
        "--mode",
        "cpu-cpu",
        "--timeout-ms",
        "20",
        "--max-plies",
        "2",
    ]);
    second.arg("--resume").arg(&save);
    second
        .assert()
        .success()
        .stdout(predicate::str::contains("resumed from"));
}

#[test]
fn selfplay_reports_a_summary() {
    let mut cmd = Command::cargo_bin("selfplay").expect("bin");
    cmd.args([
        "--game",
        "tictactoe",
        "--games",
        "2",
        "--timeout-ms",
        "50",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[selfplay] 2 games:"))
        .stdout(predicate::str::contains("draws"));
}
