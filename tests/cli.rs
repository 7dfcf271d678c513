use assert_cmd::Command;
use predicates::prelude::*;

// The board itself is covered by the unit tests; these check the exit codes
// and the summary line for each kind of outcome.

#[test]
fn test_cli_solves_sample() {
    let mut cmd = Command::cargo_bin("nonogram").unwrap();

    cmd.arg("puzzles/sample.yaml")
       .arg("--no-color")
       .assert()
       .success()
       .stdout(predicate::str::contains("Solved after"))
       .stdout(predicate::str::contains("\u{2554}"))
       .stdout(predicate::str::contains("3 4 1 \u{2551}"));
}

#[test]
fn test_cli_paced() {
    let mut cmd = Command::cargo_bin("nonogram").unwrap();

    cmd.args(&["puzzles/letter_h.yaml", "--no-color", "--paced", "--delay", "0"])
       .assert()
       .success()
       .stdout(predicate::str::contains("row 3: 5 square(s) changed"))
       .stdout(predicate::str::contains("Solved after"));
}

#[test]
fn test_cli_stuck() {
    let mut cmd = Command::cargo_bin("nonogram").unwrap();

    cmd.args(&["puzzles/ambiguous.yaml", "--no-color"])
       .assert()
       .code(2)
       .stdout(predicate::str::contains("Stuck: 4 square(s)"));
}

#[test]
fn test_cli_contradiction() {
    let mut cmd = Command::cargo_bin("nonogram").unwrap();

    cmd.args(&["puzzles/contradiction.yaml", "--no-color", "-v"])
       .assert()
       .code(1)
       .stdout(predicate::str::contains("Contradiction in column 2"))
       .stderr(predicate::str::contains("bad runs at column 2"));
}

#[test]
fn test_cli_gives_up() {
    let mut cmd = Command::cargo_bin("nonogram").unwrap();

    cmd.args(&["puzzles/sample.yaml", "--no-color", "--max-steps", "4"])
       .assert()
       .code(2)
       .stdout(predicate::str::contains("Gave up after 4 step(s)"));
}

#[test]
fn test_cli_rejects_bad_runs() {
    let mut cmd = Command::cargo_bin("nonogram").unwrap();

    cmd.arg("puzzles/too_long.yaml")
       .assert()
       .failure()
       .stdout("")
       .stderr(predicate::str::contains("Runs of row 1 need at least 6 squares"));
}

#[test]
fn test_cli_missing_file() {
    let mut cmd = Command::cargo_bin("nonogram").unwrap();

    cmd.arg("puzzles/does_not_exist.yaml")
       .assert()
       .failure()
       .stderr(predicate::str::contains("Cannot read"));
}
