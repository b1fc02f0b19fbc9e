use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn studio(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("studio").expect("binary built");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .arg("--session")
        .arg(dir.join("session.json"));
    cmd
}

#[test]
fn add_then_analyze_round_trip() {
    let dir = tempdir().expect("tempdir");

    studio(dir.path())
        .args(["add", "K", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded #0 K-2"))
        .stdout(predicate::str::contains("Pattern:"));

    studio(dir.path())
        .args(["add", "3-9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded #1 3-9"));

    studio(dir.path())
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#0 K-2").and(predicate::str::contains("#1 3-9")));

    studio(dir.path())
        .args(["analyze", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rounds\": 2"));
}

#[test]
fn invalid_rank_is_rejected() {
    let dir = tempdir().expect("tempdir");
    studio(dir.path())
        .args(["add", "K", "Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid rank 'Z'"));
    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn daily_limit_flag_blocks_extra_rounds() {
    let dir = tempdir().expect("tempdir");
    studio(dir.path())
        .args(["--daily-limit", "1", "tie", "7"])
        .assert()
        .success();
    studio(dir.path())
        .args(["--daily-limit", "1", "tie", "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("daily limit of 1 rounds reached"));
}

#[test]
fn exports_report_file() {
    let dir = tempdir().expect("tempdir");
    studio(dir.path()).args(["add", "A", "10"]).assert().success();
    let report = dir.path().join("report.txt");
    studio(dir.path())
        .args(["export", "report"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written"));
    let text = std::fs::read_to_string(&report).expect("report exists");
    assert!(text.contains("Round history report"));
    assert!(text.contains("0,A,10,side_a,high,"));
}

#[test]
fn config_validate_rejects_bad_window() {
    let dir = tempdir().expect("tempdir");
    studio(dir.path())
        .args(["config", "--validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid."));
    studio(dir.path())
        .args(["--window", "2", "config", "--validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("window_size"));
}
