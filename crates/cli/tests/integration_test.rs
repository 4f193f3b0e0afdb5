//! Runs the `lotto-stats` binary against a temporary history file.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_history(dir: &TempDir, count: usize) -> PathBuf {
    let entries: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            let month = i / 2 % 12 + 1;
            let year_be = 2560 + i / 24;
            let day = if i % 2 == 0 { 1 } else { 16 };
            serde_json::json!({
                "id": format!("{day:02}{month:02}{year_be}"),
                "last2": format!("{:02}", (i * 37 + 11) % 100),
            })
        })
        .collect();
    let path = dir.path().join("history.json");
    std::fs::write(&path, serde_json::to_string(&entries).unwrap()).unwrap();
    path
}

fn run(dir: &TempDir, history: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lotto-stats"))
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("--history")
        .arg(history)
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

#[test]
fn count_prints_entries() {
    let dir = TempDir::new().unwrap();
    let history = write_history(&dir, 12);

    let output = run(&dir, &history, &["count"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "12");
}

#[test]
fn analyze_json_is_parseable() {
    let dir = TempDir::new().unwrap();
    let history = write_history(&dir, 30);

    let output = run(&dir, &history, &["analyze", "--format", "json", "--top", "4"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["n"], 30);
    assert_eq!(report["top"].as_array().map(Vec::len), Some(4));
}

#[test]
fn analyze_rejects_bad_weights() {
    let dir = TempDir::new().unwrap();
    let history = write_history(&dir, 5);

    let output = run(&dir, &history, &["analyze", "--weights", "1,2,3"]);
    assert!(!output.status.success());
}

#[test]
fn backtest_writes_summary_and_csv() {
    let dir = TempDir::new().unwrap();
    let history = write_history(&dir, 20);
    let summary = dir.path().join("summary.json");
    let csv = dir.path().join("cases.csv");

    let output = run(
        &dir,
        &history,
        &[
            "backtest",
            "--bt-last",
            "8",
            "--output",
            summary.to_str().unwrap(),
            "--csv",
            csv.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Draws evaluated: 8"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(json["settings"]["btLast"], 8);
    assert_eq!(json["results"]["perCase"].as_array().map(Vec::len), Some(8));

    let rows = std::fs::read_to_string(&csv).unwrap();
    assert_eq!(rows.lines().count(), 9);
}

#[test]
fn backtest_json_stdout_stays_parseable_with_output_files() {
    let dir = TempDir::new().unwrap();
    let history = write_history(&dir, 20);
    let summary = dir.path().join("summary.json");
    let csv = dir.path().join("cases.csv");

    let output = run(
        &dir,
        &history,
        &[
            "backtest",
            "--bt-last",
            "5",
            "--format",
            "json",
            "--output",
            summary.to_str().unwrap(),
            "--csv",
            csv.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["n"], 5);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Summary written to"), "stderr was {stderr}");
    assert!(stderr.contains("Cases written to"), "stderr was {stderr}");
    assert!(summary.exists() && csv.exists());
}

#[test]
fn backtest_fails_on_tiny_history() {
    let dir = TempDir::new().unwrap();
    let history = write_history(&dir, 2);

    let output = run(&dir, &history, &["backtest"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not enough data"));
}

#[test]
fn record_then_count() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("new").join("history.json");

    let output = run(&dir, &history, &["record", "--id", "16092568", "--last2", "31"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let output = run(&dir, &history, &["count"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1");
}
