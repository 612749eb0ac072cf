use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn grid_expand() -> Command {
    Command::cargo_bin("grid-expand").expect("binary")
}

#[test]
fn expands_two_by_two_to_stdout() {
    let dir = TempDir::new().expect("tempdir");
    let input = write(dir.path(), "grid.json", "[[1, 2], [3, 4]]");

    let output = grid_expand()
        .arg("--input")
        .arg(&input)
        .args(["--rows", "3", "--cols", "3"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(
        json["data"],
        serde_json::json!([[1.0, 0.0, 2.0], [0.0, 0.0, 0.0], [3.0, 0.0, 4.0]])
    );
    assert_eq!(
        json["mask"],
        serde_json::json!([[1, 0, 1], [0, 0, 0], [1, 0, 1]])
    );
    assert_eq!(json["step_rows"], 2);
    assert_eq!(json["step_cols"], 2);
}

#[test]
fn params_file_and_output_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = write(dir.path(), "grid.json", "[[5, 6, 7]]");
    let params = write(
        dir.path(),
        "params.json",
        r#"{"target_rows": 4, "target_cols": 3}"#,
    );
    let out_path = dir.path().join("out.json");

    grid_expand()
        .arg("-i")
        .arg(&input)
        .arg("--params")
        .arg(&params)
        .arg("-o")
        .arg(&out_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let json: Value =
        serde_json::from_str(&fs::read_to_string(&out_path).expect("output")).expect("json");
    assert_eq!(json["data"][0], serde_json::json!([5.0, 6.0, 7.0]));
    assert_eq!(json["mask"][0], serde_json::json!([1, 1, 1]));
    for r in 1..4 {
        assert_eq!(json["mask"][r], serde_json::json!([0, 0, 0]));
    }
}

#[test]
fn flags_override_params_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = write(dir.path(), "grid.json", "[[1], [2]]");
    let params = write(
        dir.path(),
        "params.json",
        r#"{"target_rows": 3, "target_cols": 1, "step_rows": 2}"#,
    );

    let output = grid_expand()
        .arg("--input")
        .arg(&input)
        .arg("--params")
        .arg(&params)
        .args(["--rows", "5"])
        .output()
        .expect("run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("step 2 along rows yields 3 slots"), "{stderr}");
}

#[test]
fn smaller_target_fails() {
    let dir = TempDir::new().expect("tempdir");
    let input = write(dir.path(), "grid.json", "[[1, 2, 3], [4, 5, 6], [7, 8, 9]]");

    grid_expand()
        .arg("--input")
        .arg(&input)
        .args(["--rows", "2", "--cols", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "target size must be greater than or equal to the original size",
        ));
}

#[test]
fn ragged_input_fails() {
    let dir = TempDir::new().expect("tempdir");
    let input = write(dir.path(), "grid.json", "[[1, 2], [3]]");

    grid_expand()
        .arg("--input")
        .arg(&input)
        .args(["--rows", "4", "--cols", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 1 has 1 elements"));
}

#[test]
fn missing_cols_fails() {
    let dir = TempDir::new().expect("tempdir");
    let input = write(dir.path(), "grid.json", "[[1]]");

    grid_expand()
        .arg("--input")
        .arg(&input)
        .args(["--rows", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing target cols"));
}

#[test]
fn oversized_target_fails_cleanly() {
    let dir = TempDir::new().expect("tempdir");
    let input = write(dir.path(), "grid.json", "[[1]]");
    let rows = (1u128 << (usize::BITS / 2 + 1)).to_string();
    let cols = (1u128 << (usize::BITS / 2 - 1)).to_string();

    grid_expand()
        .arg("--input")
        .arg(&input)
        .args(["--rows", rows.as_str(), "--cols", cols.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large to allocate"))
        .stderr(predicate::str::contains("panicked").not());
}
