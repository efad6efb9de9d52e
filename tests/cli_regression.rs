// Regression tests: CLI surfaces and exit codes.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

#[test]
fn check_reports_syntax_errors_and_fails() {
    let bad_file = "tests/bad_check.tl";
    fs::write(bad_file, "int x\n" /* missing semicolon */).unwrap();

    let mut cmd = Command::cargo_bin("tinylang").unwrap();
    cmd.arg("check").arg(bad_file);
    cmd.assert().failure().stderr(contains("Syntax error"));

    let _ = fs::remove_file(bad_file);
}

#[test]
fn check_accepts_a_valid_program() {
    let good_file = "tests/good_check.tl";
    fs::write(good_file, "int x;\nx = 1 + 2;\nprint(x);\n").unwrap();

    let mut cmd = Command::cargo_bin("tinylang").unwrap();
    cmd.arg("check").arg(good_file);
    cmd.assert().success().stdout(contains("ok"));

    let _ = fs::remove_file(good_file);
}

#[test]
fn analyze_returns_success_shaped_json_even_on_failure() {
    let bad_file = "tests/bad_analyze.tl";
    fs::write(bad_file, "x = 1 +;").unwrap();

    let mut cmd = Command::cargo_bin("tinylang").unwrap();
    cmd.arg("analyze").arg(bad_file);
    cmd.assert()
        .success()
        .stdout(contains("\"errors\"").and(contains("\"tokens\"")))
        .stdout(contains("Syntax error."));

    let _ = fs::remove_file(bad_file);
}

#[test]
fn dot_emits_a_digraph() {
    let good_file = "tests/good_dot.tl";
    fs::write(good_file, "print(1);").unwrap();

    let mut cmd = Command::cargo_bin("tinylang").unwrap();
    cmd.arg("dot").arg(good_file);
    cmd.assert()
        .success()
        .stdout(contains("digraph ParseTree"))
        .stdout(contains("shape=box"));

    let _ = fs::remove_file(good_file);
}
