//! End-to-end tests for CLI exit codes and top-level argument handling.

mod common;
use common::prelude::*;

#[test]
fn test_help_exits_zero() {
    let fixture = TestFixture::new();
    fixture
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("transform"))
        .stdout(predicate::str::contains("mirror"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let fixture = TestFixture::new();
    fixture.cmd().arg("frobnicate").assert().failure();
}

#[test]
fn test_missing_config_exits_nonzero() {
    let fixture = TestFixture::new();
    std::fs::remove_file(fixture.path().join(".regraft.yaml")).unwrap();
    fixture.cmd().arg("transform").assert().failure();
}

#[test]
fn test_completions_generate() {
    let fixture = TestFixture::new();
    fixture
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("regraft"));
}

#[test]
fn test_version_flag() {
    let fixture = TestFixture::new();
    fixture
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("regraft"));
}
