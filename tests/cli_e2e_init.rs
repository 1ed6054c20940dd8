//! End-to-end tests for the `init` command.
//!
//! These tests invoke the actual CLI binary and validate the behavior of
//! the `init` subcommand from a user's perspective: workspace creation,
//! idempotence, overlay seeding, and configuration error reporting.

mod common;
use common::prelude::*;

#[test]
fn test_init_creates_workspace() {
    let fixture = TestFixture::new();
    fixture.commit_source(&[("a.txt", "a")], &[], "first");

    fixture
        .cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Preparing workspace"))
        .stdout(predicate::str::contains("Workspace ready"));

    assert!(fixture.workdir_path().join("source.git").join("HEAD").is_file());
    assert!(fixture.dest_path().join(".git").is_dir());
    // The checkpoint store is seeded on first init
    assert!(fixture.dest_ref("refs/regraft/root").is_some());
}

#[test]
fn test_init_is_idempotent() {
    let fixture = TestFixture::new();
    fixture.commit_source(&[("a.txt", "a")], &[], "first");

    fixture.cmd().arg("init").assert().success();
    fixture
        .cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("source clone already present"))
        .stdout(predicate::str::contains("destination already present"));
}

#[test]
fn test_init_seeds_overlay_into_destination() {
    let fixture = TestFixture::new();
    fixture.commit_source(&[("a.txt", "a")], &[], "first");

    let overlay = fixture.path().join("overlay");
    std::fs::create_dir_all(&overlay).unwrap();
    std::fs::write(overlay.join("LICENSE"), "fixed license").unwrap();
    fixture.write_config(&format!(
        "{}overlay: {}\n",
        fixture.base_config(),
        overlay.display()
    ));

    fixture.cmd().arg("init").assert().success();
    assert_eq!(
        std::fs::read_to_string(fixture.dest_path().join("LICENSE")).unwrap(),
        "fixed license"
    );
}

#[test]
fn test_init_fails_without_config_file() {
    let fixture = TestFixture::new();
    std::fs::remove_file(fixture.path().join(".regraft.yaml")).unwrap();

    fixture
        .cmd()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn test_init_fails_without_source() {
    let fixture = TestFixture::new();
    fixture.write_config("workdir: ./work\n");

    fixture
        .cmd()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("source repository is not configured"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn test_init_respects_config_flag() {
    let fixture = TestFixture::new();
    fixture.commit_source(&[("a.txt", "a")], &[], "first");

    let alt = fixture.path().join("alt.yaml");
    std::fs::write(&alt, fixture.base_config()).unwrap();
    std::fs::remove_file(fixture.path().join(".regraft.yaml")).unwrap();

    fixture
        .cmd()
        .arg("init")
        .arg("--config")
        .arg(&alt)
        .assert()
        .success();
}
