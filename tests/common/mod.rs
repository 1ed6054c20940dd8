//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files. All repositories are local, so the tests
//! need the `git` binary (a hard runtime dependency of the tool itself) but
//! no network access.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new();
//!     let c1 = fixture.commit_source(&[("a.txt", "hi")], &[], "first");
//!     fixture.cmd().arg("transform").assert().success();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

use assert_fs::TempDir;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::Command;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::git;
    pub use super::TestFixture;
}

/// Run git in `dir` with a fixed identity, panicking on failure and
/// returning trimmed stdout.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args([
            "-c",
            "user.name=fixture",
            "-c",
            "user.email=fixture@localhost",
        ])
        .args(args)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed in {}: {}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A sandbox holding a source repository, a workdir, and a config file.
pub struct TestFixture {
    pub temp: TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create the sandbox with an empty source repository on branch `main`
    /// and a config pointing at it.
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let fixture = TestFixture { temp };
        let source = fixture.source_path();
        std::fs::create_dir_all(&source).unwrap();
        git(&source, &["init", "--quiet"]);
        git(&source, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        fixture.write_config(&fixture.base_config());
        fixture
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn source_path(&self) -> PathBuf {
        self.path().join("source")
    }

    pub fn workdir_path(&self) -> PathBuf {
        self.path().join("work")
    }

    pub fn dest_path(&self) -> PathBuf {
        self.workdir_path().join("destination")
    }

    /// The minimal config: source + workdir, everything else default.
    pub fn base_config(&self) -> String {
        format!(
            "source: {}\nworkdir: {}\n",
            self.source_path().display(),
            self.workdir_path().display()
        )
    }

    pub fn write_config(&self, yaml: &str) {
        std::fs::write(self.path().join(".regraft.yaml"), yaml).unwrap();
    }

    /// Create a commit in the source repository: write `files`, delete
    /// `removed` paths, commit with `message`. Returns the commit id.
    pub fn commit_source(
        &self,
        files: &[(&str, &str)],
        removed: &[&str],
        message: &str,
    ) -> String {
        let source = self.source_path();
        for (path, content) in files {
            let full = source.join(path);
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(full, content).unwrap();
        }
        for path in removed {
            let full = source.join(path);
            if full.is_dir() {
                std::fs::remove_dir_all(full).unwrap();
            } else {
                std::fs::remove_file(full).unwrap();
            }
        }
        git(&source, &["add", "--all"]);
        git(&source, &["commit", "--quiet", "--allow-empty", "-m", message]);
        git(&source, &["rev-parse", "HEAD"])
    }

    /// Tag the current source head (lightweight).
    pub fn tag_source(&self, name: &str) {
        git(&self.source_path(), &["tag", name]);
    }

    /// Tag the current source head with an annotated tag.
    pub fn tag_source_annotated(&self, name: &str, message: &str) {
        git(&self.source_path(), &["tag", "-a", name, "-m", message]);
    }

    /// The regraft binary, running inside the sandbox.
    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("regraft").unwrap();
        cmd.current_dir(self.path());
        cmd
    }

    /// The checkpoint recorded for a source commit: the destination commit
    /// id, `EMPTY` for the empty sentinel, or `None` if unvisited.
    pub fn checkpoint(&self, source_commit: &str) -> Option<String> {
        let dest = self.dest_path();
        let output = Command::new("git")
            .arg("-C")
            .arg(&dest)
            .args([
                "rev-parse",
                "--verify",
                "--quiet",
                &format!("refs/regraft/{source_commit}"),
            ])
            .output()
            .expect("failed to run git");
        if !output.status.success() {
            return None;
        }
        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let empty_tree = git(&dest, &["mktree"]);
        if id == empty_tree {
            Some("EMPTY".to_string())
        } else {
            Some(id)
        }
    }

    /// Resolve a ref in the destination repository, if present.
    pub fn dest_ref(&self, name: &str) -> Option<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(self.dest_path())
            .args(["rev-parse", "--verify", "--quiet", name])
            .output()
            .expect("failed to run git");
        if output.status.success() {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            None
        }
    }

    /// All refs in the destination (heads, tags, and checkpoint markers),
    /// as stable text for idempotence comparisons.
    pub fn dest_refs_snapshot(&self) -> String {
        git(&self.dest_path(), &["for-each-ref"])
    }

    /// File content at a destination commit, if the path exists there.
    pub fn dest_file_at(&self, commit: &str, path: &str) -> Option<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(self.dest_path())
            .args(["show", &format!("{commit}:{path}")])
            .output()
            .expect("failed to run git");
        if output.status.success() {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            None
        }
    }

    /// Raw commit message bytes of a destination commit.
    pub fn dest_message(&self, commit: &str) -> Vec<u8> {
        let output = Command::new("git")
            .arg("-C")
            .arg(self.dest_path())
            .args(["cat-file", "commit", commit])
            .output()
            .expect("failed to run git");
        assert!(output.status.success());
        let raw = output.stdout;
        let pos = raw
            .windows(2)
            .position(|w| w == b"\n\n")
            .expect("malformed commit object");
        raw[pos + 2..].to_vec()
    }

    /// First parent of a destination commit, or `None` for a root commit.
    pub fn dest_parent(&self, commit: &str) -> Option<String> {
        let parents = git(&self.dest_path(), &["log", "-1", "--format=%P", commit]);
        parents.split_whitespace().next().map(str::to_string)
    }
}
