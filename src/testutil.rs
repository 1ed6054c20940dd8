//! Helpers for building throwaway repositories in unit tests.
//!
//! Commits are created through the same plumbing the tool itself uses,
//! except for merge commits, which the production code never creates and
//! which are therefore written with a direct `commit-tree` invocation.

use std::cell::Cell;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tempfile::TempDir;

use crate::git::{CommitId, GitRepo};

/// A temporary repository whose head is `refs/heads/main`.
pub struct ScratchRepo {
    pub temp: TempDir,
    pub repo: GitRepo,
    counter: Cell<u32>,
}

impl ScratchRepo {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let repo = GitRepo::init(&temp.path().join("repo")).unwrap();
        ScratchRepo {
            temp,
            repo,
            counter: Cell::new(0),
        }
    }

    /// Root directory of the repository (usable as a clone source).
    pub fn root(&self) -> PathBuf {
        self.temp.path().join("repo")
    }

    /// Create a commit with the given files and parents and advance
    /// `refs/heads/main` to it. Zero parents makes a root commit; two or
    /// more make a merge commit.
    pub fn commit(&self, files: &[(&str, &str)], message: &[u8], parents: &[&CommitId]) -> CommitId {
        let serial = self.counter.get();
        self.counter.set(serial + 1);

        let stage = self.temp.path().join(format!("stage-{serial}"));
        std::fs::create_dir_all(&stage).unwrap();
        for (path, content) in files {
            let full = stage.join(path);
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(full, content).unwrap();
        }
        let index = self.temp.path().join(format!("index-{serial}"));
        let tree = self.repo.write_tree_from(&stage, &index).unwrap();

        let commit = match parents {
            [] => self.repo.commit_tree(&tree, None, message).unwrap(),
            [parent] => self.repo.commit_tree(&tree, Some(parent), message).unwrap(),
            many => self.commit_tree_multi(&tree, many, message),
        };
        self.repo
            .update_ref("refs/heads/main", commit.as_str())
            .unwrap();
        std::fs::remove_dir_all(&stage).unwrap();
        commit
    }

    /// Tag a commit (lightweight).
    pub fn tag(&self, name: &str, commit: &CommitId) {
        self.repo
            .update_ref(&format!("refs/tags/{name}"), commit.as_str())
            .unwrap();
    }

    fn commit_tree_multi(&self, tree: &str, parents: &[&CommitId], message: &[u8]) -> CommitId {
        let mut cmd = Command::new("git");
        cmd.arg("--git-dir")
            .arg(self.repo.git_dir())
            .args(["commit-tree", tree]);
        for parent in parents {
            cmd.args(["-p", parent.as_str()]);
        }
        cmd.env("GIT_AUTHOR_NAME", "scratch")
            .env("GIT_AUTHOR_EMAIL", "scratch@localhost")
            .env("GIT_COMMITTER_NAME", "scratch")
            .env("GIT_COMMITTER_EMAIL", "scratch@localhost")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let mut child = cmd.spawn().unwrap();
        child.stdin.take().unwrap().write_all(message).unwrap();
        let output = child.wait_with_output().unwrap();
        assert!(
            output.status.success(),
            "commit-tree failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        CommitId::new(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
