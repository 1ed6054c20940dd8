//! # Git Engine Access
//!
//! This module is the only place that talks to the version-control engine.
//! It drives the system `git` binary through `std::process::Command`, which
//! automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig
//!
//! ## Design
//!
//! Every operation goes through a [`GitRepo`] handle that carries the
//! repository's git directory explicitly (`--git-dir`); no operation depends
//! on the process working directory or any other ambient state. Scratch
//! worktrees and scratch index files are likewise passed in as parameters,
//! so the same handle can serve a bare mirror clone and a regular
//! repository alike.
//!
//! Failures surface as [`Error::GitCommand`] with the offending subcommand
//! and stderr attached. The one deliberate exception is a filtered checkout
//! whose pathspec does not exist in the requested commit: that is a
//! recoverable per-commit condition, reported as
//! [`CheckoutOutcome::PathspecMissing`] rather than an error.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::error::{Error, Result};

/// Fixed committer/author identity for produced commits. Only the message
/// body is propagated from the source.
const COMMIT_IDENT_NAME: &str = "regraft";
const COMMIT_IDENT_EMAIL: &str = "regraft@localhost";

/// Opaque identifier naming one immutable commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        CommitId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for log lines.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(10)]
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One head or tag in a repository, peeled to the commit it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefEntry {
    /// Full ref name, e.g. `refs/heads/main` or `refs/tags/v1.0`.
    pub name: String,
    /// The commit the ref (or the annotated tag it points to) names.
    pub target: CommitId,
}

/// Result of a filtered checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The pathspec matched and the worktree now holds the filtered content.
    Completed,
    /// The pathspec does not exist in this commit. Recoverable: the caller
    /// quarantines the commit and continues the chain.
    PathspecMissing,
}

/// Handle to one local repository, bare or not.
#[derive(Debug, Clone)]
pub struct GitRepo {
    git_dir: PathBuf,
}

impl GitRepo {
    /// Open an existing repository at `path` (either a regular checkout with
    /// a `.git` directory or a bare/mirror repository).
    ///
    /// The git directory is stored absolute, so operations that change the
    /// subprocess working directory still address the right repository.
    pub fn open(path: &Path) -> Result<GitRepo> {
        let dotgit = path.join(".git");
        let git_dir = if dotgit.is_dir() { dotgit } else { path.to_path_buf() };
        let not_a_repo = || Error::GitCommand {
            command: "open".to_string(),
            repo: path.display().to_string(),
            stderr: "not a git repository".to_string(),
        };
        let git_dir = git_dir.canonicalize().map_err(|_| not_a_repo())?;
        if !git_dir.join("HEAD").is_file() {
            return Err(not_a_repo());
        }
        Ok(GitRepo { git_dir })
    }

    /// Create a new non-bare repository at `path`.
    pub fn init(path: &Path) -> Result<GitRepo> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let output = Command::new("git")
            .arg("init")
            .arg("--quiet")
            .arg(path)
            .output()?;
        if !output.status.success() {
            return Err(Error::GitCommand {
                command: "init".to_string(),
                repo: path.display().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        GitRepo::open(path)
    }

    /// Mirror-clone `url` into `path`.
    ///
    /// A mirror clone keeps the remote's heads and tags under their own
    /// names, so a later fetch force-overwrites them in place.
    pub fn clone_mirror(url: &str, path: &Path) -> Result<GitRepo> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let output = Command::new("git")
            .args(["clone", "--mirror", "--quiet", url])
            .arg(path)
            .output()
            .map_err(|e| Error::GitClone {
                url: url.to_string(),
                message: e.to_string(),
                hint: None,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);

            // Surface a hint for common auth failures
            let hint = if stderr.contains("Authentication failed")
                || stderr.contains("Permission denied")
                || stderr.contains("Could not read from remote repository")
            {
                Some(
                    "make sure you have access to the repository: \
                     SSH key in ssh-agent, git credentials, or a personal access token"
                        .to_string(),
                )
            } else {
                None
            };

            return Err(Error::GitClone {
                url: url.to_string(),
                message: stderr.into_owned(),
                hint,
            });
        }

        GitRepo::open(path)
    }

    /// The git directory this handle points at.
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    fn base_command(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("--git-dir").arg(&self.git_dir);
        // Error detection matches on stderr text, so keep messages unlocalized
        cmd.env("LC_ALL", "C");
        cmd
    }

    fn check(&self, args_label: &str, output: &Output) -> Result<()> {
        if output.status.success() {
            Ok(())
        } else {
            Err(Error::GitCommand {
                command: args_label.to_string(),
                repo: self.git_dir.display().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }

    /// Run a git subcommand against this repository and return its output,
    /// failing on nonzero exit.
    fn run(&self, args: &[&str]) -> Result<Output> {
        let output = self.base_command().args(args).output()?;
        self.check(&args.join(" "), &output)?;
        Ok(output)
    }

    /// Run a git subcommand with bytes piped to stdin.
    fn run_with_stdin(&self, args: &[&str], envs: &[(&str, &str)], stdin: &[u8]) -> Result<Output> {
        let mut cmd = self.base_command();
        cmd.args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in envs {
            cmd.env(key, value);
        }
        let mut child = cmd.spawn()?;
        child
            .stdin
            .take()
            .ok_or_else(|| Error::GitCommand {
                command: args.join(" "),
                repo: self.git_dir.display().to_string(),
                stderr: "failed to open stdin".to_string(),
            })?
            .write_all(stdin)?;
        let output = child.wait_with_output()?;
        self.check(&args.join(" "), &output)?;
        Ok(output)
    }

    /// Refresh every ref from the named remote, force-overwriting local
    /// heads and tags and pruning refs deleted upstream.
    pub fn fetch_prune(&self, remote: &str) -> Result<()> {
        self.run(&["fetch", "--prune", "--quiet", remote])?;
        Ok(())
    }

    /// List every head and tag, peeling annotated tags to their commit.
    pub fn list_refs(&self) -> Result<Vec<RefEntry>> {
        let output = self.run(&[
            "for-each-ref",
            "--format=%(refname)%00%(objectname)%00%(*objectname)",
            "refs/heads",
            "refs/tags",
        ])?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut refs = Vec::new();
        for line in stdout.lines() {
            let fields: Vec<&str> = line.split('\0').collect();
            if fields.len() != 3 {
                continue;
            }
            let target = if fields[2].is_empty() { fields[1] } else { fields[2] };
            refs.push(RefEntry {
                name: fields[0].to_string(),
                target: CommitId::new(target),
            });
        }
        Ok(refs)
    }

    /// Resolve a revision to an object id, or `None` if it does not exist.
    pub fn rev_parse(&self, rev: &str) -> Result<Option<CommitId>> {
        let output = self
            .base_command()
            .args(["rev-parse", "--verify", "--quiet", rev])
            .output()?;
        if !output.status.success() {
            return Ok(None);
        }
        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if id.is_empty() {
            Ok(None)
        } else {
            Ok(Some(CommitId::new(id)))
        }
    }

    /// The first parent of a commit, or `None` for a root commit.
    ///
    /// Further parents of a merge commit are deliberately not reported; the
    /// mirrored lineage is flattened to one parent per hop.
    pub fn first_parent(&self, commit: &CommitId) -> Result<Option<CommitId>> {
        let output = self.run(&["log", "-1", "--format=%P", commit.as_str()])?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .split_whitespace()
            .next()
            .map(|parent| CommitId::new(parent.to_string())))
    }

    /// First-parent ancestry of `tip`, oldest first.
    ///
    /// Equivalent to the backward checkpoint walk when the store is empty;
    /// the chain resolver's output is checked against this in tests.
    pub fn rev_list_first_parent(&self, tip: &CommitId) -> Result<Vec<CommitId>> {
        let output = self.run(&["rev-list", "--first-parent", "--reverse", tip.as_str()])?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .map(|line| CommitId::new(line.trim().to_string()))
            .collect())
    }

    /// The commit message, byte-for-byte as stored in the commit object,
    /// including embedded newlines and trailing content.
    pub fn commit_message(&self, commit: &CommitId) -> Result<Vec<u8>> {
        let output = self.run(&["cat-file", "commit", commit.as_str()])?;
        let raw = output.stdout;
        // The message starts after the first blank line of the object.
        let separator = b"\n\n";
        match raw.windows(separator.len()).position(|w| w == separator) {
            Some(pos) => Ok(raw[pos + separator.len()..].to_vec()),
            None => Ok(Vec::new()),
        }
    }

    /// Check out `commit`, restricted to `pathspec`, into the given scratch
    /// worktree and scratch index.
    ///
    /// The worktree is expected to be empty; afterwards it holds exactly the
    /// filtered content of the commit. A pathspec that matches nothing in
    /// this commit yields [`CheckoutOutcome::PathspecMissing`].
    pub fn checkout_into(
        &self,
        commit: &CommitId,
        pathspec: &[String],
        worktree: &Path,
        index_file: &Path,
    ) -> Result<CheckoutOutcome> {
        let mut cmd = self.base_command();
        cmd.args(["-c", "core.bare=false", "checkout", "--force", "--quiet"])
            .arg(commit.as_str())
            .arg("--")
            .args(pathspec)
            .env("GIT_WORK_TREE", worktree)
            .env("GIT_INDEX_FILE", index_file);
        let output = cmd.output()?;
        if output.status.success() {
            return Ok(CheckoutOutcome::Completed);
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("did not match any file") {
            return Ok(CheckoutOutcome::PathspecMissing);
        }
        Err(Error::GitCommand {
            command: format!("checkout {}", commit.short()),
            repo: self.git_dir.display().to_string(),
            stderr: stderr.into_owned(),
        })
    }

    /// Snapshot a directory into a tree object using a scratch index,
    /// returning the tree id.
    ///
    /// The index starts out fresh, so the resulting tree holds exactly the
    /// directory's content; no prior repository state participates.
    pub fn write_tree_from(&self, worktree: &Path, index_file: &Path) -> Result<String> {
        let add = self
            .base_command()
            .args(["-c", "core.bare=false", "add", "--all", "--force", "."])
            .current_dir(worktree)
            .env("GIT_WORK_TREE", worktree)
            .env("GIT_INDEX_FILE", index_file)
            .output()?;
        self.check("add --all", &add)?;

        let write_tree = self
            .base_command()
            .arg("write-tree")
            .env("GIT_INDEX_FILE", index_file)
            .output()?;
        self.check("write-tree", &write_tree)?;
        Ok(String::from_utf8_lossy(&write_tree.stdout).trim().to_string())
    }

    /// Create a commit object for `tree` with the given single parent (none
    /// for a root commit) and a verbatim message.
    ///
    /// Identity is fixed; only the message body comes from the source.
    pub fn commit_tree(
        &self,
        tree: &str,
        parent: Option<&CommitId>,
        message: &[u8],
    ) -> Result<CommitId> {
        let mut args = vec!["commit-tree", tree];
        if let Some(parent) = parent {
            args.push("-p");
            args.push(parent.as_str());
        }
        let envs = [
            ("GIT_AUTHOR_NAME", COMMIT_IDENT_NAME),
            ("GIT_AUTHOR_EMAIL", COMMIT_IDENT_EMAIL),
            ("GIT_COMMITTER_NAME", COMMIT_IDENT_NAME),
            ("GIT_COMMITTER_EMAIL", COMMIT_IDENT_EMAIL),
        ];
        let output = self.run_with_stdin(&args, &envs, message)?;
        Ok(CommitId::new(
            String::from_utf8_lossy(&output.stdout).trim().to_string(),
        ))
    }

    /// Point `name` (a fully qualified ref) at `target`.
    pub fn update_ref(&self, name: &str, target: &str) -> Result<()> {
        self.run(&["update-ref", name, target])?;
        Ok(())
    }

    /// The id of the empty tree object, written into the object store if
    /// needed. Computed rather than hardcoded so SHA-256 repositories work.
    pub fn empty_tree(&self) -> Result<String> {
        let output = self.run_with_stdin(&["mktree"], &[], b"")?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Force-push every head and tag to `url`. Checkpoint markers live in
    /// their own namespace and are never pushed.
    pub fn push_mirror(&self, url: &str) -> Result<()> {
        self.run(&[
            "push",
            "--force",
            "--quiet",
            url,
            "refs/heads/*:refs/heads/*",
            "refs/tags/*:refs/tags/*",
        ])?;
        Ok(())
    }
}
