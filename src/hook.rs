//! # Transform Hook
//!
//! An optional user-supplied mutation step, run once per staged commit
//! before it is committed to the destination. The hook is modeled as a
//! narrow capability: given the staged tree, it may rewrite files in place
//! and must report acceptance or rejection. A rejection quarantines the
//! commit (the chain continues on the unchanged baseline); it is not an
//! error.

use std::path::Path;
use std::process::Command;

use crate::error::Result;

/// Outcome reported by a transform hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStatus {
    /// The staged tree is ready to commit.
    Accepted,
    /// The commit must be quarantined.
    Rejected,
}

/// Capability to mutate a staged tree before it is committed.
///
/// Invoked at most once per non-skipped commit. Implementations must treat
/// the staged tree as theirs to rewrite; `Err` is reserved for
/// infrastructure failure (it aborts the run), while a content-level "this
/// commit should not be published" decision is [`HookStatus::Rejected`].
pub trait TransformHook {
    fn transform(&self, staged_tree: &Path) -> Result<HookStatus>;
}

/// Hook that runs a user-configured shell command with the staged tree as
/// its working directory. Exit status zero is acceptance; anything else is
/// rejection.
pub struct ShellHook {
    command: String,
}

impl ShellHook {
    pub fn new<S: Into<String>>(command: S) -> Self {
        ShellHook {
            command: command.into(),
        }
    }
}

impl TransformHook for ShellHook {
    fn transform(&self, staged_tree: &Path) -> Result<HookStatus> {
        let status = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .current_dir(staged_tree)
            .status()?;
        if status.success() {
            Ok(HookStatus::Accepted)
        } else {
            Ok(HookStatus::Rejected)
        }
    }
}
