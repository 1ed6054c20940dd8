//! Staging: materialize one source commit's transformed content.
//!
//! Each commit is staged into a brand-new scratch area that is torn down
//! unconditionally when staging ends: on success the [`StagedTree`] owns
//! it until the commit is written, on skip and on error it is released
//! immediately. Because the scratch area starts empty, the checked-out tree
//! exactly reflects the filtered commit with no leftovers from a prior
//! iteration.
//!
//! Two per-commit conditions end staging with a [`SkipReason`] instead of a
//! tree: a pathspec that does not exist in this specific commit, and a
//! transform hook that reports failure. Both quarantine the commit; any
//! other failure aborts the run.

use std::fmt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::git::{CheckoutOutcome, CommitId, GitRepo};
use crate::hook::{HookStatus, TransformHook};
use crate::path::is_contained_relative;

/// Why a commit contributes no content to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The configured path restriction does not exist in this commit.
    MissingPathspec,
    /// The transform hook reported failure.
    HookRejected,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingPathspec => f.write_str("pathspec not present in commit"),
            SkipReason::HookRejected => f.write_str("transform hook rejected the commit"),
        }
    }
}

/// Working content ready to be committed. Owns its scratch area; dropping
/// the value releases it.
pub struct StagedTree {
    scratch: TempDir,
}

impl StagedTree {
    /// The directory holding the staged content.
    pub fn path(&self) -> PathBuf {
        self.scratch.path().join("tree")
    }
}

/// Result of staging one commit.
pub enum StageOutcome {
    Staged(StagedTree),
    Skipped(SkipReason),
}

/// Stages source commits into scratch worktrees.
pub struct WorktreeStager<'a> {
    source: &'a GitRepo,
    pathspec: &'a [String],
    overlay: Option<&'a Path>,
    hook: Option<&'a dyn TransformHook>,
}

impl<'a> WorktreeStager<'a> {
    pub fn new(
        source: &'a GitRepo,
        pathspec: &'a [String],
        overlay: Option<&'a Path>,
        hook: Option<&'a dyn TransformHook>,
    ) -> Self {
        WorktreeStager {
            source,
            pathspec,
            overlay,
            hook,
        }
    }

    /// Stage one commit: filtered checkout, overlay injection, optional
    /// hook.
    pub fn stage(&self, commit: &CommitId) -> Result<StageOutcome> {
        let scratch = tempfile::Builder::new().prefix("regraft-stage-").tempdir()?;
        let tree = scratch.path().join("tree");
        std::fs::create_dir(&tree)?;
        // The checkout index lives next to the tree, not inside it, so it
        // can never leak into the committed snapshot.
        let index = scratch.path().join("checkout.index");

        match self
            .source
            .checkout_into(commit, self.pathspec, &tree, &index)?
        {
            CheckoutOutcome::PathspecMissing => {
                return Ok(StageOutcome::Skipped(SkipReason::MissingPathspec));
            }
            CheckoutOutcome::Completed => {}
        }

        if let Some(overlay) = self.overlay {
            copy_overlay(overlay, &tree)?;
        }

        if let Some(hook) = self.hook {
            if hook.transform(&tree)? == HookStatus::Rejected {
                return Ok(StageOutcome::Skipped(SkipReason::HookRejected));
            }
        }

        Ok(StageOutcome::Staged(StagedTree { scratch }))
    }
}

/// Copy the overlay directory over a staged tree, overwriting on path
/// conflicts. Overlay content always wins over source content.
///
/// A `.git` directory inside the overlay is ignored, so an overlay that is
/// itself a checkout can be used directly.
pub fn copy_overlay(overlay: &Path, tree: &Path) -> Result<()> {
    if !overlay.is_dir() {
        return Err(Error::Overlay {
            message: format!("overlay directory not found: {}", overlay.display()),
        });
    }
    let walker = WalkDir::new(overlay)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");
    for entry in walker {
        let entry = entry.map_err(|e| Error::Overlay {
            message: e.to_string(),
        })?;
        let relative = entry
            .path()
            .strip_prefix(overlay)
            .map_err(|e| Error::Overlay {
                message: e.to_string(),
            })?;
        if relative.as_os_str().is_empty() {
            continue;
        }
        if !is_contained_relative(relative) {
            return Err(Error::Overlay {
                message: format!(
                    "overlay entry escapes the staged tree: {}",
                    relative.display()
                ),
            });
        }
        let target = tree.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
