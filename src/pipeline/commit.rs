//! Committing: snapshot a staged tree into the destination history.
//!
//! The snapshot is built with plumbing: a fresh scratch index is populated
//! solely from the staged tree, then `write-tree`/`commit-tree` produce a
//! commit holding exactly that content. No destination worktree state
//! participates, so nothing from unrelated prior operations can leak into
//! the snapshot, and the root-commit case (empty baseline) needs no special
//! handling.
//!
//! The produced commit has exactly one parent (the baseline) and a
//! message copied byte-for-byte from the source commit. The checkpoint for
//! the source commit is recorded before returning.

use tempfile::TempDir;

use crate::checkpoint::{Baseline, CheckpointStore};
use crate::error::Result;
use crate::git::{CommitId, GitRepo};
use crate::pipeline::stage::StagedTree;

/// Write one destination commit for `source_id` and record its checkpoint.
///
/// Returns the new commit id, which becomes the baseline for the next
/// chain element.
pub fn write_commit(
    dest: &GitRepo,
    store: &mut dyn CheckpointStore,
    source_id: &CommitId,
    staged: &StagedTree,
    baseline: &Baseline,
    message: &[u8],
) -> Result<CommitId> {
    let scratch = TempDir::new()?;
    let index = scratch.path().join("commit.index");
    let tree = dest.write_tree_from(&staged.path(), &index)?;
    let commit = dest.commit_tree(&tree, baseline.commit(), message)?;
    store.put(source_id, &Baseline::Commit(commit.clone()))?;
    log::info!(
        "materialized {} as {} (parent {})",
        source_id.short(),
        commit.short(),
        baseline
    );
    Ok(commit)
}
