//! Chain resolution: find the unresolved portion of a ref's history.
//!
//! Starting from a ref tip, ancestry is walked backward along *first*
//! parents only. Merge topology beyond the first parent is deliberately
//! ignored, flattening each lineage to one parent per hop. The walk stops
//! at the first commit with a recorded checkpoint (whose value becomes the
//! chain's baseline) or at the graph root (baseline
//! [`Baseline::Empty`]). The collected commits are then reversed so the
//! caller replays them oldest-first.
//!
//! For a fixed checkpoint store state the result is fully deterministic.

use crate::checkpoint::{Baseline, CheckpointStore};
use crate::error::Result;
use crate::git::{CommitId, GitRepo};

/// The ordered work remaining for one ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    /// Commits without a checkpoint, oldest first.
    pub pending: Vec<CommitId>,
    /// What the first pending commit builds on.
    pub baseline: Baseline,
}

impl Chain {
    /// Whether the ref is already fully mirrored.
    pub fn is_resolved(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Walk backward from `tip` collecting unvisited commits, then reverse.
pub fn resolve_chain(
    source: &GitRepo,
    store: &dyn CheckpointStore,
    tip: &CommitId,
) -> Result<Chain> {
    let mut pending = Vec::new();
    let mut current = tip.clone();
    let baseline = loop {
        if let Some(checkpoint) = store.get(&current)? {
            break checkpoint;
        }
        pending.push(current.clone());
        match source.first_parent(&current)? {
            Some(parent) => current = parent,
            None => break Baseline::Empty,
        }
    };
    pending.reverse();
    log::debug!(
        "resolved chain for {}: {} pending, baseline {}",
        tip.short(),
        pending.len(),
        baseline
    );
    Ok(Chain { pending, baseline })
}
