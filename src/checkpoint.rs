//! # Checkpoint Store
//!
//! Durable memoization of per-commit outcomes: each visited source commit
//! maps to the destination commit produced for it, or to the [`Baseline::Empty`]
//! sentinel when nothing has ever been produced for its lineage. The store
//! is what makes repeated runs incremental: the chain resolver stops the
//! moment it reaches a checkpointed ancestor.
//!
//! ## Persistence
//!
//! The production implementation, [`RefCheckpointStore`], keeps one marker
//! ref per visited source commit under `refs/regraft/` in the destination
//! repository. Ref updates are atomic, survive process restarts, and sit
//! outside `refs/heads/*` / `refs/tags/*`, so `push` never publishes them.
//! The `Empty` sentinel is encoded by pointing the marker at the repository's
//! empty tree object. A `refs/regraft/root` marker is seeded at
//! initialization and doubles as the "store exists" indicator.
//!
//! ## Semantics
//!
//! Once a key is written during a run it is never recomputed within that
//! run, and a commit checkpointed as skipped is never re-evaluated by later
//! runs, even if the pathspec or hook configuration changes. The first
//! decision is permanent; this is a documented property of the memoization
//! design. The store grows monotonically and is never pruned. A single
//! writer process is assumed; concurrent runs against the same destination
//! must be serialized externally.

use crate::error::{Error, Result};
use crate::git::{CommitId, GitRepo};

/// Ref namespace holding one marker per visited source commit.
pub const MARKER_NAMESPACE: &str = "refs/regraft";

/// Marker name recording that the store has been seeded.
const ROOT_MARKER: &str = "root";

/// The destination-side value of a checkpoint: the commit the next chain
/// element builds on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Baseline {
    /// Nothing has been produced for this lineage yet; the next produced
    /// commit will be a root commit.
    Empty,
    /// The destination commit to use as the sole parent.
    Commit(CommitId),
}

impl Baseline {
    /// The destination commit, if one was ever produced.
    pub fn commit(&self) -> Option<&CommitId> {
        match self {
            Baseline::Empty => None,
            Baseline::Commit(id) => Some(id),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Baseline::Empty)
    }
}

impl std::fmt::Display for Baseline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Baseline::Empty => f.write_str("EMPTY"),
            Baseline::Commit(id) => write!(f, "{}", id),
        }
    }
}

/// Durable mapping from source commit to checkpointed outcome.
///
/// The backing representation is an implementation detail behind this
/// interface; see [`RefCheckpointStore`] for the production one.
pub trait CheckpointStore {
    /// Look up the recorded outcome for a source commit.
    fn get(&self, key: &CommitId) -> Result<Option<Baseline>>;

    /// Record the outcome for a source commit, overwriting any prior value.
    fn put(&mut self, key: &CommitId, value: &Baseline) -> Result<()>;
}

/// Checkpoint store backed by marker refs in the destination repository.
pub struct RefCheckpointStore {
    repo: GitRepo,
    empty_tree: String,
}

impl RefCheckpointStore {
    /// Open the store inside the given destination repository.
    pub fn open(repo: &GitRepo) -> Result<RefCheckpointStore> {
        let empty_tree = repo.empty_tree()?;
        Ok(RefCheckpointStore {
            repo: repo.clone(),
            empty_tree,
        })
    }

    fn marker_ref(key: &str) -> String {
        format!("{}/{}", MARKER_NAMESPACE, key)
    }

    /// Whether the store has been seeded for this destination.
    pub fn is_seeded(&self) -> Result<bool> {
        Ok(self.repo.rev_parse(&Self::marker_ref(ROOT_MARKER))?.is_some())
    }

    /// Seed the store: record the root marker with the `Empty` sentinel.
    /// Idempotent.
    pub fn seed(&mut self) -> Result<()> {
        self.repo
            .update_ref(&Self::marker_ref(ROOT_MARKER), &self.empty_tree)
    }
}

impl CheckpointStore for RefCheckpointStore {
    fn get(&self, key: &CommitId) -> Result<Option<Baseline>> {
        let marker = Self::marker_ref(key.as_str());
        match self.repo.rev_parse(&marker)? {
            None => Ok(None),
            Some(id) if id.as_str() == self.empty_tree => Ok(Some(Baseline::Empty)),
            Some(id) => Ok(Some(Baseline::Commit(id))),
        }
    }

    fn put(&mut self, key: &CommitId, value: &Baseline) -> Result<()> {
        let target = match value {
            Baseline::Empty => self.empty_tree.clone(),
            Baseline::Commit(id) => id.as_str().to_string(),
        };
        self.repo
            .update_ref(&Self::marker_ref(key.as_str()), &target)
            .map_err(|e| Error::Checkpoint {
                message: format!("failed to record checkpoint for {}: {}", key.short(), e),
            })
    }
}

/// In-memory store used as a test double, mirroring the trait contract
/// without touching a repository.
#[derive(Debug, Default)]
pub struct MemoryCheckpointStore {
    entries: std::collections::HashMap<CommitId, Baseline>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn get(&self, key: &CommitId) -> Result<Option<Baseline>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &CommitId, value: &Baseline) -> Result<()> {
        self.entries.insert(key.clone(), value.clone());
        Ok(())
    }
}
