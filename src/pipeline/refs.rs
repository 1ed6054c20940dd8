//! Ref processing: drive the chain pipeline for every head and tag.
//!
//! Refs are processed one at a time; a ref that shares ancestry with an
//! already-processed ref (or with an earlier run) finds those commits
//! checkpointed and reuses the work; this is the source of the system's
//! incrementality. After a ref's chain is replayed, the destination ref is
//! pointed at the final baseline, unless that baseline is still the empty
//! sentinel (a lineage whose every commit was quarantined never creates a
//! destination ref).

use crate::checkpoint::{Baseline, CheckpointStore};
use crate::error::Result;
use crate::git::GitRepo;
use crate::pipeline::commit::write_commit;
use crate::pipeline::resolve::resolve_chain;
use crate::pipeline::stage::{StageOutcome, WorktreeStager};

/// What happened to one ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefOutcome {
    /// Full ref name, e.g. `refs/heads/main`.
    pub name: String,
    /// Commits materialized into the destination during this run.
    pub materialized: usize,
    /// Commits quarantined during this run.
    pub quarantined: usize,
    /// Where the destination ref now points, if anywhere.
    pub target: Option<String>,
}

/// Summary of one transform run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub refs: Vec<RefOutcome>,
}

impl TransformReport {
    pub fn total_materialized(&self) -> usize {
        self.refs.iter().map(|r| r.materialized).sum()
    }

    pub fn total_quarantined(&self) -> usize {
        self.refs.iter().map(|r| r.quarantined).sum()
    }
}

/// Run the full pipeline: enumerate every source head and tag, replay each
/// ref's unresolved chain, and update the destination refs.
pub fn transform_all(
    source: &GitRepo,
    dest: &GitRepo,
    store: &mut dyn CheckpointStore,
    stager: &WorktreeStager,
) -> Result<TransformReport> {
    let mut report = TransformReport::default();
    for entry in source.list_refs()? {
        log::info!("processing {}", entry.name);
        let chain = resolve_chain(source, store, &entry.target)?;
        let mut baseline = chain.baseline.clone();
        let mut materialized = 0;
        let mut quarantined = 0;

        for commit in &chain.pending {
            match stager.stage(commit)? {
                StageOutcome::Staged(staged) => {
                    let message = source.commit_message(commit)?;
                    let new = write_commit(dest, store, commit, &staged, &baseline, &message)?;
                    baseline = Baseline::Commit(new);
                    materialized += 1;
                }
                StageOutcome::Skipped(reason) => {
                    log::warn!("quarantining {}: {}", commit, reason);
                    store.put(commit, &baseline)?;
                    quarantined += 1;
                }
            }
        }

        let target = match &baseline {
            Baseline::Commit(id) => {
                dest.update_ref(&entry.name, id.as_str())?;
                Some(id.as_str().to_string())
            }
            Baseline::Empty => None,
        };

        report.refs.push(RefOutcome {
            name: entry.name,
            materialized,
            quarantined,
            target,
        });
    }
    Ok(report)
}
