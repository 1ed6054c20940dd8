//! # High-Level Workspace Management
//!
//! This module provides the local workspace the pipeline runs against: a
//! mirror clone of the source repository and the destination repository,
//! both living under the configured working directory. Preparing the
//! workspace is idempotent: every repository command performs it
//! implicitly, and `init` exposes it directly.
//!
//! First-time preparation also seeds the checkpoint store and, when an
//! overlay directory is configured, copies the overlay content into the
//! fresh destination worktree so the destination starts out carrying the
//! fixed content it will hold in every produced commit.

use std::path::Path;

use crate::checkpoint::RefCheckpointStore;
use crate::config::Config;
use crate::error::Result;
use crate::git::GitRepo;
use crate::pipeline::stage::copy_overlay;

/// Handles to the local source and destination repositories.
pub struct Workspace {
    pub source: GitRepo,
    pub dest: GitRepo,
}

/// What `ensure_workspace` had to create.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitReport {
    /// The source mirror clone was created.
    pub cloned_source: bool,
    /// The destination repository was created.
    pub created_dest: bool,
    /// The checkpoint store was seeded (first run against this
    /// destination).
    pub seeded_store: bool,
}

/// Idempotently prepare the local clones and the checkpoint store.
///
/// Requires a configured source location; everything else is optional.
pub fn ensure_workspace(config: &Config) -> Result<(Workspace, InitReport)> {
    let source_url = config.source_url()?;
    let mut report = InitReport::default();

    let source_path = config.source_clone_path();
    let source = if is_repo(&source_path) {
        GitRepo::open(&source_path)?
    } else {
        log::info!("cloning {} into {}", source_url, source_path.display());
        report.cloned_source = true;
        GitRepo::clone_mirror(source_url, &source_path)?
    };

    let dest_path = config.dest_clone_path();
    let dest = if is_repo(&dest_path) {
        GitRepo::open(&dest_path)?
    } else {
        log::info!("creating destination repository at {}", dest_path.display());
        report.created_dest = true;
        GitRepo::init(&dest_path)?
    };

    let mut store = RefCheckpointStore::open(&dest)?;
    if !store.is_seeded()? {
        store.seed()?;
        report.seeded_store = true;
        if let Some(overlay) = &config.overlay {
            copy_overlay(overlay, &dest_path)?;
        }
    }

    Ok((Workspace { source, dest }, report))
}

fn is_repo(path: &Path) -> bool {
    GitRepo::open(path).is_ok()
}
