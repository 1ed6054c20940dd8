//! # Regraft Library
//!
//! This library provides the core functionality for incrementally mirroring
//! history from a source Git repository into a destination repository while
//! applying a per-commit content transformation. It is designed to be used
//! by the `regraft` command-line tool but can also be integrated into other
//! applications that publish filtered views of a repository.
//!
//! ## Quick Example
//!
//! ```
//! use regraft::config;
//!
//! let yaml = r#"
//! source: https://example.com/upstream.git
//! paths:
//!   - src
//!   - README.md
//! "#;
//! let config = config::parse(yaml).unwrap();
//! assert_eq!(config.pathspec().len(), 2);
//! // No destination configured: publishing is disabled
//! assert!(config.destination_url().is_none());
//! ```
//!
//! ## Core Concepts
//!
//! The library is built around a few key concepts:
//!
//! - **Configuration (`config`)**: The immutable `.regraft.yaml` surface:
//!   source and destination locations, pathspec restriction, overlay
//!   directory, and the optional transform hook.
//! - **Git Access (`git`)**: Explicit repository handles driving the system
//!   `git` binary; the version-control engine is a trusted external service.
//! - **Checkpoints (`checkpoint`)**: Durable per-commit memoization that
//!   makes repeated runs incremental and resumable.
//! - **The Pipeline (`pipeline`)**: Chain resolution, staging, committing,
//!   and ref processing, the per-ref rewrite machinery.
//! - **Workspace Management (`repository`)**: Idempotent preparation of the
//!   local source mirror and destination repository.
//!
//! ## Execution Flow
//!
//! A full `mirror` invocation executes the following high-level steps:
//!
//! 1.  **Prepare**: Idempotently create the local clones and seed the
//!     checkpoint store (every command does this implicitly).
//! 2.  **Sync**: Refresh all source refs from the remote.
//! 3.  **Resolve**: For each head and tag, walk first-parent ancestry back
//!     to the nearest checkpoint, yielding the unresolved chain.
//! 4.  **Stage**: Materialize each chain commit's filtered content, inject
//!     the overlay, and run the optional transform hook.
//! 5.  **Commit**: Snapshot each staged tree onto the lineage baseline with
//!     the source message copied verbatim, checkpointing as it goes.
//! 6.  **Update refs**: Point each destination ref at its lineage's final
//!     baseline (suppressed while nothing has ever been produced).
//! 7.  **Push**: Force-publish destination heads and tags.
//!
//! Commits that cannot be materialized (the pathspec does not exist in
//! that commit, or the hook rejects it) are quarantined: they contribute
//! no content but do not break the chain, and the decision is recorded
//! permanently in the checkpoint store.

pub mod checkpoint;
pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod hook;
pub mod output;
pub mod path;
pub mod pipeline;
pub mod repository;

#[cfg(test)]
mod path_proptest;
#[cfg(test)]
mod testutil;
