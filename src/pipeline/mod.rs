//! # The Mirroring Pipeline
//!
//! Rewriting a source history into the destination proceeds in phases, one
//! module per phase:
//!
//! 1. **Resolution** ([`resolve`]): walk first-parent ancestry backward from
//!    a ref tip until an already-checkpointed commit (or the graph root) is
//!    found, yielding the unresolved chain oldest-first plus the baseline to
//!    build on.
//! 2. **Staging** ([`stage`]): materialize one commit's filtered content
//!    into a scratch worktree, inject the overlay, and run the optional
//!    transform hook, or signal that the commit must be quarantined.
//! 3. **Committing** ([`commit`]): snapshot the staged tree as a destination
//!    commit with the baseline as sole parent and the source message copied
//!    verbatim, recording the checkpoint.
//! 4. **Ref processing** ([`refs`]): drive the phases above for every head
//!    and tag in the source, then point each destination ref at the final
//!    baseline of its lineage.
//!
//! Execution is single-threaded and strictly sequential: within a chain
//! every commit depends on the previous commit's produced baseline, and
//! refs are processed one at a time so later refs reuse checkpoints written
//! by earlier ones in the same run.

pub mod commit;
pub mod refs;
pub mod resolve;
pub mod stage;
