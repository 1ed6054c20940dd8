//! Sync command implementation
//!
//! Refreshes every ref in the local source mirror from its remote,
//! force-overwriting local heads and tags and pruning refs deleted
//! upstream. The mirror clone's refspec makes a plain fetch equivalent to
//! re-cloning, without losing already-downloaded objects.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use regraft::error;
use regraft::output::{emoji, OutputConfig};
use regraft::repository::{ensure_workspace, Workspace};

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "REGRAFT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Execute the sync command
pub fn execute(args: SyncArgs, out: &OutputConfig) -> Result<()> {
    let config = super::load_config(&args.config)?;
    let (workspace, _report) = ensure_workspace(&config)?;

    println!("{} Syncing source refs", emoji(out, "🔄", "[SYNC]"));
    run(&workspace)?;

    let refs = workspace.source.list_refs()?;
    println!(
        "{} Source up to date ({} refs)",
        emoji(out, "✅", "[OK]"),
        refs.len()
    );
    Ok(())
}

/// Fetch step shared with `mirror`.
pub(crate) fn run(workspace: &Workspace) -> error::Result<()> {
    workspace.source.fetch_prune("origin")
}
