//! Init command implementation
//!
//! Idempotently prepares the local workspace: the mirror clone of the
//! source repository, the destination repository, and the checkpoint
//! store. On the first run against a fresh destination the overlay content
//! (if configured) is seeded into the destination worktree.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use regraft::output::{emoji, OutputConfig};
use regraft::repository::ensure_workspace;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "REGRAFT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Execute the init command
pub fn execute(args: InitArgs, out: &OutputConfig) -> Result<()> {
    let config = super::load_config(&args.config)?;

    println!("{} Preparing workspace", emoji(out, "🌱", "[INIT]"));
    let (_workspace, report) = ensure_workspace(&config)?;

    if report.cloned_source {
        println!("   cloned source into {}", config.source_clone_path().display());
    } else {
        println!("   source clone already present");
    }
    if report.created_dest {
        println!("   created destination at {}", config.dest_clone_path().display());
    } else {
        println!("   destination already present");
    }
    if report.seeded_store {
        println!("   seeded checkpoint store");
    }

    println!("{} Workspace ready", emoji(out, "✅", "[OK]"));
    Ok(())
}
