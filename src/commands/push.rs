//! Push command implementation
//!
//! Force-pushes every destination head and tag to the configured
//! destination remote. Checkpoint markers live in their own ref namespace
//! and are never published. Requires a configured destination; without one
//! the command fails with usage guidance.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use regraft::config::Config;
use regraft::error;
use regraft::output::{emoji, OutputConfig};
use regraft::repository::{ensure_workspace, Workspace};

/// Arguments for the push command
#[derive(Args, Debug)]
pub struct PushArgs {
    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "REGRAFT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Execute the push command
pub fn execute(args: PushArgs, out: &OutputConfig) -> Result<()> {
    let config = super::load_config(&args.config)?;
    // Fail on missing destination before any repository work
    let destination = config.require_destination()?.to_string();
    let (workspace, _report) = ensure_workspace(&config)?;

    println!("{} Pushing to {}", emoji(out, "🚀", "[PUSH]"), destination);
    run(&config, &workspace)?;
    println!("{} Push complete", emoji(out, "✅", "[OK]"));
    Ok(())
}

/// Push step shared with `mirror`.
pub(crate) fn run(config: &Config, workspace: &Workspace) -> error::Result<()> {
    let destination = config.require_destination()?;
    workspace.dest.push_mirror(destination)
}
