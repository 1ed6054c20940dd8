//! Mirror command implementation
//!
//! The one-shot pipeline: sync the source, transform new history, and push
//! the result. When no destination is configured, publishing is disabled
//! and the push step is skipped rather than failing, since a
//! destination-less configuration is a valid local-only mirror.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use regraft::output::{emoji, OutputConfig};
use regraft::repository::ensure_workspace;

/// Arguments for the mirror command
#[derive(Args, Debug)]
pub struct MirrorArgs {
    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "REGRAFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the mirror command
pub fn execute(args: MirrorArgs, out: &OutputConfig) -> Result<()> {
    let config = super::load_config(&args.config)?;
    let (workspace, _report) = ensure_workspace(&config)?;

    if !args.quiet {
        println!("{} Syncing source refs", emoji(out, "🔄", "[SYNC]"));
    }
    super::sync::run(&workspace)?;

    if !args.quiet {
        println!("{} Transforming source history", emoji(out, "🔀", "[TRANSFORM]"));
    }
    let report = super::transform::run(&config, &workspace)?;
    if !args.quiet {
        super::transform::print_report(&report, out);
    }

    match config.destination_url() {
        Some(destination) => {
            if !args.quiet {
                println!("{} Pushing to {}", emoji(out, "🚀", "[PUSH]"), destination);
            }
            super::push::run(&config, &workspace)?;
            if !args.quiet {
                println!("{} Mirror complete", emoji(out, "✅", "[OK]"));
            }
        }
        None => {
            log::info!("no destination configured, skipping push");
            if !args.quiet {
                println!(
                    "{} Mirror complete (publishing disabled: no destination configured)",
                    emoji(out, "✅", "[OK]")
                );
            }
        }
    }
    Ok(())
}
