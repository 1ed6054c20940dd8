//! Transform command implementation
//!
//! Runs the full rewrite pipeline: for every head and tag in the source,
//! resolve the chain of not-yet-checkpointed commits, stage and commit each
//! one onto the lineage baseline, and point the destination ref at the
//! result. Already-checkpointed commits are never recomputed, so repeated
//! runs only pay for new history.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use regraft::checkpoint::RefCheckpointStore;
use regraft::config::Config;
use regraft::error;
use regraft::hook::{ShellHook, TransformHook};
use regraft::output::{emoji, OutputConfig};
use regraft::pipeline::refs::{transform_all, TransformReport};
use regraft::pipeline::stage::WorktreeStager;
use regraft::repository::{ensure_workspace, Workspace};

/// Arguments for the transform command
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "REGRAFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the transform command
pub fn execute(args: TransformArgs, out: &OutputConfig) -> Result<()> {
    let config = super::load_config(&args.config)?;
    let (workspace, _report) = ensure_workspace(&config)?;

    if !args.quiet {
        println!("{} Transforming source history", emoji(out, "🔀", "[TRANSFORM]"));
    }

    let report = run(&config, &workspace)?;

    if !args.quiet {
        print_report(&report, out);
    }
    Ok(())
}

/// Pipeline step shared with `mirror`.
pub(crate) fn run(config: &Config, workspace: &Workspace) -> error::Result<TransformReport> {
    let mut store = RefCheckpointStore::open(&workspace.dest)?;
    let pathspec = config.pathspec();
    let hook = config.hook.as_deref().map(ShellHook::new);
    let hook_ref = hook.as_ref().map(|h| h as &dyn TransformHook);
    let stager = WorktreeStager::new(
        &workspace.source,
        &pathspec,
        config.overlay.as_deref(),
        hook_ref,
    );
    transform_all(&workspace.source, &workspace.dest, &mut store, &stager)
}

pub(crate) fn print_report(report: &TransformReport, out: &OutputConfig) {
    for outcome in &report.refs {
        let state = if outcome.materialized == 0 && outcome.quarantined == 0 {
            "up to date".to_string()
        } else {
            format!(
                "{} materialized, {} quarantined",
                outcome.materialized, outcome.quarantined
            )
        };
        match &outcome.target {
            Some(target) => println!("   {}: {} -> {}", outcome.name, state, &target[..10.min(target.len())]),
            None => println!("   {}: {} (nothing produced)", outcome.name, state),
        }
    }
    println!(
        "{} Transform complete: {} materialized, {} quarantined",
        emoji(out, "✅", "[OK]"),
        report.total_materialized(),
        report.total_quarantined()
    );
}
