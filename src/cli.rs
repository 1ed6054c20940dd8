//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use regraft::output::OutputConfig;

use crate::commands;

/// Regraft - Mirror Git history into a transformed destination repository
#[derive(Parser, Debug)]
#[command(name = "regraft")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prepare the local source and destination clones
    Init(commands::init::InitArgs),

    /// Refresh all source refs from the remote, force-overwriting local
    /// heads and tags
    Sync(commands::sync::SyncArgs),

    /// Rewrite not-yet-processed source commits into the destination
    Transform(commands::transform::TransformArgs),

    /// Force-push all destination heads and tags to the configured remote
    Push(commands::push::PushArgs),

    /// Sync, transform, and push in sequence
    Mirror(commands::mirror::MirrorArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Init(args) => commands::init::execute(args, &output),
            Commands::Sync(args) => commands::sync::execute(args, &output),
            Commands::Transform(args) => commands::transform::execute(args, &output),
            Commands::Push(args) => commands::push::execute(args, &output),
            Commands::Mirror(args) => commands::mirror::execute(args, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level.to_string());
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
