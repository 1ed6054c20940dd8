//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `regraft` command-line tool. Each subcommand is defined in its own file
//! to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and
//!   options, derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! The `execute` function is the main entry point for the command and is
//! responsible for orchestrating the necessary operations, calling into the
//! `regraft` library to perform the core logic.
//!
//! Every command except `init` and `completions` implicitly prepares the
//! local workspace first (idempotent), so a bare `regraft mirror` works on
//! a fresh machine.

use std::path::PathBuf;

use anyhow::Result;
use regraft::config::{self, Config};

pub mod completions;
pub mod init;
pub mod mirror;
pub mod push;
pub mod sync;
pub mod transform;

/// Load the configuration from the `--config` flag or the default file.
pub(crate) fn load_config(flag: &Option<PathBuf>) -> Result<Config> {
    let path = flag
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_FILE));
    Ok(config::from_file(&path)?)
}
