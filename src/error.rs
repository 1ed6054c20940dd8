//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `regraft` application. It uses the `thiserror` library to create a
//! comprehensive `Error` enum that covers all anticipated failure modes,
//! providing clear and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur within the application. Each variant corresponds to a specific
//!   type of error and includes contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the application to simplify function signatures and ensure
//!   type safety.
//!
//! ## Failure taxonomy
//!
//! Two per-commit conditions are *not* errors: a pathspec that does not
//! exist in a specific source commit, and a transform hook that reports
//! failure. They are recoverable skip signals, modeled by
//! [`crate::pipeline::stage::SkipReason`], and resolve to a quarantined
//! checkpoint. Every variant in this module is fatal for the run: the
//! process aborts with a diagnostic rather than attempting partial recovery,
//! because correctness of the checkpoint chain depends on every
//! non-skip step succeeding. The checkpoint store is left in whatever state
//! it reached and is safe to resume from.

use thiserror::Error;

/// Main error type for regraft operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error in the `.regraft.yaml` configuration surface.
    ///
    /// This error includes the specific issue and optionally a hint about
    /// how to fix it (typically usage guidance, e.g. which key to set).
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An error occurred while cloning a Git repository.
    ///
    /// Includes the repository URL, error message, and an optional hint for
    /// resolution.
    #[error("Git clone error for {url}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// An error occurred while executing a Git command against a repository.
    #[error("Git command failed in {repo}: git {command} - {stderr}")]
    GitCommand {
        command: String,
        repo: String,
        stderr: String,
    },

    /// An error occurred reading or writing the checkpoint store.
    #[error("Checkpoint store error: {message}")]
    Checkpoint { message: String },

    /// An error occurred while injecting overlay content into a staged tree.
    #[error("Overlay error: {message}")]
    Overlay { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
