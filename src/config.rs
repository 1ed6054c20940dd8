//! # Configuration Schema and Parsing
//!
//! This module defines the data structures that represent the `.regraft.yaml`
//! configuration file, as well as the logic for parsing and validating it.
//! The configuration is read once at startup into an immutable [`Config`]
//! value that is passed explicitly to every component; no component reads
//! ambient process state after startup.
//!
//! ## Schema
//!
//! ```yaml
//! # Where history is mirrored from. Required for every repository command.
//! source: https://example.com/upstream.git
//!
//! # Where rewritten history is published to. Optional; when absent, the
//! # `push` command is disabled and `mirror` stops after `transform`.
//! destination: git@example.com:mirror.git
//!
//! # Local storage for the source and destination clones. Optional.
//! workdir: /var/lib/regraft
//!
//! # Directory whose contents are injected into every produced commit,
//! # overwriting source content on conflicting paths. Optional.
//! overlay: ./overlay
//!
//! # Pathspecs restricting which source paths are materialized.
//! # Optional; the default is every path.
//! paths:
//!   - src
//!   - README.md
//!
//! # Shell command run once per staged commit with the staged tree as its
//! # working directory. A nonzero exit quarantines the commit. Optional.
//! hook: ./scripts/scrub.sh
//! ```
//!
//! ## Parsing
//!
//! [`parse`] deserializes a YAML string into a [`Config`] and validates it;
//! [`from_file`] is the file-reading convenience wrapper used by the CLI.
//! Validation failures carry a hint describing the fix, which the CLI
//! surfaces as usage guidance.

use crate::error::{Error, Result};
use crate::path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".regraft.yaml";

/// The parsed `.regraft.yaml` configuration.
///
/// All fields are optional at the schema level; whether a field is required
/// depends on the command (e.g. `push` requires `destination`). The accessor
/// methods encode those requirements and return hint-carrying errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// URL or local path of the source repository.
    #[serde(default)]
    pub source: Option<String>,

    /// URL or local path of the destination repository.
    ///
    /// When absent, publishing is disabled: `push` fails with a
    /// configuration error and `mirror` skips the push step.
    #[serde(default)]
    pub destination: Option<String>,

    /// Directory holding the local source and destination clones.
    #[serde(default)]
    pub workdir: Option<PathBuf>,

    /// Directory whose contents are copied into every produced commit after
    /// checkout, taking precedence over source content.
    #[serde(default)]
    pub overlay: Option<PathBuf>,

    /// Pathspecs restricting which paths are materialized from each source
    /// commit. Empty means unrestricted.
    #[serde(default)]
    pub paths: Vec<String>,

    /// Shell command invoked once per staged commit; nonzero exit
    /// quarantines the commit.
    #[serde(default)]
    pub hook: Option<String>,
}

impl Config {
    /// The source repository location.
    ///
    /// Every repository command requires this; absence is a configuration
    /// error with usage guidance.
    pub fn source_url(&self) -> Result<&str> {
        match self.source.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(Error::ConfigParse {
                message: "source repository is not configured".to_string(),
                hint: Some(format!(
                    "set 'source: <git URL or path>' in {}",
                    DEFAULT_CONFIG_FILE
                )),
            }),
        }
    }

    /// The destination repository location, if publishing is configured.
    pub fn destination_url(&self) -> Option<&str> {
        match self.destination.as_deref() {
            Some(url) if !url.trim().is_empty() => Some(url),
            _ => None,
        }
    }

    /// The destination repository location, required (used by `push`).
    pub fn require_destination(&self) -> Result<&str> {
        self.destination_url().ok_or_else(|| Error::ConfigParse {
            message: "destination repository is not configured".to_string(),
            hint: Some(format!(
                "set 'destination: <git URL or path>' in {} to enable push",
                DEFAULT_CONFIG_FILE
            )),
        })
    }

    /// The directory holding local clones, defaulting to the platform data
    /// directory (see [`crate::defaults::default_workdir`]).
    pub fn workdir(&self) -> PathBuf {
        self.workdir
            .clone()
            .unwrap_or_else(crate::defaults::default_workdir)
    }

    /// Local path of the source mirror clone.
    pub fn source_clone_path(&self) -> PathBuf {
        self.workdir().join("source.git")
    }

    /// Local path of the destination repository.
    pub fn dest_clone_path(&self) -> PathBuf {
        self.workdir().join("destination")
    }

    /// The effective pathspec list for filtered checkouts.
    ///
    /// An empty `paths` list means unrestricted, which materializes as the
    /// `.` pathspec covering the whole tree.
    pub fn pathspec(&self) -> Vec<String> {
        if self.paths.is_empty() {
            vec![".".to_string()]
        } else {
            self.paths.clone()
        }
    }

    /// Validate cross-field constraints that serde cannot express.
    fn validate(&self) -> Result<()> {
        for spec in &self.paths {
            if !path::is_safe_pathspec(spec) {
                return Err(Error::ConfigParse {
                    message: format!("invalid pathspec '{}'", spec),
                    hint: Some(
                        "pathspecs must be non-empty relative paths without '..' components"
                            .to_string(),
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Parse a YAML string into a validated [`Config`].
pub fn parse(yaml_content: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: None,
    })?;
    config.validate()?;
    Ok(config)
}

/// Read and parse a configuration file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::ConfigParse {
            message: format!("configuration file not found: {}", path.display()),
            hint: Some(format!(
                "run from a directory containing {} or pass --config <path>",
                DEFAULT_CONFIG_FILE
            )),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}
