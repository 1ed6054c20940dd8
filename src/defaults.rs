//! Default values for regraft configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Returns the default working directory for local clones.
///
/// Uses the platform-appropriate local data directory:
/// - Linux: `~/.local/share/regraft` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/regraft`
/// - Windows: `{FOLDERID_LocalAppData}\regraft`
///
/// Falls back to `.regraft-work` in the current directory if the platform
/// data directory cannot be determined.
///
/// This can be overridden by the `workdir` configuration key.
pub fn default_workdir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from(".regraft-work"))
        .join("regraft")
}
