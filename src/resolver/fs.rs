//! Filesystem probes that never fail.

use std::fs;
use std::path::{Path, PathBuf};

/// Returns true if `path` exists. Any error counts as non-existence,
/// including a symlink whose target is missing.
pub fn exists(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}

/// Follows symlinks to the canonical path, or returns `path` unchanged if
/// it cannot be resolved.
pub fn resolve_real_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
