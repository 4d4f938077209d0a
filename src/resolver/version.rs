//! npm-style version range matching.

use nodejs_semver::{Range, Version};
use tracing::debug;

/// Returns true if the installed `version` satisfies the declared `range`.
///
/// An empty range means any version. Ranges that are not semver ranges
/// (`latest`, `file:`, git URLs, `npm:` aliases) and installed versions
/// that are not valid semver never match.
///
/// # Example
///
/// ```
/// use depscope::resolver::version::satisfies;
///
/// assert!(satisfies("^1.0.0", "1.2.0"));
/// assert!(!satisfies("^2.0.0", "1.2.0"));
/// assert!(satisfies(">=1.0.0 <2.0.0 || ^3.0.0", "3.1.0"));
/// ```
pub fn satisfies(range: &str, version: &str) -> bool {
    let range = range.trim();
    let range = if range.is_empty() { "*" } else { range };

    let range = match Range::parse(range) {
        Ok(range) => range,
        Err(err) => {
            debug!(range, error = %err, "unsupported version range");
            return false;
        }
    };

    match Version::parse(version.trim()) {
        Ok(version) => range.satisfies(&version),
        Err(_) => false,
    }
}
