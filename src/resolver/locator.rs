//! Finding the installed directory that provides a declared dependency.
//!
//! Candidates are the `node_modules` directories on the path from the run's
//! root to the consumer, probed root-first. The first candidate whose
//! installed version satisfies the declared range is accepted, even when a
//! deeper installation also exists.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::fs::resolve_real_path;
use super::version::satisfies;
use crate::graph::NodeRegistry;

/// Name of the module-installation directory.
pub const MODULES_DIR: &str = "node_modules";

/// A declared dependency matched to an installed package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    /// Id of the installed package
    pub id: String,
    /// Symlink-resolved installation directory
    pub directory: PathBuf,
}

/// Resolves the declared dependencies of one consumer directory.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use depscope::resolver::Locator;
///
/// let locator = Locator::new(Path::new("/app"), Path::new("/app/node_modules/a"));
/// assert_eq!(
///     locator.candidates(),
///     &[
///         Path::new("/app/node_modules").to_path_buf(),
///         Path::new("/app/node_modules/a/node_modules").to_path_buf(),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Locator {
    candidates: Vec<PathBuf>,
}

impl Locator {
    /// Prepares the candidate directories for packages consumed from
    /// `consumer_dir` during a run rooted at `root`.
    pub fn new(root: &Path, consumer_dir: &Path) -> Self {
        Self {
            candidates: candidate_module_dirs(root, consumer_dir),
        }
    }

    /// Module directories in probe order.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Finds the installation of `name` satisfying `range`.
    ///
    /// Returns `None` when no candidate holds a matching installation; the
    /// dependency is then left out of the graph.
    pub fn locate(
        &self,
        registry: &mut NodeRegistry,
        name: &str,
        range: &str,
    ) -> Option<ResolvedDependency> {
        for modules_dir in &self.candidates {
            let directory = resolve_real_path(&modules_dir.join(name));

            let Some(id) = registry.get_or_create_id(&directory) else {
                continue;
            };

            let installed = registry.cached_version(&directory).unwrap_or_default();
            if satisfies(range, installed) {
                return Some(ResolvedDependency { id, directory });
            }

            debug!(
                dependency = name,
                range,
                installed,
                dir = %directory.display(),
                "installed version does not satisfy range"
            );
        }

        None
    }
}

/// Lists every `node_modules` directory met while walking from `root` to
/// `consumer_dir/node_modules`, root-first.
///
/// The walk is lexical and mirrors `path.relative` followed by joining
/// each segment onto `root`, so a consumer outside the root walks up
/// through `..` before descending.
pub fn candidate_module_dirs(root: &Path, consumer_dir: &Path) -> Vec<PathBuf> {
    let target = consumer_dir.join(MODULES_DIR);
    let mut current = root.to_path_buf();
    let mut candidates = Vec::new();

    for segment in relative_segments(root, &target) {
        match segment {
            Segment::Parent => {
                current.pop();
            }
            Segment::Name(name) => {
                current.push(&name);
                if name == MODULES_DIR {
                    candidates.push(current.clone());
                }
            }
        }
    }

    candidates
}

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Parent,
    Name(String),
}

/// Segments leading from `from` to `to` after lexical normalization.
fn relative_segments(from: &Path, to: &Path) -> Vec<Segment> {
    let from = normalize(from);
    let to = normalize(to);

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from[common..].iter().map(|_| Segment::Parent);
    let downs = to[common..].iter().map(|name| Segment::Name(name.clone()));
    ups.chain(downs).collect()
}

/// Splits a path into named segments with `.` and `..` applied.
fn normalize(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts
}
