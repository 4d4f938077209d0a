//! Installed dependency graph construction.
//!
//! [`analyze`] walks a project's installation tree breadth-first from the
//! root directory. Each package's declared dependencies are matched to the
//! installed package that satisfies them, producing a node per distinct
//! `name@version` and an edge per resolved consumer -> dependency pair.
//!
//! All state for a run lives in a [`GraphBuilder`] created by the call, so
//! repeated or concurrent runs never share caches or queues.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use depscope::analyze::{analyze, AnalyzeOptions};
//!
//! let result = analyze(Path::new("./my-app"), &AnalyzeOptions::default());
//! for edge in result.circular_edges() {
//!     println!("{} -> {}", edge.source_id, edge.target_id);
//! }
//! ```

mod result;

pub use result::AnalysisResult;

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::graph::{CycleDetection, NodeRegistry};
use crate::resolver::{resolve_real_path, Locator};

/// Depth budget used when none is given.
pub const DEFAULT_DEPTH: u32 = 3;

/// Parameters of a graph run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Depth budget of the root package. A budget below 1 yields an empty
    /// graph; 1 yields only the root.
    pub depth: u32,
    /// Follow `devDependencies` as well as `dependencies`
    pub include_dev_dependencies: bool,
    /// How circular edges are marked
    pub cycle_detection: CycleDetection,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            include_dev_dependencies: false,
            cycle_detection: CycleDetection::default(),
        }
    }
}

impl AnalyzeOptions {
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_dev_dependencies(mut self, include: bool) -> Self {
        self.include_dev_dependencies = include;
        self
    }

    pub fn with_cycle_detection(mut self, detection: CycleDetection) -> Self {
        self.cycle_detection = detection;
        self
    }
}

/// Builds the installed dependency graph rooted at `root`.
///
/// Per-package problems (missing or malformed manifests, unsatisfied
/// ranges, unreadable paths) leave the affected node or edge out of the
/// result; they never abort the run.
pub fn analyze(root: &Path, options: &AnalyzeOptions) -> AnalysisResult {
    GraphBuilder::new(root, options).run()
}

/// A queued directory and the depth budget it was reached with.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WorkItem {
    directory: PathBuf,
    depth: u32,
}

/// Run context owning every cache, table and queue of one traversal.
#[derive(Debug)]
pub struct GraphBuilder {
    root: PathBuf,
    options: AnalyzeOptions,
    registry: NodeRegistry,
    queue: VecDeque<WorkItem>,
    /// Node ids whose dependencies were already expanded
    expanded: HashSet<String>,
}

impl GraphBuilder {
    /// Creates a run context for `root`.
    ///
    /// The root is symlink-resolved (or at least made absolute) so that it
    /// shares a prefix with the resolved dependency directories.
    pub fn new(root: &Path, options: &AnalyzeOptions) -> Self {
        let root = absolute_root(root);
        Self {
            registry: NodeRegistry::new(options.include_dev_dependencies),
            queue: VecDeque::new(),
            expanded: HashSet::new(),
            options: *options,
            root,
        }
    }

    /// Drains the traversal queue and returns the annotated graph.
    pub fn run(mut self) -> AnalysisResult {
        debug!(
            root = %self.root.display(),
            depth = self.options.depth,
            dev = self.options.include_dev_dependencies,
            "starting dependency traversal"
        );

        self.queue.push_back(WorkItem {
            directory: self.root.clone(),
            depth: self.options.depth,
        });

        while let Some(item) = self.queue.pop_front() {
            self.visit(item);
        }
        debug!(
            nodes = self.registry.graph().node_count(),
            edges = self.registry.graph().edge_count(),
            expanded = self.expanded.len(),
            "traversal queue drained"
        );

        let (nodes_list, edges_list) = self.registry.finalize(self.options.cycle_detection);
        info!(nodes = nodes_list.len(), edges = edges_list.len(), "dependency graph built");

        AnalysisResult {
            nodes_list,
            edges_list,
        }
    }

    fn visit(&mut self, item: WorkItem) {
        if item.depth < 1 {
            return;
        }

        let Some(id) = self.registry.get_or_create_id(&item.directory) else {
            debug!(dir = %item.directory.display(), "no package manifest, skipping");
            return;
        };

        // Non-root nodes are registered when an edge reaches them
        if item.directory == self.root {
            self.registry.register(&id, &item.directory, item.depth);
        }

        if item.depth <= 1 || self.expanded.contains(&id) {
            return;
        }

        let child_depth = item.depth - 1;
        let dependencies = self
            .registry
            .dependencies_of(&item.directory)
            .cloned()
            .unwrap_or_default();
        let locator = Locator::new(&self.root, &item.directory);

        for (name, range) in &dependencies {
            let Some(resolved) = locator.locate(&mut self.registry, name, range) else {
                debug!(consumer = %id, dependency = %name, range = %range, "dependency not resolved");
                continue;
            };

            self.registry
                .register(&resolved.id, &resolved.directory, child_depth);
            self.queue.push_back(WorkItem {
                directory: resolved.directory,
                depth: child_depth,
            });
            self.registry.add_edge(&id, &resolved.id);
        }

        self.expanded.insert(id);
    }
}

fn absolute_root(root: &Path) -> PathBuf {
    let resolved = resolve_real_path(root);
    if resolved.is_absolute() {
        return resolved;
    }
    std::path::absolute(&resolved).unwrap_or(resolved)
}
