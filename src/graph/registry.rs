//! Node registry and per-directory resolution cache.
//!
//! A [`NodeRegistry`] lives for exactly one graph run. Every mutation goes
//! through `&mut self`, so checking whether a directory or id is already
//! known and reserving it happen as a single step.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::cycles::{circular_edges, CycleDetection};
use super::dependency_graph::DependencyGraph;
use super::node::{DependencyEdge, PackageNode};
use crate::parser::DependencyMap;
use crate::resolver::manifest::load_manifest;

/// A directory that was read and parsed during the run.
#[derive(Debug, Clone)]
struct CachedPackage {
    node: PackageNode,
    dependencies: DependencyMap,
}

/// Deduplicated table of discovered packages plus the edges between them.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    include_dev_dependencies: bool,
    /// Directory -> parsed manifest; `None` records a directory with no usable manifest
    cache: HashMap<PathBuf, Option<CachedPackage>>,
    /// Registered nodes and the edges between them
    graph: DependencyGraph,
    versions_by_name: HashMap<String, BTreeSet<String>>,
}

impl NodeRegistry {
    /// Creates an empty registry.
    ///
    /// `include_dev_dependencies` controls whether `devDependencies` are
    /// merged into each parsed package's dependency map.
    pub fn new(include_dev_dependencies: bool) -> Self {
        Self {
            include_dev_dependencies,
            ..Self::default()
        }
    }

    /// Returns the id of the package installed in `directory`.
    ///
    /// The manifest is read at most once per directory; later calls hit the
    /// cache. Returns `None` when the directory holds no readable manifest.
    pub fn get_or_create_id(&mut self, directory: &Path) -> Option<String> {
        if let Some(cached) = self.cache.get(directory) {
            return cached.as_ref().map(|pkg| pkg.node.id.clone());
        }

        let cached = load_manifest(directory, self.include_dev_dependencies).map(|descriptor| {
            CachedPackage {
                node: PackageNode::new(
                    descriptor.name,
                    descriptor.version,
                    descriptor.description,
                    directory,
                ),
                dependencies: descriptor.dependencies,
            }
        });

        let id = cached.as_ref().map(|pkg| pkg.node.id.clone());
        self.cache.insert(directory.to_path_buf(), cached);
        id
    }

    /// Version string of the package cached for `directory`.
    pub fn cached_version(&self, directory: &Path) -> Option<&str> {
        self.cached(directory).map(|pkg| pkg.node.version.as_str())
    }

    /// Declared dependencies of the package cached for `directory`.
    pub fn dependencies_of(&self, directory: &Path) -> Option<&DependencyMap> {
        self.cached(directory).map(|pkg| &pkg.dependencies)
    }

    fn cached(&self, directory: &Path) -> Option<&CachedPackage> {
        self.cache.get(directory).and_then(Option::as_ref)
    }

    /// Registers `id` as a node of the graph, using the package cached for
    /// `directory`.
    ///
    /// The first registration of an id wins: later calls, even with a
    /// different directory or depth, are ignored. Returns `true` if the
    /// node was newly registered.
    pub fn register(&mut self, id: &str, directory: &Path, depth: u32) -> bool {
        if self.graph.contains(id) {
            return false;
        }

        let Some(cached) = self.cached(directory) else {
            debug!(id, dir = %directory.display(), "register called for an unresolved directory");
            return false;
        };

        let mut node = cached.node.clone();
        node.depth = depth;

        self.versions_by_name
            .entry(node.name.clone())
            .or_default()
            .insert(id.to_string());
        self.graph.add_node(node);
        true
    }

    /// Adds the edge `source -> target` between two registered nodes.
    ///
    /// Returns `false` if the edge already exists or an endpoint is unknown.
    pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
        self.graph.add_edge(source, target)
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Marks duplicated packages and circular edges, returning the final
    /// node and edge lists.
    ///
    /// Nodes come back in registration order; edges are grouped by source
    /// in the same order.
    pub fn finalize(mut self, detection: CycleDetection) -> (Vec<PackageNode>, Vec<DependencyEdge>) {
        for ids in self.versions_by_name.values() {
            if ids.len() < 2 {
                continue;
            }
            for id in ids {
                if let Some(node) = self.graph.get_node_mut(id) {
                    node.is_multiple_versions = true;
                }
            }
        }

        let circular = circular_edges(&self.graph, detection);

        let edges = self
            .graph
            .edges()
            .into_iter()
            .map(|(source, target)| {
                let is_circular = circular.contains(&(source.to_string(), target.to_string()));
                DependencyEdge::new(source, target, is_circular)
            })
            .collect();
        let nodes = self.graph.nodes().cloned().collect();

        (nodes, edges)
    }
}
