//! Dependency graph implementation using petgraph.
//!
//! Nodes are [`PackageNode`]s keyed by their `name@version` id and edges
//! point from the consuming package to its dependency. The backing
//! `StableDiGraph` keeps node indices valid across removals, so the cycle
//! pass can peel a clone and still map what survives back to ids.

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use std::collections::HashMap;

use super::node::PackageNode;

/// A directed graph of installed packages.
///
/// Edges are a set: adding the same `source -> target` pair twice leaves a
/// single edge.
///
/// # Example
///
/// ```rust
/// use depscope::graph::{DependencyGraph, PackageNode};
///
/// let mut graph = DependencyGraph::new();
/// graph.add_node(PackageNode::new("app", "1.0.0", None, "/app"));
/// graph.add_node(PackageNode::new("lib", "2.0.0", None, "/app/node_modules/lib"));
///
/// assert!(graph.add_edge("app@1.0.0", "lib@2.0.0"));
/// assert!(!graph.add_edge("app@1.0.0", "lib@2.0.0")); // already present
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// The underlying directed graph
    graph: StableDiGraph<PackageNode, ()>,
    /// Maps node ids to their indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` to the graph.
    ///
    /// If a node with the same id already exists, returns its existing index
    /// without modification.
    pub fn add_node(&mut self, node: PackageNode) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(&node.id) {
            return idx;
        }

        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.node_indices.insert(id, idx);
        idx
    }

    /// Adds the edge `source -> target`.
    ///
    /// Returns `false` if the edge already exists or an endpoint is unknown.
    pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
        let (Some(&from), Some(&to)) = (self.node_indices.get(source), self.node_indices.get(target))
        else {
            return false;
        };

        if self.graph.contains_edge(from, to) {
            return false;
        }
        self.graph.update_edge(from, to, ());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut PackageNode> {
        let idx = *self.node_indices.get(id)?;
        self.graph.node_weight_mut(idx)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &PackageNode> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Every edge as `(source id, target id)`.
    ///
    /// Edges are grouped by source in node insertion order, with the targets
    /// of each source sorted by id.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges = Vec::with_capacity(self.graph.edge_count());
        for idx in self.graph.node_indices() {
            let source = self.graph[idx].id.as_str();
            let mut targets: Vec<&str> = self
                .graph
                .neighbors_directed(idx, Direction::Outgoing)
                .map(|target| self.graph[target].id.as_str())
                .collect();
            targets.sort_unstable();
            edges.extend(targets.into_iter().map(|target| (source, target)));
        }
        edges
    }

    /// The backing petgraph graph.
    pub fn inner(&self) -> &StableDiGraph<PackageNode, ()> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(name: &str) -> PackageNode {
        PackageNode::new(name, "1.0.0", None, format!("/node_modules/{}", name))
    }

    #[test]
    fn test_add_node_keeps_first() {
        let mut graph = DependencyGraph::new();
        let first = graph.add_node(package("lib"));

        let mut again = package("lib");
        again.depth = 7;
        assert_eq!(graph.add_node(again), first);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.nodes().next().unwrap().depth, 0);
    }

    #[test]
    fn test_add_edge_requires_known_endpoints() {
        let mut graph = DependencyGraph::new();
        graph.add_node(package("a"));

        assert!(!graph.add_edge("a@1.0.0", "b@1.0.0"));
        assert!(!graph.add_edge("b@1.0.0", "a@1.0.0"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_self_loop_counts_once() {
        let mut graph = DependencyGraph::new();
        graph.add_node(package("a"));

        assert!(graph.add_edge("a@1.0.0", "a@1.0.0"));
        assert!(!graph.add_edge("a@1.0.0", "a@1.0.0"));
        assert_eq!(graph.edges(), vec![("a@1.0.0", "a@1.0.0")]);
    }

    #[test]
    fn test_edges_grouped_by_source_in_insertion_order() {
        let mut graph = DependencyGraph::new();
        for name in ["root", "z", "a", "m"] {
            graph.add_node(package(name));
        }
        graph.add_edge("z@1.0.0", "a@1.0.0");
        graph.add_edge("root@1.0.0", "z@1.0.0");
        graph.add_edge("root@1.0.0", "m@1.0.0");
        graph.add_edge("root@1.0.0", "a@1.0.0");

        assert_eq!(
            graph.edges(),
            vec![
                ("root@1.0.0", "a@1.0.0"),
                ("root@1.0.0", "m@1.0.0"),
                ("root@1.0.0", "z@1.0.0"),
                ("z@1.0.0", "a@1.0.0"),
            ]
        );
        let ids: Vec<&str> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["root@1.0.0", "z@1.0.0", "a@1.0.0", "m@1.0.0"]);
    }

    #[test]
    fn test_get_node_mut() {
        let mut graph = DependencyGraph::new();
        graph.add_node(package("lib"));

        graph.get_node_mut("lib@1.0.0").unwrap().is_multiple_versions = true;
        assert!(graph.nodes().next().unwrap().is_multiple_versions);
        assert!(graph.get_node_mut("missing@1.0.0").is_none());
    }
}
