//! The node and edge lists returned by a graph run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::graph::{DependencyEdge, PackageNode};

/// Result of one [`analyze`](super::analyze) call.
///
/// Lists carry no ordering guarantee beyond being stable for identical
/// input trees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub nodes_list: Vec<PackageNode>,
    pub edges_list: Vec<DependencyEdge>,
}

impl AnalysisResult {
    pub fn node_count(&self) -> usize {
        self.nodes_list.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes_list.is_empty()
    }

    pub fn get_node(&self, id: &str) -> Option<&PackageNode> {
        self.nodes_list.iter().find(|node| node.id == id)
    }

    /// The node registered with the largest depth budget, which is the
    /// root package of the run.
    pub fn root(&self) -> Option<&PackageNode> {
        self.nodes_list.iter().max_by_key(|node| node.depth)
    }

    pub fn circular_edges(&self) -> Vec<&DependencyEdge> {
        self.edges_list.iter().filter(|edge| edge.is_circular).collect()
    }

    /// Package names installed at more than one version, mapped to their
    /// nodes.
    pub fn duplicated_packages(&self) -> BTreeMap<&str, Vec<&PackageNode>> {
        let mut by_name: BTreeMap<&str, Vec<&PackageNode>> = BTreeMap::new();
        for node in self.nodes_list.iter().filter(|node| node.is_multiple_versions) {
            by_name.entry(node.name.as_str()).or_default().push(node);
        }
        by_name
    }

    /// Edges leaving `id`.
    pub fn dependencies_of(&self, id: &str) -> Vec<&DependencyEdge> {
        self.edges_list
            .iter()
            .filter(|edge| edge.source_id == id)
            .collect()
    }
}
