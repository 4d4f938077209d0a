//! Circular-edge detection.
//!
//! The default strategy peels the graph from both ends: first every node
//! that can be reached without passing through a cycle is removed in
//! topological order, then every node that cannot lead back into a cycle
//! is removed in reverse topological order. Edges left between surviving
//! nodes are reported as circular. This over-approximates cycle membership
//! when a chain connects two cycles, since the chain survives both peels.
//!
//! [`CycleDetection::StronglyConnected`] gives exact component membership
//! using petgraph's Tarjan SCC.

use petgraph::algo::tarjan_scc;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Direction;
use std::collections::{HashMap, HashSet, VecDeque};

use super::dependency_graph::DependencyGraph;
use super::node::PackageNode;

/// Strategy used to mark edges as circular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleDetection {
    /// Forward and backward topological peel
    #[default]
    Peel,
    /// Exact strongly connected components
    StronglyConnected,
}

impl std::str::FromStr for CycleDetection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "peel" => Ok(CycleDetection::Peel),
            "scc" | "strongly-connected" => Ok(CycleDetection::StronglyConnected),
            _ => Err(format!(
                "Unknown cycle detection: '{}'. Valid values: peel, scc",
                s
            )),
        }
    }
}

impl std::fmt::Display for CycleDetection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleDetection::Peel => write!(f, "peel"),
            CycleDetection::StronglyConnected => write!(f, "scc"),
        }
    }
}

/// Set of `(source, target)` pairs marked circular.
pub type CircularEdges = HashSet<(String, String)>;

/// Returns the edges of `graph` that the chosen strategy marks circular.
///
/// The graph is not modified.
pub fn circular_edges(graph: &DependencyGraph, detection: CycleDetection) -> CircularEdges {
    match detection {
        CycleDetection::Peel => edge_ids(&peel(graph)),
        CycleDetection::StronglyConnected => strongly_connected_edges(graph),
    }
}

/// Runs the forward and backward peel on a clone of `graph` and returns
/// what survives.
///
/// # Example
///
/// ```
/// use depscope::graph::{peel, DependencyGraph, PackageNode};
///
/// let mut graph = DependencyGraph::new();
/// for name in ["root", "a", "b", "leaf"] {
///     graph.add_node(PackageNode::new(name, "1.0.0", None, name));
/// }
/// graph.add_edge("root@1.0.0", "a@1.0.0");
/// graph.add_edge("a@1.0.0", "b@1.0.0");
/// graph.add_edge("b@1.0.0", "a@1.0.0");
/// graph.add_edge("b@1.0.0", "leaf@1.0.0");
///
/// let remaining = peel(&graph);
/// let ids: Vec<&str> = remaining.node_weights().map(|n| n.id.as_str()).collect();
/// assert_eq!(ids, ["a@1.0.0", "b@1.0.0"]);
/// assert_eq!(remaining.edge_count(), 2);
/// ```
pub fn peel(graph: &DependencyGraph) -> StableDiGraph<PackageNode, ()> {
    let mut remaining = graph.inner().clone();
    // Forward: drop sources until only nodes with an unremoved ancestor remain
    strip(&mut remaining, Direction::Incoming);
    // Backward: drop sinks of what is left
    strip(&mut remaining, Direction::Outgoing);
    remaining
}

/// Repeatedly removes nodes that have no neighbors in `direction`.
fn strip(graph: &mut StableDiGraph<PackageNode, ()>, direction: Direction) {
    let mut degrees: HashMap<NodeIndex, usize> = graph
        .node_indices()
        .map(|idx| (idx, graph.neighbors_directed(idx, direction).count()))
        .collect();

    let mut queue: VecDeque<NodeIndex> = degrees
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(idx, _)| *idx)
        .collect();

    while let Some(idx) = queue.pop_front() {
        let next: Vec<NodeIndex> = graph.neighbors_directed(idx, direction.opposite()).collect();
        graph.remove_node(idx);
        degrees.remove(&idx);

        for neighbor in next {
            if let Some(degree) = degrees.get_mut(&neighbor) {
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    queue.push_back(neighbor);
                }
            }
        }
    }
}

fn edge_ids(graph: &StableDiGraph<PackageNode, ()>) -> CircularEdges {
    graph
        .edge_references()
        .map(|edge| {
            (
                graph[edge.source()].id.clone(),
                graph[edge.target()].id.clone(),
            )
        })
        .collect()
}

/// Marks edges whose endpoints share a strongly connected component,
/// plus self-loops.
pub fn strongly_connected_edges(graph: &DependencyGraph) -> CircularEdges {
    let inner = graph.inner();

    let mut component_of: HashMap<NodeIndex, (usize, usize)> = HashMap::new();
    for (component, members) in tarjan_scc(inner).into_iter().enumerate() {
        let size = members.len();
        for idx in members {
            component_of.insert(idx, (component, size));
        }
    }

    inner
        .edge_references()
        .filter(|edge| {
            let (source, target) = (edge.source(), edge.target());
            source == target
                || match (component_of.get(&source), component_of.get(&target)) {
                    (Some(&(a, size)), Some(&(b, _))) => a == b && size > 1,
                    _ => false,
                }
        })
        .map(|edge| {
            (
                inner[edge.source()].id.clone(),
                inner[edge.target()].id.clone(),
            )
        })
        .collect()
}
