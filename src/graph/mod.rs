//! Graph module for installed-package relationships.
//!
//! This module holds the node and edge records, the petgraph-backed
//! [`DependencyGraph`] they live in, the per-run [`NodeRegistry`], and the
//! circular-edge pass.
//!
//! # Example
//!
//! ```rust
//! use depscope::graph::{circular_edges, CycleDetection, DependencyGraph, PackageNode};
//!
//! let mut graph = DependencyGraph::new();
//! for name in ["a", "b", "c"] {
//!     graph.add_node(PackageNode::new(name, "1.0.0", None, name));
//! }
//! graph.add_edge("a@1.0.0", "b@1.0.0");
//! graph.add_edge("b@1.0.0", "a@1.0.0");
//! graph.add_edge("b@1.0.0", "c@1.0.0");
//!
//! let circular = circular_edges(&graph, CycleDetection::Peel);
//! assert_eq!(circular.len(), 2);
//! ```

pub mod cycles;
pub mod dependency_graph;
pub mod node;
pub mod registry;

pub use cycles::{circular_edges, peel, strongly_connected_edges, CircularEdges, CycleDetection};
pub use dependency_graph::DependencyGraph;
pub use node::{node_id, DependencyEdge, PackageNode};
pub use registry::NodeRegistry;
