//! Node and edge records produced by a graph run.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;

/// Builds the `name@version` identity used as a node's unique key.
///
/// # Example
///
/// ```
/// use depscope::graph::node_id;
///
/// assert_eq!(node_id("react", "18.2.0"), "react@18.2.0");
/// assert_eq!(node_id("@babel/core", "7.0.0"), "@babel/core@7.0.0");
/// ```
pub fn node_id(name: &str, version: &str) -> String {
    format!("{}@{}", name, version)
}

/// One installed package, identified by `name@version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageNode {
    /// `name@version`
    pub id: String,
    /// Package name from the manifest
    pub name: String,
    /// Installed version from the manifest
    pub version: String,
    /// Manifest description, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Installation directory the manifest was read from
    #[serde(rename = "dir")]
    pub directory: PathBuf,
    /// Remaining depth budget at first registration
    pub depth: u32,
    /// Set when another installed version of the same name was found
    #[serde(default)]
    pub is_multiple_versions: bool,
}

impl PackageNode {
    /// Creates an unregistered node; depth is assigned on registration.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: Option<String>,
        directory: impl Into<PathBuf>,
    ) -> Self {
        let name = name.into();
        let version = version.into();
        Self {
            id: node_id(&name, &version),
            name,
            version,
            description,
            directory: directory.into(),
            depth: 0,
            is_multiple_versions: false,
        }
    }
}

/// A resolved dependency relationship, pointing from consumer to dependency.
///
/// Serialized with `source`/`target` alongside `sourceId`/`targetId`, the
/// shape the graph viewer reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    /// Id of the consuming package
    pub source_id: String,
    /// Id of the package it depends on
    pub target_id: String,
    /// Whether the edge survived both peels of the cycle pass
    #[serde(default)]
    pub is_circular: bool,
}

impl DependencyEdge {
    /// Creates a new edge.
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>, is_circular: bool) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            is_circular,
        }
    }
}

impl Serialize for DependencyEdge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DependencyEdge", 5)?;
        state.serialize_field("source", &self.source_id)?;
        state.serialize_field("sourceId", &self.source_id)?;
        state.serialize_field("target", &self.target_id)?;
        state.serialize_field("targetId", &self.target_id)?;
        state.serialize_field("isCircular", &self.is_circular)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_node_new() {
        let node = PackageNode::new("lib", "1.2.0", None, "/app/node_modules/lib");

        assert_eq!(node.id, "lib@1.2.0");
        assert_eq!(node.depth, 0);
        assert!(!node.is_multiple_versions);
    }

    #[test]
    fn test_package_node_json_shape() {
        let mut node = PackageNode::new(
            "lib",
            "1.2.0",
            Some("A library".to_string()),
            "/app/node_modules/lib",
        );
        node.depth = 2;

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["id"], "lib@1.2.0");
        assert_eq!(value["dir"], "/app/node_modules/lib");
        assert_eq!(value["depth"], 2);
        assert_eq!(value["isMultipleVersions"], false);
        assert_eq!(value["description"], "A library");
    }

    #[test]
    fn test_missing_description_is_omitted() {
        let node = PackageNode::new("lib", "1.0.0", None, "/x");
        let value = serde_json::to_value(&node).unwrap();

        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_edge_json_shape() {
        let edge = DependencyEdge::new("app@1.0.0", "lib@1.2.0", false);
        let value = serde_json::to_value(&edge).unwrap();

        assert_eq!(value["source"], "app@1.0.0");
        assert_eq!(value["sourceId"], "app@1.0.0");
        assert_eq!(value["target"], "lib@1.2.0");
        assert_eq!(value["targetId"], "lib@1.2.0");
        assert_eq!(value["isCircular"], false);

        let back: DependencyEdge = serde_json::from_value(value).unwrap();
        assert_eq!(back, edge);
    }
}
