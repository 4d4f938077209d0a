//! JSON export implementation.
//!
//! Writes the result as a pretty-printed `{"nodesList": [...], "edgesList": [...]}`
//! document, the same shape served at `/analyze`.

use super::Exporter;
use crate::analyze::AnalysisResult;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, result: &AnalysisResult, writer: &mut W) -> io::Result<()> {
        let json = serde_json::to_string_pretty(result)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DependencyEdge, PackageNode};

    fn create_test_result() -> AnalysisResult {
        let mut app = PackageNode::new("app", "1.0.0", Some("The app".to_string()), "/app");
        app.depth = 3;
        let mut lib = PackageNode::new("lib", "1.2.0", None, "/app/node_modules/lib");
        lib.depth = 2;

        AnalysisResult {
            nodes_list: vec![app, lib],
            edges_list: vec![DependencyEdge::new("app@1.0.0", "lib@1.2.0", false)],
        }
    }

    fn export_value(result: &AnalysisResult) -> serde_json::Value {
        let mut output = Vec::new();
        JsonExporter.export(result, &mut output).unwrap();
        let json_str = String::from_utf8(output).unwrap();
        serde_json::from_str(&json_str).unwrap()
    }

    #[test]
    fn test_json_export_nodes() {
        let parsed = export_value(&create_test_result());

        let nodes = parsed["nodesList"].as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0]["id"], "app@1.0.0");
        assert_eq!(nodes[0]["description"], "The app");
        assert_eq!(nodes[0]["depth"], 3);
        assert_eq!(nodes[1]["dir"], "/app/node_modules/lib");
        assert_eq!(nodes[1]["isMultipleVersions"], false);
    }

    #[test]
    fn test_json_export_edges() {
        let parsed = export_value(&create_test_result());

        let edges = parsed["edgesList"].as_array().unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0]["source"], "app@1.0.0");
        assert_eq!(edges[0]["targetId"], "lib@1.2.0");
        assert_eq!(edges[0]["isCircular"], false);
    }

    #[test]
    fn test_json_export_empty() {
        let parsed = export_value(&AnalysisResult::default());

        assert!(parsed["nodesList"].as_array().unwrap().is_empty());
        assert!(parsed["edgesList"].as_array().unwrap().is_empty());
    }
}
