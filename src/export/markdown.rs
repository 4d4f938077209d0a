//! Markdown export implementation.
//!
//! Exports a dependency graph report in Markdown format for documentation and reporting.

use super::Exporter;
use crate::analyze::AnalysisResult;
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, result: &AnalysisResult, writer: &mut W) -> io::Result<()> {
        let circular = result.circular_edges();
        let duplicated = result.duplicated_packages();

        // Title
        writeln!(writer, "# Installed Dependency Graph")?;
        writeln!(writer)?;
        if let Some(root) = result.root() {
            writeln!(writer, "**Project:** {} v{}", root.name, root.version)?;
            writeln!(writer)?;
        }

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Packages | {} |", result.node_count())?;
        writeln!(writer, "| Dependency Edges | {} |", result.edge_count())?;
        writeln!(writer, "| Circular Edges | {} |", circular.len())?;
        writeln!(writer, "| Packages With Multiple Versions | {} |", duplicated.len())?;
        writeln!(writer)?;

        // Packages
        if !result.nodes_list.is_empty() {
            writeln!(writer, "## Packages")?;
            writeln!(writer)?;
            writeln!(writer, "| Package | Version | Depth | Dependencies |")?;
            writeln!(writer, "|---------|---------|-------|--------------|")?;
            for node in &result.nodes_list {
                writeln!(
                    writer,
                    "| {} | {} | {} | {} |",
                    node.name,
                    node.version,
                    node.depth,
                    result.dependencies_of(&node.id).len()
                )?;
            }
            writeln!(writer)?;
        }

        // Issues section (cycles and duplicates)
        if !circular.is_empty() || !duplicated.is_empty() {
            writeln!(writer, "## Issues")?;
            writeln!(writer)?;
        }

        if !circular.is_empty() {
            writeln!(writer, "### Circular Dependencies")?;
            writeln!(writer)?;
            writeln!(writer, "The following edges lie on a dependency cycle:")?;
            writeln!(writer)?;
            for (i, edge) in circular.iter().enumerate() {
                writeln!(writer, "{}. `{} -> {}`", i + 1, edge.source_id, edge.target_id)?;
            }
            writeln!(writer)?;
        }

        if !duplicated.is_empty() {
            writeln!(writer, "### Multiple Versions")?;
            writeln!(writer)?;
            writeln!(
                writer,
                "The following packages are installed at more than one version:"
            )?;
            writeln!(writer)?;

            for (name, nodes) in &duplicated {
                writeln!(writer, "#### {}", name)?;
                writeln!(writer)?;
                writeln!(writer, "| Version | Directory |")?;
                writeln!(writer, "|---------|-----------|")?;
                for node in nodes {
                    writeln!(writer, "| {} | {} |", node.version, node.directory.display())?;
                }
                writeln!(writer)?;
            }
        }

        // Footer
        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by depscope*")?;

        Ok(())
    }
}
