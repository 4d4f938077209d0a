//! Export functionality for graph results.
//!
//! This module provides exporters for writing an [`AnalysisResult`] to a
//! file or any writer: JSON (the `{nodesList, edgesList}` document the
//! graph viewer reads) and a Markdown report.

pub mod json;
pub mod markdown;

use crate::analyze::AnalysisResult;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    #[default]
    Json,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the result to the given writer.
    fn export<W: Write>(&self, result: &AnalysisResult, writer: &mut W) -> io::Result<()>;
}

/// Export the result in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    result: &AnalysisResult,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(result, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(result, writer),
    }
}

/// Export the result to `path`, replacing any existing file.
pub fn export_to_file(format: ExportFormat, result: &AnalysisResult, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    export(format, result, &mut writer)?;
    writer.flush()
}
