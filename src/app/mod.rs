//! Orchestration around the graph core.
//!
//! Validates the project directory, clamps the depth, times the run and
//! hands the result to either a file exporter or the HTTP server.

use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::info;

use crate::analyze::{analyze, AnalysisResult, AnalyzeOptions};
use crate::export::{export_to_file, ExportFormat};
use crate::graph::CycleDetection;
use crate::resolver::{exists, MANIFEST_FILE, MODULES_DIR};
use crate::server;

/// Smallest depth passed to the core.
pub const MIN_DEPTH: u32 = 1;
/// Largest depth passed to the core.
pub const MAX_DEPTH: u32 = 64;

/// Errors reported by the orchestration layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{} is not a valid dir: directory does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("{} is not a valid dir: no package.json found", .0.display())]
    MissingManifest(PathBuf),

    #[error("{} is not a valid dir: no node_modules directory found", .0.display())]
    MissingModules(PathBuf),

    #[error("Error writing to file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),

    #[error("Analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Where the finished graph goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Write to a file in the given format
    File { path: PathBuf, format: ExportFormat },
    /// Serve over HTTP on the given port
    Serve { port: u16 },
}

/// Everything a run needs, as collected from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub dir: PathBuf,
    /// Requested depth before clamping
    pub depth: i64,
    pub include_dev_dependencies: bool,
    pub cycle_detection: CycleDetection,
    pub output: Output,
}

/// Clamps a requested depth to `[MIN_DEPTH, MAX_DEPTH]`.
///
/// # Example
///
/// ```
/// use depscope::app::clamp_depth;
///
/// assert_eq!(clamp_depth(0), 1);
/// assert_eq!(clamp_depth(3), 3);
/// assert_eq!(clamp_depth(100), 64);
/// ```
pub fn clamp_depth(depth: i64) -> u32 {
    depth.clamp(MIN_DEPTH as i64, MAX_DEPTH as i64) as u32
}

/// Checks that `dir` exists and holds a manifest and a `node_modules`
/// directory.
pub fn validate_root(dir: &Path) -> Result<(), AppError> {
    if !exists(dir) {
        return Err(AppError::MissingDirectory(dir.to_path_buf()));
    }
    if !exists(&dir.join(MANIFEST_FILE)) {
        return Err(AppError::MissingManifest(dir.to_path_buf()));
    }
    if !exists(&dir.join(MODULES_DIR)) {
        return Err(AppError::MissingModules(dir.to_path_buf()));
    }
    Ok(())
}

/// Validates the project and builds its graph.
pub fn analyze_project(config: &RunConfig) -> Result<AnalysisResult, AppError> {
    validate_root(&config.dir)?;

    let options = AnalyzeOptions {
        depth: clamp_depth(config.depth),
        include_dev_dependencies: config.include_dev_dependencies,
        cycle_detection: config.cycle_detection,
    };

    let started = Instant::now();
    let result = analyze(&config.dir, &options);
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        nodes = result.node_count(),
        edges = result.edge_count(),
        "Time: {:.3?}",
        started.elapsed()
    );

    Ok(result)
}

/// Runs the whole pipeline: analysis, then file output or serving.
pub async fn run(config: RunConfig) -> Result<(), AppError> {
    let output = config.output.clone();
    let result = tokio::task::spawn_blocking(move || analyze_project(&config)).await??;

    match output {
        Output::File { path, format } => {
            export_to_file(format, &result, &path).map_err(|source| AppError::Write {
                path: path.clone(),
                source,
            })?;
            info!("{} written to {}.", format, path.display());
            Ok(())
        }
        Output::Serve { port } => server::serve(&result, port)
            .await
            .map_err(AppError::Server),
    }
}
