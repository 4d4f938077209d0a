use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use depscope::analyze::DEFAULT_DEPTH;
use depscope::app::{self, Output, RunConfig};
use depscope::export::ExportFormat;
use depscope::graph::CycleDetection;
use depscope::logger::init_logger;
use depscope::server::DEFAULT_PORT;

#[derive(Parser)]
#[command(name = "depscope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Installed npm dependency graph explorer", long_about = None)]
struct Cli {
    /// Your dir path
    #[arg(short, long)]
    dir: PathBuf,

    /// Depth of analysis (clamped to 1..=64)
    #[arg(short = 'p', long, default_value_t = DEFAULT_DEPTH as i64, env = "DEPSCOPE_DEPTH", allow_negative_numbers = true)]
    depth: i64,

    /// Path to save output instead of serving it
    #[arg(short, long, env = "DEPSCOPE_JSON_PATH")]
    json_path: Option<PathBuf>,

    /// Include devDependencies
    #[arg(short = 'e', long, env = "DEPSCOPE_DEV_DEPENDENCIES")]
    dev_dependencies: bool,

    /// Output file format (json, markdown)
    #[arg(short, long, default_value_t = ExportFormat::Json, env = "DEPSCOPE_FORMAT")]
    format: ExportFormat,

    /// Cycle detection strategy (peel, scc)
    #[arg(long, default_value_t = CycleDetection::Peel, env = "DEPSCOPE_CYCLES")]
    cycles: CycleDetection,

    /// Port for the graph viewer
    #[arg(long, default_value_t = DEFAULT_PORT, env = "DEPSCOPE_PORT")]
    port: u16,

    /// Debug logging
    #[arg(short, long, env = "DEPSCOPE_VERBOSE")]
    verbose: bool,

    /// Errors only
    #[arg(short, long, env = "DEPSCOPE_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    let output = match cli.json_path {
        Some(path) => Output::File {
            path,
            format: cli.format,
        },
        None => Output::Serve { port: cli.port },
    };

    let config = RunConfig {
        dir: cli.dir,
        depth: cli.depth,
        include_dev_dependencies: cli.dev_dependencies,
        cycle_detection: cli.cycles,
        output,
    };

    app::run(config).await.context("depscope failed")?;
    Ok(())
}
