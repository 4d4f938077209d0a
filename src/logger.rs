//! Logging setup for the depscope binary.
//!
//! Verbosity is decided in this order:
//! 1. `--verbose`: debug level for depscope
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`: custom filter
//! 4. Default: info level for depscope

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Call once, before any logging occurs.
///
/// ```rust,no_run
/// use depscope::logger::init_logger;
///
/// init_logger(false, false);
/// tracing::info!("Starting analysis");
/// ```
pub fn init_logger(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("depscope=debug")
    } else if quiet {
        EnvFilter::new("depscope=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("depscope=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
