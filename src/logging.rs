// src/logging.rs
// =============================================================================
// Sets up tracing for the whole program.
//
// Diagnostics (skipped links, failed downloads, phase changes) go through
// the `tracing` macros and are written to stderr, so stdout only carries the
// progress lines, the result table or the JSON report.
//
// Log level:
// - RUST_LOG wins if it is set (e.g. RUST_LOG=site_mirror=debug,reqwest=warn)
// - otherwise "info", or "debug" with --verbose
// =============================================================================

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

// Picks the filter: RUST_LOG first, then the fallback level
fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

// Installs the global subscriber
//
// Returns an error instead of panicking if a subscriber is already set.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact()
        .with_filter(env_filter(verbose));

    tracing_subscriber::registry().with(stderr_layer).try_init()?;

    tracing::debug!("Logging initialized");
    Ok(())
}
