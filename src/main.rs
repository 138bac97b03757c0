// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Dispatch to the appropriate subcommand handler
// 4. Print the report and exit with a proper code
//    (0 = everything downloaded, 1 = some URLs failed or the crawl was
//    interrupted, 2 = error)
//
// Rust concepts used:
// - async/await: Because we need to make many network requests
// - Arc<dyn Trait>: The crawler gets its collaborators as trait objects
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - crawl settings
mod crawl; // src/crawl/ - traversal engine
mod download; // src/download/ - HTTP fetching and file writing
mod error; // src/error.rs - error types
mod extract; // src/extract/ - link extraction
mod logging; // src/logging.rs - tracing setup
mod progress; // src/progress.rs - progress display
mod urls; // src/urls/ - canonicalization, scope, path mapping

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use cli::{Cli, Commands};
use crawl::{CrawlOutcome, CrawlReport, Crawler, SkipReason};
use download::HttpDownloader;
use progress::ConsoleProgress;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use urls::BasicUrlHandler;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("Warning: could not set up logging: {}", e);
    }

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole cause chain
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    let http = cli.http_config();

    match cli.command {
        Commands::Mirror {
            start_url,
            output_dir,
            mode,
            count_first,
            workers,
            json,
        } => {
            let config = cli::crawl_config(&start_url, output_dir, mode, count_first, workers);
            handle_mirror(config, &http, json).await
        }
        Commands::Count { start_url, json } => handle_count(&start_url, &http, json).await,
    }
}

// Stops the crawl at the next frontier iteration when Ctrl-C is pressed
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Ctrl-C received, finishing current pages and stopping");
            trigger.cancel();
        }
    });
    token
}

fn build_crawler(
    config: config::CrawlConfig,
    http: &download::HttpConfig,
    quiet: bool,
) -> Result<Crawler> {
    let downloader = Arc::new(HttpDownloader::new(http)?);
    let crawler = Crawler::new(
        config,
        downloader,
        Arc::new(BasicUrlHandler),
        Arc::new(ConsoleProgress::new(quiet)),
    )?;
    Ok(crawler.with_cancellation(cancel_on_ctrl_c()))
}

// Handles the 'mirror' subcommand
async fn handle_mirror(config: config::CrawlConfig, http: &download::HttpConfig, json: bool) -> Result<i32> {
    let output_dir = config.output_root.clone();
    let crawler = build_crawler(config, http, json)?;

    // The output directory has to exist before anything is written into it
    create_output_dir(&output_dir).await?;

    if !json {
        println!("🔍 Mirroring: {}", crawler.origin());
        println!("📁 Output directory: {}", output_dir.display());
    }

    let report = crawler.start_crawling().await;

    print_report(&report, json)?;

    if report.failed_count() > 0 || report.cancelled {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Handles the 'count' subcommand
async fn handle_count(start_url: &str, http: &download::HttpConfig, json: bool) -> Result<i32> {
    // Counting never writes, so the output root is irrelevant
    let config = config::CrawlConfig::new(start_url, ".");
    let crawler = build_crawler(config, http, json)?;

    if !json {
        println!("🔍 Counting resources under: {}", crawler.origin());
    }

    let total = crawler.count_reachable().await;

    if json {
        let output = serde_json::json!({
            "start_url": crawler.origin().as_str(),
            "total": total,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("📋 Reachable resources: {}", total);
    }
    Ok(0)
}

async fn create_output_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| error::CrawlError::OutputDir {
            path: path.to_path_buf(),
            source,
        })
        .with_context(|| "cannot start the crawl")
}

// Prints the report either as a table or JSON
fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_table(report);
    }
    Ok(())
}

// Prints results as a human-readable table in the terminal
fn print_table(report: &CrawlReport) {
    println!();
    println!("{:<60} {:<15} {:<30}", "URL", "OUTCOME", "DETAIL");
    println!("{}", "=".repeat(105));

    for result in &report.results {
        let (outcome, detail) = format_outcome(&result.outcome);

        // Truncate URL if too long for display
        let url = result.url.as_str();
        let url_display = if url.chars().count() > 57 {
            format!("{}...", url.chars().take(57).collect::<String>())
        } else {
            url.to_string()
        };

        println!("{:<60} {:<15} {:<30}", url_display, outcome, detail);
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Fetched: {}", report.fetched_count());
    println!("   ❌ Failed: {}", report.failed_count());
    println!("   ⏭️  Skipped: {}", report.skipped_count());
    if let Some(total) = report.total_estimate {
        println!("   📋 Counted beforehand: {}", total);
    }
    println!("   ⏱️  Duration: {:.3}s", report.elapsed_ms as f64 / 1000.0);
    if report.cancelled {
        println!("   ⚠️  Crawl was interrupted before it finished");
    }
}

fn format_outcome(outcome: &CrawlOutcome) -> (&'static str, String) {
    match outcome {
        CrawlOutcome::Fetched { bytes, saved_to: Some(path) } => {
            ("✅ SAVED", format!("{} bytes -> {}", bytes, path.display()))
        }
        CrawlOutcome::Fetched { bytes, saved_to: None } => {
            ("⚠️  NOT SAVED", format!("{} bytes", bytes))
        }
        CrawlOutcome::FetchFailed { cause } => ("❌ FAILED", cause.clone()),
        CrawlOutcome::Skipped { reason } => {
            let reason = match reason {
                SkipReason::AlreadyVisited => "already visited",
                SkipReason::OutOfScope => "out of scope",
                SkipReason::Invalid => "invalid URL",
            };
            ("⏭️  SKIPPED", reason.to_string())
        }
    }
}
