// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Subcommands:
// - mirror: crawl a site and write it to a directory
// - count: only count how many resources a crawl would reach
// =============================================================================

use crate::config::{CrawlConfig, TraversalMode};
use crate::download::HttpConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "site-mirror",
    version,
    about = "Mirror a website's reachable pages and assets to a local directory",
    long_about = "site-mirror starts at one URL, follows links, images, stylesheets, scripts and \
                  frames that stay under that URL, and saves every resource it finds into a \
                  directory tree that mirrors the site's host and paths."
)]
pub struct Cli {
    /// Show debug logs (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, global = true)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mirror a website into a local directory
    ///
    /// Example: site-mirror mirror https://example.com/docs/ output --mode breadth-first
    Mirror {
        /// URL to start from; only URLs starting with it are crawled
        start_url: String,

        /// Directory the mirror is written to (created if missing)
        output_dir: PathBuf,

        /// Traversal order
        #[arg(long, value_enum, default_value_t = TraversalMode::DepthFirst)]
        mode: TraversalMode,

        /// Count reachable resources first so progress shows percentages
        ///
        /// Every page is downloaded twice when this is on.
        #[arg(long)]
        count_first: bool,

        /// Number of pages fetched at the same time
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=64))]
        workers: u16,

        /// Output the crawl report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Count the resources a mirror of this URL would download
    ///
    /// Example: site-mirror count https://example.com/
    Count {
        /// URL to start from
        start_url: String,

        /// Output the count as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            timeout: Duration::from_secs(self.timeout),
            ..HttpConfig::default()
        }
    }
}

// Builds the crawl configuration for the mirror subcommand
pub fn crawl_config(
    start_url: &str,
    output_dir: PathBuf,
    mode: TraversalMode,
    count_first: bool,
    workers: u16,
) -> CrawlConfig {
    CrawlConfig {
        mode,
        count_first,
        workers: usize::from(workers),
        ..CrawlConfig::new(start_url, output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_defaults() {
        let cli = Cli::try_parse_from(["site-mirror", "mirror", "https://example.com", "output"]).unwrap();
        match cli.command {
            Commands::Mirror {
                start_url,
                output_dir,
                mode,
                count_first,
                workers,
                json,
            } => {
                assert_eq!(start_url, "https://example.com");
                assert_eq!(output_dir, PathBuf::from("output"));
                assert_eq!(mode, TraversalMode::DepthFirst);
                assert!(!count_first);
                assert_eq!(workers, 1);
                assert!(!json);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.timeout, 10);
    }

    #[test]
    fn test_mirror_options() {
        let cli = Cli::try_parse_from([
            "site-mirror",
            "mirror",
            "https://example.com",
            "out",
            "--mode",
            "breadth-first",
            "--count-first",
            "--workers",
            "4",
            "--timeout",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.http_config().timeout, Duration::from_secs(3));
        let Commands::Mirror {
            start_url,
            output_dir,
            mode,
            count_first,
            workers,
            ..
        } = cli.command
        else {
            panic!("expected mirror");
        };
        let config = crawl_config(&start_url, output_dir, mode, count_first, workers);
        assert_eq!(config.mode, TraversalMode::BreadthFirst);
        assert!(config.count_first);
        assert_eq!(config.workers, 4);
    }

    #[test]
    fn test_missing_output_dir_is_rejected() {
        assert!(Cli::try_parse_from(["site-mirror", "mirror", "https://example.com"]).is_err());
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(Cli::try_parse_from([
            "site-mirror",
            "mirror",
            "https://example.com",
            "out",
            "--workers",
            "0"
        ])
        .is_err());
    }

    #[test]
    fn test_count_command() {
        let cli = Cli::try_parse_from(["site-mirror", "count", "https://example.com/", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Count { json: true, .. }));
    }
}
