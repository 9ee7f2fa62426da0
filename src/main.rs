// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr) and colors
// 3. Crawl the site, streaming diagnostics to stdout
// 4. Exit with proper code (0 = clean, 1 = broken links found, 2 = error)
// =============================================================================

mod cli;

use anchor_guardian::{Crawler, HttpFetcher, Reporter};
use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = crawl finished, no error-level diagnostics
//   Ok(1) = at least one broken page or missing anchor
//   Err   = the crawl could not run (bad seed, client setup, output failure)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = cli.crawl_config()?;
    let fetcher =
        HttpFetcher::new(cli.request_timeout()).context("failed to set up the HTTP client")?;

    let stdout = std::io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), cli.output_format());
    reporter.announce(config.seed.as_str())?;

    let crawler = Crawler::new(fetcher, config);
    let summary = crawler.crawl(&mut reporter).await?;
    reporter.summary(&summary)?;

    if summary.errors > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Logs go to stderr so stdout only carries the report.
// RUST_LOG wins when set; otherwise warnings only, or debug with --verbose.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,anchor_guardian=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
