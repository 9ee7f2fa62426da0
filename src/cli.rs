// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI is a plain struct and clap generates the
// parsing, --help and --version from the attributes on it.
// =============================================================================

use anchor_guardian::crawl::{CrawlConfig, Scope};
use anchor_guardian::error::CrawlError;
use anchor_guardian::report::OutputFormat;
use clap::Parser;
use std::time::Duration;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "anchor-guardian",
    version,
    about = "Crawl a locally served site for broken pages and missing #anchors",
    long_about = "anchor-guardian walks every page reachable from the seed URL, reports pages that \
                  fail to load and links whose #fragment does not exist on the target page. \
                  Only URLs under the crawl origin are fetched."
)]
pub struct Cli {
    /// Seed URL of the running site
    #[arg(default_value = "http://127.0.0.1:4000")]
    pub seed: String,

    /// URL prefix the crawl is restricted to (defaults to the seed's origin)
    ///
    /// Links outside this prefix are never fetched or reported.
    #[arg(long, env = "ANCHOR_GUARDIAN_ORIGIN")]
    pub origin: Option<String>,

    /// Number of pages fetched concurrently (1 = strictly sequential)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=64))]
    pub workers: u8,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Output one JSON object per line instead of text
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log crawl progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> Result<CrawlConfig, CrawlError> {
        let seed = Url::parse(&self.seed).map_err(|source| CrawlError::InvalidSeed {
            url: self.seed.clone(),
            source,
        })?;
        if !matches!(seed.scheme(), "http" | "https") {
            return Err(CrawlError::UnsupportedScheme(seed.scheme().to_string()));
        }

        let mut config = CrawlConfig::new(seed).with_workers(self.workers as usize);

        // An explicit origin is normalized the same way crawled URLs are
        if let Some(origin) = &self.origin {
            let scope = Scope::parse(origin).map_err(|source| CrawlError::InvalidOrigin {
                origin: origin.clone(),
                source,
            })?;
            config = config.with_scope(scope);
        }

        // A seed outside the scope would crawl nothing and exit clean
        if !config.scope.contains(&config.seed) {
            return Err(CrawlError::SeedOutOfScope {
                seed: config.seed.to_string(),
                origin: config.scope.prefix().to_string(),
            });
        }
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}
