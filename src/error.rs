// src/error.rs
// =============================================================================
// Fatal errors for a crawl run.
//
// Per-page problems (404s, timeouts, missing anchors) are NOT errors here -
// they become diagnostics and the crawl keeps going. Only things that stop
// the run before it starts, or stop us writing the report, live in CrawlError.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("invalid seed URL '{url}': {source}")]
    InvalidSeed {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported seed scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("invalid --origin '{origin}': {source}")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: url::ParseError,
    },

    #[error("seed URL {seed} is outside the crawl origin {origin}")]
    SeedOutOfScope { seed: String, origin: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
