//! anchor-guardian: crawl a locally served site and report broken pages and
//! missing `#fragment` anchors.
//!
//! Modules:
//! - crawl: frontier, page cache, scope and the crawl loop
//! - checker: fetching, page analysis and fragment validation
//! - report: diagnostics and their text / JSON output

pub mod checker;
pub mod crawl;
pub mod error;
pub mod report;

pub use checker::{HttpFetcher, PageSource};
pub use crawl::{CrawlConfig, CrawlContext, Crawler};
pub use error::CrawlError;
pub use report::{CrawlSummary, Diagnostic, OutputFormat, Reporter};
