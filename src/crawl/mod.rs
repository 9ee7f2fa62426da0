// src/crawl/mod.rs
// =============================================================================
// This module handles crawling the site.
//
// Features:
// - Breadth-first crawling from a seed URL
// - Same-origin scope: nothing outside the configured prefix is fetched
// - Each page fetched at most once, each link checked at most once
// - Optional bounded concurrency (--workers)
//
// Rust concepts:
// - Private submodules with `pub use` re-exports give callers one flat path
// =============================================================================

mod frontier;
mod pages;
mod queue;
mod scope;

pub use frontier::{resolve, strip_fragment, Frontier, Task};
pub use pages::{PageCache, PageOutcome, PageRecord};
pub use queue::{CrawlConfig, CrawlContext, Crawler};
pub use scope::Scope;
