// src/checker/mod.rs
// =============================================================================
// This module contains everything that looks at a single page.
//
// Submodules:
// - http: Fetches a page (PageSource trait + the reqwest implementation)
// - html: Finds anchor ids, links and redirect markers in the raw markup
// - anchors: Checks a link's #fragment against the target page's anchors
//
// Rust concepts:
// - `pub use` re-exports keep the submodules private to this module
// =============================================================================

mod anchors;
mod html;
mod http;

pub use anchors::validate_fragment;
pub use html::{analyze_page, decode_body, PageContent};
pub use http::{FetchError, FetchedPage, HttpFetcher, PageSource};
