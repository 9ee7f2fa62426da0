// src/checker/html.rs
// =============================================================================
// This module pulls anchor ids and links out of a fetched page.
//
// It is deliberately NOT an HTML parser. We pattern-match the raw markup with
// the `regex` crate, which keeps the rules simple and predictable:
// - an anchor id is any  id="..."  or  id='...'  anywhere in the text
//   (so data-id="x" or an id inside a <pre> block count too)
// - a link is an  href="..."  inside an <a ...> or <link ...> tag, and the
//   tag and its href have to sit on the same line
// - a redirect page is one carrying  <meta http-equiv="refresh" content="0; url=...">
//
// Those permissive rules are a known limitation, not a bug to fix here.
//
// Rust concepts:
// - once_cell::sync::Lazy: each regex is compiled once, on first use
// - Named capture groups: (?P<href>...) read back with caps.name("href")
// - Cow<str>: lossy UTF-8 decoding only allocates when bytes were replaced
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;

// The patterns are constants, so a failure to compile is a programmer error.
static ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"id=['"](.*?)['"]"#).expect("valid id pattern"));

static HREF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<(?:a|link)\s.*?href=['"](?P<href>.*?)['"]"#).expect("valid href pattern")
});

static REDIRECT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta\s+http-equiv=['"]refresh['"]\s+content=['"]\s*\d+\s*;\s*url=(?P<url>[^'"]*)['"]"#)
        .expect("valid redirect pattern")
});

/// What a page tells us once decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    /// A regular page: its anchor ids and every href found on it.
    Document {
        anchors: HashSet<String>,
        links: Vec<String>,
    },
    /// A meta-refresh page pointing somewhere else. Its links are not followed.
    Redirect { destination: String },
}

// Decodes a response body as UTF-8
//
// Invalid byte sequences are replaced with U+FFFD instead of failing.
// The bool is true when replacement happened, so the caller can warn.
pub fn decode_body(bytes: &[u8]) -> (Cow<'_, str>, bool) {
    let text = String::from_utf8_lossy(bytes);
    let lossy = matches!(text, Cow::Owned(_));
    (text, lossy)
}

pub fn analyze_page(html: &str) -> PageContent {
    if let Some(destination) = find_redirect(html) {
        return PageContent::Redirect { destination };
    }

    PageContent::Document {
        anchors: extract_anchor_ids(html),
        links: extract_hrefs(html),
    }
}

pub fn find_redirect(html: &str) -> Option<String> {
    REDIRECT_PATTERN
        .captures(html)
        .map(|caps| caps["url"].trim().to_string())
}

pub fn extract_anchor_ids(html: &str) -> HashSet<String> {
    ID_PATTERN
        .captures_iter(html)
        .map(|caps| caps[1].to_string())
        .collect()
}

// Returns hrefs in document order, raw (not resolved, duplicates kept).
// The frontier resolves and deduplicates them.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    HREF_PATTERN
        .captures_iter(html)
        .map(|caps| caps["href"].to_string())
        .collect()
}
