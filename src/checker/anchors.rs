// src/checker/anchors.rs
// =============================================================================
// The link validator: does the #fragment of a link exist on its target page?
//
// Runs after the target's page record exists. Pages that failed to load or
// that are meta-refresh redirects are skipped: their anchor sets were never
// read, and the fetch error / redirect notice already covers them.
//
// Rust concepts:
// - `?` on Option: return None early when the link has no fragment
// =============================================================================

use crate::crawl::{PageRecord, Task};
use crate::report::Diagnostic;

pub fn validate_fragment(task: &Task, record: &PageRecord) -> Option<Diagnostic> {
    // No #fragment (or an empty one) means there is nothing to check
    let fragment = task.fragment()?;

    // Failed / redirect pages have no anchors we can trust
    if !record.is_loaded() || record.has_anchor(&fragment) {
        return None;
    }

    Some(Diagnostic::BrokenAnchor {
        fragment: fragment.to_string(),
        url: task.page_url().to_string(),
        linked_from: task.origin.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use url::Url;

    fn task(target: &str) -> Task {
        Task {
            origin: "http://x/index.html".to_string(),
            target: Url::parse(target).unwrap(),
        }
    }

    fn page_with(ids: &[&str]) -> PageRecord {
        PageRecord::loaded(ids.iter().map(|id| id.to_string()).collect::<HashSet<_>>())
    }

    #[test]
    fn test_present_anchor_passes() {
        let record = page_with(&["sec1"]);
        assert_eq!(validate_fragment(&task("http://x/a.html#sec1"), &record), None);
    }

    #[test]
    fn test_missing_anchor_is_reported() {
        let record = page_with(&["sec1"]);
        let diagnostic = validate_fragment(&task("http://x/a.html#missing"), &record);
        assert_eq!(
            diagnostic,
            Some(Diagnostic::BrokenAnchor {
                fragment: "missing".to_string(),
                url: "http://x/a.html".to_string(),
                linked_from: "http://x/index.html".to_string(),
            })
        );
    }

    #[test]
    fn test_non_ascii_and_spaced_ids_match() {
        let record = page_with(&["インストール", "getting started"]);
        assert_eq!(validate_fragment(&task("http://x/a.html#インストール"), &record), None);
        assert_eq!(validate_fragment(&task("http://x/a.html#getting%20started"), &record), None);
    }

    #[test]
    fn test_missing_non_ascii_anchor_reported_decoded() {
        let record = page_with(&["インストール"]);
        match validate_fragment(&task("http://x/a.html#設定"), &record) {
            Some(Diagnostic::BrokenAnchor { fragment, .. }) => assert_eq!(fragment, "設定"),
            other => panic!("expected a broken anchor, got {:?}", other),
        }
    }

    #[test]
    fn test_no_fragment_no_check() {
        let record = page_with(&[]);
        assert_eq!(validate_fragment(&task("http://x/a.html"), &record), None);
        assert_eq!(validate_fragment(&task("http://x/a.html#"), &record), None);
    }

    #[test]
    fn test_failed_and_redirect_pages_are_skipped() {
        let failed = PageRecord::failed("HTTP 404");
        let moved = PageRecord::redirected("http://x/b.html");
        assert_eq!(validate_fragment(&task("http://x/a.html#sec1"), &failed), None);
        assert_eq!(validate_fragment(&task("http://x/a.html#sec1"), &moved), None);
    }
}
