// src/crawl/frontier.rs
// =============================================================================
// The frontier: a FIFO queue of link tasks plus the set of URLs ever queued.
//
// How it works:
// 1. A page is analyzed and every href on it is handed to enqueue()
// 2. enqueue() resolves the href against the page URL
// 3. If the resolved URL was never seen, it becomes a Task at the queue tail
// 4. dequeue() pops from the head, so the crawl expands breadth-first
//
// The visited set only grows. Because nothing is ever queued twice, any finite
// link graph (cycles included) drains in a finite number of steps.
//
// Rust concepts:
// - VecDeque: a queue we push at the back and pop at the front
// - HashSet: O(1) "have we seen this URL?" lookups
// - Cow<str>: a string that is borrowed when possible, owned when it had to change
// =============================================================================

use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A single link to check: `target` was found on the page `origin`.
///
/// `target` may carry a fragment; that fragment is what the validator
/// checks against the target page's anchor ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub origin: String,
    pub target: Url,
}

impl Task {
    /// The target with its fragment removed. Pages are fetched and cached
    /// under this URL.
    pub fn page_url(&self) -> Url {
        strip_fragment(&self.target)
    }

    /// The fragment to validate, if there is a non-empty one.
    ///
    /// The url crate percent-encodes fragments ("#getting started" becomes
    /// "getting%20started"), while ids in the markup are raw text, so the
    /// fragment is decoded back before anyone compares it.
    pub fn fragment(&self) -> Option<Cow<'_, str>> {
        let raw = self.target.fragment().filter(|f| !f.is_empty())?;
        Some(percent_decode_str(raw).decode_utf8_lossy())
    }
}

// Resolves an href (possibly relative) against a base URL
//
// Handles:
//   "/docs"           -> absolute path on the base host
//   "guide.html"      -> relative to the base directory
//   "//other/x"       -> protocol-relative, takes the base scheme
//   "#section"        -> the base page itself, with a fragment
//
// Returns None for anything that does not resolve, or that resolves to a
// scheme we cannot fetch (mailto:, javascript:, data:, ...).
pub fn resolve(base: &str, href: &str) -> Option<Url> {
    let base = Url::parse(base).ok()?;
    let resolved = base.join(href).ok()?;

    match resolved.scheme() {
        "http" | "https" => Some(resolved),
        _ => None,
    }
}

pub fn strip_fragment(url: &Url) -> Url {
    let mut page = url.clone();
    page.set_fragment(None);
    page
}

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Task>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `href` against `base` and queues it unless it was seen before.
    ///
    /// The dedup key is the full resolved URL, fragment included, so every
    /// distinct `#id` pointing at a page is validated once. The bare page URL
    /// is marked visited as well: a page scheduled through some fragment will
    /// be fetched anyway, so a later plain link to it adds nothing.
    ///
    /// Returns true when a new task was queued.
    pub fn enqueue(&mut self, base: &str, href: &str) -> bool {
        let Some(target) = resolve(base, href) else {
            return false;
        };

        if !self.visited.insert(target.as_str().to_string()) {
            return false;
        }
        if target.fragment().is_some() {
            self.visited.insert(strip_fragment(&target).into());
        }

        self.queue.push_back(Task {
            origin: base.to_string(),
            target,
        });
        true
    }

    pub fn dequeue(&mut self) -> Option<Task> {
        self.queue.pop_front()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `let ... else`?
//    - It binds a pattern or runs the else block, which must leave the function
//    - Reads top to bottom without nesting the happy path inside `if let`
//
// 2. Why does HashSet::insert return a bool?
//    - true = the value was new, false = it was already there
//    - One call does both the "seen before?" check and the insert
//
// 3. Url::join follows the same rules a browser uses for <a href>
//    - "http://x/a/b.html" joined with "c.html" -> "http://x/a/c.html"
//    - "http://x/a/b.html" joined with "#top"   -> "http://x/a/b.html#top"
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        let url = resolve("http://x/docs/index.html", "guide.html").unwrap();
        assert_eq!(url.as_str(), "http://x/docs/guide.html");
    }

    #[test]
    fn test_resolve_absolute_path() {
        let url = resolve("http://x/docs/index.html", "/a.html").unwrap();
        assert_eq!(url.as_str(), "http://x/a.html");
    }

    #[test]
    fn test_resolve_protocol_relative() {
        let url = resolve("https://x/index.html", "//cdn.example/lib.css").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example/lib.css");
    }

    #[test]
    fn test_resolve_fragment_only() {
        let url = resolve("http://x/a.html", "#sec1").unwrap();
        assert_eq!(url.as_str(), "http://x/a.html#sec1");
        assert_eq!(url.fragment(), Some("sec1"));
    }

    #[test]
    fn test_resolve_drops_unsupported_schemes() {
        assert_eq!(resolve("http://x/", "mailto:someone@example.com"), None);
        assert_eq!(resolve("http://x/", "javascript:void(0)"), None);
    }

    #[test]
    fn test_resolve_drops_malformed() {
        assert_eq!(resolve("not a url", "/a.html"), None);
        assert_eq!(resolve("http://x/", "http://[::1"), None);
    }

    #[test]
    fn test_task_fragment() {
        let task = Task {
            origin: "http://x/".to_string(),
            target: Url::parse("http://x/a.html#sec1").unwrap(),
        };
        assert_eq!(task.fragment().as_deref(), Some("sec1"));
        assert_eq!(task.page_url().as_str(), "http://x/a.html");

        let empty = Task {
            origin: "http://x/".to_string(),
            target: Url::parse("http://x/a.html#").unwrap(),
        };
        assert_eq!(empty.fragment(), None);
    }

    #[test]
    fn test_fragment_is_percent_decoded() {
        let target = resolve("http://x/index.html", "/a.html#インストール").unwrap();
        // the url crate stores it encoded...
        assert_ne!(target.fragment(), Some("インストール"));
        let task = Task {
            origin: "http://x/index.html".to_string(),
            target,
        };
        // ...but the task hands back the text as written in the page
        assert_eq!(task.fragment().as_deref(), Some("インストール"));

        let spaced = Task {
            origin: "http://x/index.html".to_string(),
            target: resolve("http://x/index.html", "/a.html#getting started").unwrap(),
        };
        assert_eq!(spaced.fragment().as_deref(), Some("getting started"));
    }

    #[test]
    fn test_enqueue_dedups() {
        let mut frontier = Frontier::new();
        assert!(frontier.enqueue("http://x/index.html", "/a.html"));
        assert!(!frontier.enqueue("http://x/b.html", "/a.html"));
        assert!(!frontier.enqueue("http://x/c.html", "a.html"));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_enqueue_keeps_distinct_fragments() {
        let mut frontier = Frontier::new();
        assert!(frontier.enqueue("http://x/a.html", "#sec1"));
        assert!(frontier.enqueue("http://x/a.html", "#missing"));
        assert!(!frontier.enqueue("http://x/a.html", "#sec1"));
        // the bare page is covered by the fragment tasks
        assert!(frontier.is_visited("http://x/a.html"));
        assert!(!frontier.enqueue("http://x/index.html", "/a.html"));
        assert_eq!(frontier.len(), 2);
    }

    #[test]
    fn test_enqueue_drops_unresolvable() {
        let mut frontier = Frontier::new();
        assert!(!frontier.enqueue("http://x/", "mailto:a@b.c"));
        assert!(frontier.is_empty());
        assert_eq!(frontier.visited_len(), 0);
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new();
        frontier.enqueue("http://x/", "/one");
        frontier.enqueue("http://x/", "/two");
        frontier.enqueue("http://x/", "/three");

        let order: Vec<String> = std::iter::from_fn(|| frontier.dequeue())
            .map(|task| task.target.path().to_string())
            .collect();
        assert_eq!(order, vec!["/one", "/two", "/three"]);
    }
}
