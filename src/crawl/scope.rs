// src/crawl/scope.rs
// =============================================================================
// Same-origin scope: the URL prefix the crawl is allowed to fetch.
//
// Anything outside the prefix is never requested, never validated and never
// reported. The prefix normally comes from the seed URL's origin
// (e.g. "http://127.0.0.1:4000") but can be overridden with --origin.
//
// Rust concepts:
// - impl Into<String>: accept both &str and String without the caller converting
// - strip_prefix: returns the rest of the string only if the prefix matched
// =============================================================================

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    prefix: String,
}

impl Scope {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Scope from a user-supplied prefix such as `--origin`.
    ///
    /// The prefix goes through the same URL serializer as every crawled link,
    /// so "HTTP://Host:80" ends up as "http://host/" and still matches.
    pub fn parse(prefix: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(prefix)?;
        Ok(Self::new(String::from(url)))
    }

    /// Scope covering everything served from the seed's scheme, host and port.
    pub fn from_seed(seed: &Url) -> Self {
        Self::new(seed.origin().ascii_serialization())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    // The prefix has to end on a boundary: "http://127.0.0.1:4000" must not
    // admit "http://127.0.0.1:40001/".
    pub fn contains(&self, url: &Url) -> bool {
        // Compare against the serialized URL, the same form the frontier keys on
        let Some(rest) = url.as_str().strip_prefix(&self.prefix) else {
            return false;
        };

        // A prefix ending in "/" is already a boundary
        self.prefix.ends_with('/')
            || rest.is_empty()
            || rest.starts_with(['/', '?', '#'])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_from_seed_uses_origin() {
        let scope = Scope::from_seed(&url("http://127.0.0.1:4000/docs/index.html"));
        assert_eq!(scope.prefix(), "http://127.0.0.1:4000");
    }

    #[test]
    fn test_contains_same_origin() {
        let scope = Scope::new("http://127.0.0.1:4000");
        assert!(scope.contains(&url("http://127.0.0.1:4000/")));
        assert!(scope.contains(&url("http://127.0.0.1:4000/a.html?x=1")));
    }

    #[test]
    fn test_rejects_other_origins() {
        let scope = Scope::new("http://127.0.0.1:4000");
        assert!(!scope.contains(&url("https://127.0.0.1:4000/")));
        assert!(!scope.contains(&url("http://127.0.0.1:40001/")));
        assert!(!scope.contains(&url("http://example.com/")));
    }

    #[test]
    fn test_parse_normalizes_prefix() {
        let scope = Scope::parse("HTTP://127.0.0.1:4000").unwrap();
        assert_eq!(scope.prefix(), "http://127.0.0.1:4000/");
        assert!(scope.contains(&url("http://127.0.0.1:4000/a.html")));

        // default port is dropped by the serializer, on both sides
        let scope = Scope::parse("http://Docs.Local:80").unwrap();
        assert!(scope.contains(&url("http://docs.local/guide.html")));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Scope::parse("not a url").is_err());
    }

    #[test]
    fn test_path_prefix() {
        let scope = Scope::new("http://x/docs/");
        assert!(scope.contains(&url("http://x/docs/a.html")));
        assert!(!scope.contains(&url("http://x/blog/a.html")));
    }
}
