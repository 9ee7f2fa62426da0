// src/crawl/queue.rs
// =============================================================================
// This module runs the crawl: a breadth-first walk over the site that checks
// every page loads and every #fragment exists on its target page.
//
// How it works:
// 1. The seed URL goes into the frontier
// 2. A task is taken from the frontier head
// 3. Its page is fetched, unless some earlier task already fetched it
// 4. The page's anchor ids are cached and its links go back into the frontier
// 5. The task's #fragment is checked against the cached anchor ids
// 6. Repeat until the frontier is empty and nothing is in flight
//
// Concurrency:
// - One coordinating loop owns the frontier; up to `workers` tasks run at once
// - With workers = 1 (the default) fetches are strictly one after another
// - The page cache hands out one OnceCell per page, so a page is fetched once
//   even when two in-flight tasks point at it
//
// Rust concepts:
// - Generic struct Crawler<S: PageSource>: the fetcher is chosen at compile time
// - FuturesUnordered: a set of futures polled together, yielding as each finishes
// - OnceCell::get_or_init: the first caller runs the fetch, the rest await its result
// =============================================================================

use crate::checker::{
    analyze_page, decode_body, validate_fragment, FetchError, PageContent, PageSource,
};
use crate::error::Result;
use crate::report::{CrawlSummary, Diagnostic, Reporter};
use futures::stream::{FuturesUnordered, StreamExt};
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use url::Url;

use super::frontier::{Frontier, Task};
use super::pages::{PageCache, PageRecord};
use super::scope::Scope;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed: Url,
    pub scope: Scope,
    pub workers: usize,
}

impl CrawlConfig {
    /// Sequential crawl restricted to the seed's origin.
    pub fn new(seed: Url) -> Self {
        let scope = Scope::from_seed(&seed);
        Self {
            seed,
            scope,
            workers: 1,
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}

/// All mutable state of one crawl run. Owned by the caller and discarded
/// afterwards; nothing is persisted.
#[derive(Debug, Default)]
pub struct CrawlContext {
    pub frontier: Frontier,
    pub pages: PageCache,
}

impl CrawlContext {
    pub fn seeded(seed: &Url) -> Self {
        let mut ctx = Self::default();
        ctx.frontier.enqueue(seed.as_str(), "");
        ctx
    }
}

// What finishing one task produced: links to queue and things to report
struct TaskOutcome {
    page_url: Url,
    links: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

// What the first fetch of a page produced, besides its record
#[derive(Default)]
struct Discovery {
    links: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

pub struct Crawler<S> {
    source: S,
    config: CrawlConfig,
}

impl<S: PageSource> Crawler<S> {
    pub fn new(source: S, config: CrawlConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls from the configured seed with a fresh context.
    pub async fn crawl<W: Write>(&self, reporter: &mut Reporter<W>) -> Result<CrawlSummary> {
        let mut ctx = CrawlContext::seeded(&self.config.seed);
        self.run(&mut ctx, reporter).await
    }

    /// Drains `ctx.frontier`, streaming diagnostics to `reporter`.
    pub async fn run<W: Write>(
        &self,
        ctx: &mut CrawlContext,
        reporter: &mut Reporter<W>,
    ) -> Result<CrawlSummary> {
        info!(
            seed = %self.config.seed,
            scope = self.config.scope.prefix(),
            workers = self.config.workers,
            "starting crawl"
        );
        let start = Instant::now();

        let frontier = &mut ctx.frontier;
        let pages = &ctx.pages;
        let mut in_flight = FuturesUnordered::new();

        loop {
            // Top up the in-flight set from the frontier head
            while in_flight.len() < self.config.workers {
                let Some(task) = frontier.dequeue() else {
                    break;
                };
                in_flight.push(self.process(task, pages));
            }

            // Nothing in flight and nothing queued: the crawl is done
            let Some(outcome) = in_flight.next().await else {
                break;
            };

            // Only this loop touches the frontier and the reporter
            for diagnostic in &outcome.diagnostics {
                reporter.emit(diagnostic)?;
            }
            for href in &outcome.links {
                frontier.enqueue(outcome.page_url.as_str(), href);
            }
        }

        let summary = CrawlSummary::new(pages.len(), start.elapsed(), reporter.counts());
        info!(
            pages = summary.pages_visited,
            queued = frontier.visited_len(),
            elapsed_secs = summary.elapsed_secs,
            "crawl finished"
        );
        Ok(summary)
    }

    // Fetch-or-reuse the task's page, then validate its fragment
    async fn process(&self, task: Task, pages: &PageCache) -> TaskOutcome {
        let page_url = task.page_url();

        if !self.config.scope.contains(&page_url) {
            debug!(url = %page_url, "out of scope, skipping");
            return TaskOutcome {
                page_url,
                links: Vec::new(),
                diagnostics: Vec::new(),
            };
        }

        // Filled by load() only if this task is the one that fetches the page
        let mut discovery = Discovery::default();
        let slot = pages.slot(page_url.as_str());
        let record = {
            let discovery = &mut discovery;
            let (task, page_url) = (&task, &page_url);
            slot.get_or_init(|| async move {
                let (record, found) = self.load(task, page_url).await;
                *discovery = found;
                Arc::new(record)
            })
            .await
            .clone()
        };

        let Discovery {
            links,
            mut diagnostics,
        } = discovery;
        if let Some(diagnostic) = validate_fragment(&task, &record) {
            diagnostics.push(diagnostic);
        }

        TaskOutcome {
            page_url,
            links,
            diagnostics,
        }
    }

    // First and only fetch of a page
    async fn load(&self, task: &Task, page_url: &Url) -> (PageRecord, Discovery) {
        let mut found = Discovery::default();

        // Error statuses count as fetch failures, same as transport errors
        let fetched = match self.source.get(page_url).await {
            Ok(page) if page.status >= 400 => Err(FetchError::Status(page.status)),
            other => other,
        };
        let page = match fetched {
            Ok(page) => page,
            Err(err) => {
                debug!(url = %page_url, error = %err, "fetch failed");
                found.diagnostics.push(Diagnostic::FetchError {
                    url: page_url.to_string(),
                    linked_from: task.origin.clone(),
                    cause: err.to_string(),
                });
                return (PageRecord::failed(err.to_string()), found);
            }
        };

        // Invalid UTF-8 is replaced, not fatal; the page is still analyzed
        let (html, lossy) = decode_body(&page.body);
        if lossy {
            found.diagnostics.push(Diagnostic::UndecodableBody {
                url: page_url.to_string(),
            });
        }

        match analyze_page(&html) {
            // Links on a redirect page are not followed
            PageContent::Redirect { destination } => {
                found.diagnostics.push(Diagnostic::RedirectPage {
                    url: page_url.to_string(),
                    destination: destination.clone(),
                    linked_from: task.origin.clone(),
                });
                (PageRecord::redirected(destination), found)
            }
            PageContent::Document { anchors, links } => {
                debug!(url = %page_url, anchors = anchors.len(), links = links.len(), "page analyzed");
                found.links = links;
                (PageRecord::loaded(anchors), found)
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is FuturesUnordered?
//    - A set of futures polled together; next() yields whichever finishes first
//    - We keep at most `workers` futures in it, which bounds concurrency
//    - Nothing is spawned, so the futures can borrow `self` and the page cache
//
// 2. Why split `ctx` into `frontier` and `pages` first?
//    - The in-flight futures borrow `pages` for as long as they run
//    - The loop still needs to mutate `frontier` at the same time
//    - Borrowing two different fields separately is allowed; borrowing all of
//      `ctx` twice is not
//
// 3. What does OnceCell::get_or_init do?
//    - The first caller runs the init future and stores its value
//    - Callers arriving while it runs wait for that value
//    - Everyone after that gets the stored value immediately
// -----------------------------------------------------------------------------
