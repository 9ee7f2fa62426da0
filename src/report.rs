// src/report.rs
// =============================================================================
// The reporter: streams diagnostics as they happen and prints the summary.
//
// Two output formats:
// - Text: one human-readable line per diagnostic, colored by severity
// - Json: one JSON object per line (easy to pipe into jq or a CI step)
//
// Diagnostics are written immediately, never buffered until the end, so a long
// crawl shows problems as soon as they are found.
// =============================================================================

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One finding produced during the crawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The page could not be loaded (transport failure or HTTP >= 400).
    FetchError {
        url: String,
        linked_from: String,
        cause: String,
    },
    /// The page is a meta-refresh redirect; its links were not followed.
    RedirectPage {
        url: String,
        destination: String,
        linked_from: String,
    },
    /// The page loaded but has no anchor with this id.
    BrokenAnchor {
        fragment: String,
        url: String,
        linked_from: String,
    },
    /// The body was not valid UTF-8 and was decoded lossily.
    UndecodableBody { url: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::FetchError { .. } | Diagnostic::BrokenAnchor { .. } => Severity::Error,
            Diagnostic::UndecodableBody { .. } => Severity::Warning,
            Diagnostic::RedirectPage { .. } => Severity::Info,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Diagnostic::FetchError {
                url,
                linked_from,
                cause,
            } => format!("Error loading {} linked in {} : {}", url, linked_from, cause),
            Diagnostic::RedirectPage {
                url,
                destination,
                linked_from,
            } => format!(
                "The url {} is a redirection to {} linked in {}",
                url, destination, linked_from
            ),
            Diagnostic::BrokenAnchor {
                fragment,
                url,
                linked_from,
            } => format!("Can't find #{} in {} linked in {}", fragment, url, linked_from),
            Diagnostic::UndecodableBody { url } => {
                format!("Binary or malformed body at {}, decoded lossily", url)
            }
        }
    }
}

/// Totals for a finished crawl.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlSummary {
    pub pages_visited: usize,
    pub elapsed_secs: f64,
    pub errors: usize,
    pub warnings: usize,
    pub notices: usize,
}

impl CrawlSummary {
    pub fn new(pages_visited: usize, elapsed: Duration, counts: Counts) -> Self {
        Self {
            pages_visited,
            elapsed_secs: elapsed.as_secs_f64(),
            errors: counts.errors,
            warnings: counts.warnings,
            notices: counts.notices,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub errors: usize,
    pub warnings: usize,
    pub notices: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
    counts: Counts,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            counts: Counts::default(),
        }
    }

    pub fn announce(&mut self, seed: &str) -> io::Result<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.out, "Loading {}...", seed)?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        let severity = diagnostic.severity();
        match severity {
            Severity::Error => self.counts.errors += 1,
            Severity::Warning => self.counts.warnings += 1,
            Severity::Info => self.counts.notices += 1,
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, diagnostic)?;
                writeln!(self.out)?;
            }
            OutputFormat::Text => {
                let line = diagnostic.message();
                let line = match severity {
                    Severity::Error => format!("[error] {}", line).red(),
                    Severity::Warning => format!("[warn] {}", line).yellow(),
                    Severity::Info => format!("[info] {}", line).blue(),
                };
                writeln!(self.out, "{}", line)?;
            }
        }
        self.out.flush()
    }

    pub fn summary(&mut self, summary: &CrawlSummary) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let line = serde_json::json!({ "kind": "summary", "summary": summary });
                serde_json::to_writer(&mut self.out, &line)?;
                writeln!(self.out)?;
            }
            OutputFormat::Text => {
                writeln!(
                    self.out,
                    "Done. Visited {} links in {:.3} seconds ({} errors, {} warnings)",
                    summary.pages_visited, summary.elapsed_secs, summary.errors, summary.warnings
                )?;
            }
        }
        self.out.flush()
    }

    pub fn counts(&self) -> Counts {
        self.counts
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
