// src/checker/http.rs
// =============================================================================
// This module fetches pages over HTTP.
//
// Key functionality:
// - One GET per page, full body downloaded (we need it to find anchors)
// - Redirects are NOT followed: a 3xx is just another response
// - Per-request timeout; a timeout is reported like any other fetch failure
// - Transport errors are categorized into a small FetchError enum
//
// The crawler talks to the network through the PageSource trait, so tests can
// hand it an in-memory site instead of a real server.
//
// Rust concepts:
// - async fn in a trait: PageSource::get is awaited like any other async call
// - thiserror: #[error(...)] writes the Display impl for each variant
// =============================================================================

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// A response as the crawler sees it: status code plus raw body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Why a page could not be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Transport(String),
}

/// Something that can GET a page.
///
/// Implementations only fail for transport problems; an error status is
/// returned as a normal `FetchedPage` and classified by the crawler.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn get(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

/// PageSource backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("anchor-guardian/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    async fn get(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(categorize_error)?;

        debug!(%url, status, bytes = body.len(), "response received");
        Ok(FetchedPage {
            status,
            body: body.to_vec(),
        })
    }
}

// Categorizes reqwest errors
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - Connection refused / DNS failure
// - Body cut off mid-download
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Transport(error.to_string())
    }
}
