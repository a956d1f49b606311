//! HTTP fetcher implementation
//!
//! This module handles the plain GET requests of a run:
//! - Building the shared HTTP client with the run timeouts
//! - Fetching the remote link list and the converted document
//! - Classifying failures (timeout, transport error, non-2xx status)

use reqwest::Client;
use std::time::Duration;

/// Connect timeout for every outbound request
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Overall timeout for source and conversion fetches
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// 2xx response with its body
    Success {
        /// HTTP status code
        status_code: u16,
        /// Response body
        body: String,
    },

    /// Non-2xx response
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// The request did not finish within the timeout
    Timeout {
        /// Error description
        error: String,
    },

    /// Connection refused, DNS failure, broken body, etc.
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client shared by all steps of a run
///
/// The connect timeout applies to every request; the overall timeout is the
/// fetch timeout and individual requests may shorten it.
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client (TLS backend init)
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    build_http_client_with_timeout(FETCH_TIMEOUT)
}

/// Like [`build_http_client`] with a custom overall request timeout
pub fn build_http_client_with_timeout(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a GET request and reads the body as text
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// A FetchResult indicating success or the type of failure
pub async fn fetch_text(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            status_code: status.as_u16(),
            body,
        },
        Err(e) => classify_error(e),
    }
}

fn classify_error(e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::Timeout {
            error: e.to_string(),
        }
    } else {
        FetchResult::NetworkError {
            error: e.to_string(),
        }
    }
}
