//! Conversion pipeline
//!
//! This module turns a link list into the merged subscription document:
//! - Percent-encoding and joining the links
//! - Building the conversion-service request URL
//! - Executing the request and classifying failures
//!
//! Each step can fail on its own; the first failure ends the pipeline and no
//! retries are attempted within a run.

mod encode;
mod fetcher;

pub use encode::{build_query, build_request_url, encode_links, LINK_SEPARATOR};
pub use fetcher::{
    build_http_client, build_http_client_with_timeout, fetch_text, FetchResult, CONNECT_TIMEOUT, FETCH_TIMEOUT, USER_AGENT,
};

use crate::config::RunConfig;
use crate::links::LinkList;
use crate::run::RunLog;
use crate::ConvertError;
use reqwest::Client;

/// Requests the merged document for `links` from the conversion service
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `config` - Run configuration (base URL and conversion parameters)
/// * `links` - Non-empty link list
/// * `log` - Sink for this run's messages
///
/// # Returns
///
/// * `Ok(String)` - The merged document, returned as-is
/// * `Err(ConvertError)` - Request building or fetching failed
pub async fn convert(
    client: &Client,
    config: &RunConfig,
    links: &LinkList,
    log: &RunLog,
) -> Result<String, ConvertError> {
    let url = build_request_url(&config.base_url, &config.params, links)?;
    tracing::debug!("Conversion request: {}", url);
    log.info(format!(
        "Requesting conversion of {} links from {}",
        links.len(),
        config.base_url
    ));

    let document = match fetch_text(client, &url).await {
        FetchResult::Success { body, .. } => body,
        FetchResult::HttpError { status_code } => {
            return Err(ConvertError::Status {
                status: status_code,
            })
        }
        FetchResult::Timeout { error } => return Err(ConvertError::Timeout(error)),
        FetchResult::NetworkError { error } => return Err(ConvertError::Transport(error)),
    };

    log.info(format!("Received merged document ({} bytes)", document.len()));
    Ok(document)
}
