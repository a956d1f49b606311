use crate::config::GistConfig;
use crate::PublishError;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Overall timeout for the Gist update call
pub const PUBLISH_TIMEOUT: Duration = Duration::from_secs(10);

/// Reported when the update response carries no `html_url`
pub const UNKNOWN_GIST_URL: &str = "(unknown gist url)";

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Body of a Gist update: `{"files": {"<name>": {"content": "..."}}}`
#[derive(Debug, Serialize)]
pub struct GistUpdate<'a> {
    pub files: BTreeMap<&'a str, GistFile<'a>>,
}

#[derive(Debug, Serialize)]
pub struct GistFile<'a> {
    pub content: &'a str,
}

impl<'a> GistUpdate<'a> {
    /// Update replacing a single file's content
    pub fn single(filename: &'a str, content: &'a str) -> Self {
        let mut files = BTreeMap::new();
        files.insert(filename, GistFile { content });
        Self { files }
    }
}

#[derive(Debug, Deserialize)]
struct GistResponse {
    html_url: Option<String>,
}

/// Replaces the configured file of the Gist with `document`
///
/// `timeout` bounds the whole call, normally [`PUBLISH_TIMEOUT`].
///
/// # Returns
///
/// * `Ok(String)` - The Gist's `html_url`, or [`UNKNOWN_GIST_URL`]
/// * `Err(PublishError)` - Timeout, transport failure, non-2xx status or unreadable payload
pub async fn update_gist(
    client: &Client,
    gist: &GistConfig,
    document: &str,
    timeout: Duration,
) -> Result<String, PublishError> {
    let response = client
        .patch(gist.endpoint())
        .header(AUTHORIZATION, format!("token {}", gist.token))
        .header(ACCEPT, GITHUB_ACCEPT)
        .timeout(timeout)
        .json(&GistUpdate::single(&gist.filename, document))
        .send()
        .await
        .map_err(classify_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(PublishError::Status {
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(classify_error)?;
    let payload: GistResponse =
        serde_json::from_str(&body).map_err(|e| PublishError::Decode(e.to_string()))?;

    Ok(payload
        .html_url
        .unwrap_or_else(|| UNKNOWN_GIST_URL.to_string()))
}

fn classify_error(e: reqwest::Error) -> PublishError {
    if e.is_timeout() {
        PublishError::Timeout(e.to_string())
    } else {
        PublishError::Transport(e.to_string())
    }
}
