//! Publisher for the merged document
//!
//! Pushes the document to a Gist when credentials are configured and skips
//! quietly when they are still the placeholder values.

mod gist;

pub use gist::{update_gist, GistFile, GistUpdate, PUBLISH_TIMEOUT, UNKNOWN_GIST_URL};

use crate::config::GistConfig;
use crate::run::RunLog;
use crate::PublishError;
use reqwest::Client;
use std::time::Duration;

/// What the publish step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Credentials not configured; nothing was sent
    Skipped,
    /// The Gist was updated
    Published { html_url: String },
}

/// Publishes `document` to the configured Gist
///
/// A missing configuration is not an error: the step reports
/// [`PublishOutcome::Skipped`].
pub async fn publish(
    client: &Client,
    gist: &GistConfig,
    document: &str,
    timeout: Duration,
    log: &RunLog,
) -> Result<PublishOutcome, PublishError> {
    if !gist.is_configured() {
        log.info("Gist credentials not configured, skipping upload");
        return Ok(PublishOutcome::Skipped);
    }

    log.info(format!("Uploading {} to gist {}", gist.filename, gist.id));
    let html_url = update_gist(client, gist, document, timeout).await?;
    log.info(format!("成功更新Gist：{}", html_url));

    Ok(PublishOutcome::Published { html_url })
}
