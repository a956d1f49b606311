//! Run orchestration
//!
//! One run = resolve config → resolve links → convert → publish. Steps run
//! strictly in order and the first failure ends the run. Nothing escapes
//! [`Orchestrator::run`]: every failure becomes a [`RunOutcome`].

use crate::config::{resolve_config, ConfigSource, ResolvedConfig, RunConfig};
use crate::convert::{build_http_client, convert};
use crate::links::{resolve_links, LinkOrigin};
use crate::publish::{publish, PublishOutcome, PUBLISH_TIMEOUT};
use crate::run::RunLog;
use crate::SubgistError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;

/// Result of one run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Whether every attempted step succeeded
    pub success: bool,

    /// Human-readable summary
    pub message: String,

    /// Merged document, when the conversion step got that far
    pub document: Option<String>,

    /// Source that supplied the links
    pub origin: Option<LinkOrigin>,

    /// Number of links sent for conversion
    pub link_count: usize,

    /// Captured log text of this run
    pub log: String,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Progress of a run, filled in step by step
#[derive(Debug, Default)]
struct Progress {
    origin: Option<LinkOrigin>,
    link_count: usize,
    document: Option<String>,
}

/// Executes runs against a configuration source
///
/// The source is re-read at the start of every run; the orchestrator holds
/// no other state, so concurrent runs are independent.
pub struct Orchestrator {
    source: Box<dyn ConfigSource>,
    client: Client,
    publish_timeout: Duration,
}

impl Orchestrator {
    /// Creates an orchestrator with its own HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(source: impl ConfigSource + 'static) -> Result<Self, SubgistError> {
        Ok(Self::with_client(source, build_http_client()?))
    }

    /// Creates an orchestrator sharing an existing client
    pub fn with_client(source: impl ConfigSource + 'static, client: Client) -> Self {
        Self {
            source: Box::new(source),
            client,
            publish_timeout: PUBLISH_TIMEOUT,
        }
    }

    /// Overrides the Gist upload timeout
    pub fn with_publish_timeout(mut self, timeout: Duration) -> Self {
        self.publish_timeout = timeout;
        self
    }

    /// Resolves a fresh configuration snapshot
    pub fn resolve_config(&self) -> ResolvedConfig {
        resolve_config(&*self.source)
    }

    /// Performs one complete run
    pub async fn run(&self) -> RunOutcome {
        let started_at = Utc::now();
        let log = RunLog::new();
        log.info("Starting run");

        let resolved = self.resolve_config();
        for warning in &resolved.warnings {
            log.warn(warning.to_string());
        }

        let mut progress = Progress::default();
        let result = self.execute(&resolved.config, &log, &mut progress).await;

        let (success, message) = match result {
            Ok(message) => {
                log.info(format!("Run finished: {}", message));
                (true, message)
            }
            Err(e) => {
                let message = e.to_string();
                log.error(format!("Run failed: {}", message));
                (false, message)
            }
        };

        RunOutcome {
            success,
            message,
            document: progress.document,
            origin: progress.origin,
            link_count: progress.link_count,
            log: log.text(),
            started_at,
            finished_at: Utc::now(),
        }
    }

    async fn execute(
        &self,
        config: &RunConfig,
        log: &RunLog,
        progress: &mut Progress,
    ) -> Result<String, SubgistError> {
        let resolved = resolve_links(&self.client, config, log).await?;
        progress.origin = Some(resolved.origin);
        progress.link_count = resolved.links.len();

        let document = convert(&self.client, config, &resolved.links, log).await?;
        let publish_result = publish(
            &self.client,
            &config.gist,
            &document,
            self.publish_timeout,
            log,
        )
        .await;
        progress.document = Some(document);

        let message = match publish_result? {
            PublishOutcome::Published { html_url } => format!(
                "Merged {} {} links and updated gist: {}",
                resolved.links.len(),
                resolved.origin,
                html_url
            ),
            PublishOutcome::Skipped => format!(
                "Merged {} {} links; gist upload skipped (not configured)",
                resolved.links.len(),
                resolved.origin
            ),
        };

        Ok(message)
    }
}
