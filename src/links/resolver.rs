//! Link source resolution
//!
//! The resolver walks a small state machine:
//!
//! ```text
//! RemoteAttempt ──(error / non-2xx / empty list)──▶ LocalAttempt ──(empty)──▶ NoLinks
//!       │                                               │
//!       └──(links)──▶ done                              ├──(links)──▶ done
//!                                                       └──(missing / unreadable)──▶ source error
//! ```
//!
//! `RemoteAttempt` is only entered when a remote URL is configured. An
//! unreachable remote source never fails the run by itself.

use crate::config::RunConfig;
use crate::convert::{fetch_text, FetchResult};
use crate::links::{LinkList, LinkOrigin};
use crate::run::RunLog;
use crate::SourceError;
use reqwest::Client;
use std::path::Path;

/// Resolver state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveState {
    /// Fetch the list from this URL
    RemoteAttempt(String),
    /// Read the configured local file
    LocalAttempt,
    /// Both sources came up empty
    NoLinks,
}

impl ResolveState {
    /// Entry state for a configuration
    pub fn initial(config: &RunConfig) -> Self {
        match &config.remote_source_url {
            Some(url) => ResolveState::RemoteAttempt(url.clone()),
            None => ResolveState::LocalAttempt,
        }
    }
}

/// A non-empty link list and the source that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLinks {
    pub links: LinkList,
    pub origin: LinkOrigin,
}

/// Resolves the link list for a run
///
/// # Returns
///
/// * `Ok(ResolvedLinks)` - A non-empty list from the remote or local source
/// * `Err(SourceError::NotFound | SourceError::Io)` - The local file could not be read
/// * `Err(SourceError::NoLinks)` - Every source was reachable but empty
pub async fn resolve_links(
    client: &Client,
    config: &RunConfig,
    log: &RunLog,
) -> Result<ResolvedLinks, SourceError> {
    let mut state = ResolveState::initial(config);

    loop {
        state = match state {
            ResolveState::RemoteAttempt(url) => match fetch_remote(client, &url).await {
                Ok(links) if !links.is_empty() => {
                    log.info(format!("Loaded {} links from {}", links.len(), url));
                    return Ok(ResolvedLinks {
                        links,
                        origin: LinkOrigin::Remote,
                    });
                }
                Ok(_) => {
                    log.warn(format!(
                        "Remote source {} has no links, falling back to local file",
                        url
                    ));
                    ResolveState::LocalAttempt
                }
                Err(e) => {
                    log.warn(format!("{}, falling back to local file", e));
                    ResolveState::LocalAttempt
                }
            },
            ResolveState::LocalAttempt => match read_local(&config.source_file).await {
                Ok(links) if !links.is_empty() => {
                    log.info(format!(
                        "Loaded {} links from {}",
                        links.len(),
                        config.source_file.display()
                    ));
                    return Ok(ResolvedLinks {
                        links,
                        origin: LinkOrigin::Local,
                    });
                }
                Ok(_) => {
                    log.warn(format!(
                        "警告：源文件为空: {}",
                        config.source_file.display()
                    ));
                    ResolveState::NoLinks
                }
                Err(e) => {
                    log.warn(e.to_string());
                    return Err(e);
                }
            },
            ResolveState::NoLinks => return Err(SourceError::NoLinks),
        };
    }
}

/// Fetches and parses the remote link list
async fn fetch_remote(client: &Client, url: &str) -> Result<LinkList, SourceError> {
    let remote_error = |message: String| SourceError::Remote {
        url: url.to_string(),
        message,
    };

    match fetch_text(client, url).await {
        FetchResult::Success { body, .. } => Ok(LinkList::parse(&body)),
        FetchResult::HttpError { status_code } => {
            Err(remote_error(format!("HTTP status {}", status_code)))
        }
        FetchResult::Timeout { error } => Err(remote_error(format!("timed out: {}", error))),
        FetchResult::NetworkError { error } => Err(remote_error(error)),
    }
}

/// Reads and parses the local link file
pub async fn read_local(path: &Path) -> Result<LinkList, SourceError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(LinkList::parse(&content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SourceError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(SourceError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
