//! Subgist: a subscription merger and paste-store publisher
//!
//! This crate collects subscription links from a remote URL or a local file,
//! hands them to a subscription-conversion service to be merged into one
//! document, and publishes that document to a Gist.

pub mod config;
pub mod convert;
pub mod links;
pub mod publish;
pub mod run;
pub mod schedule;
pub mod server;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Subgist operations
#[derive(Debug, Error)]
pub enum SubgistError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Link source error: {0}")]
    Source(#[from] SourceError),

    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unsupported value for {key}: expected a string, integer or boolean")]
    UnsupportedValue { key: String },
}

/// Errors raised while acquiring the link list
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read source file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("remote source {url} unavailable: {message}")]
    Remote { url: String, message: String },

    #[error("no subscription links available")]
    NoLinks,
}

/// Errors raised while building or executing the conversion request
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("构建请求URL失败: invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("请求超时: conversion request timed out: {0}")]
    Timeout(String),

    #[error("获取订阅失败: {0}")]
    Transport(String),

    #[error("获取订阅失败: conversion service returned HTTP {status}")]
    Status { status: u16 },
}

/// Errors raised while publishing the merged document
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Gist上传超时: {0}")]
    Timeout(String),

    #[error("Gist更新失败: {0}")]
    Transport(String),

    #[error("Gist更新失败: paste store returned HTTP {status}")]
    Status { status: u16 },

    #[error("Gist更新失败: invalid response payload: {0}")]
    Decode(String),
}

/// Errors raised while setting up a scheduling mode
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid cron expression '{expr}': {message}")]
    InvalidCron { expr: String, message: String },
}

/// Result type alias for Subgist operations
pub type Result<T> = std::result::Result<T, SubgistError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{ConfigSource, EnvSource, RunConfig};
pub use links::{LinkList, LinkOrigin};
pub use run::{Orchestrator, RunLog, RunOutcome};
pub use server::Server;
