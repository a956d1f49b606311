//! Configuration module for Subgist
//!
//! Settings are looked up by key through a [`ConfigSource`] (environment,
//! TOML file, or an in-memory map) and resolved into an immutable
//! [`RunConfig`] snapshot, with defaults substituted for absent keys.
//!
//! # Example
//!
//! ```no_run
//! use subgist::config::{resolve_config, EnvSource};
//!
//! let resolved = resolve_config(&EnvSource);
//! println!("Reading links from: {}", resolved.config.source_file.display());
//! ```

mod parser;
mod source;
mod types;

// Re-export types
pub use types::{
    ConversionParams, GistConfig, RunConfig, ScheduleConfig, GIST_ID_SENTINEL,
    GIST_TOKEN_SENTINEL,
};

// Re-export sources
pub use source::{ConfigSource, EnvSource, FileSource, Layered, MapSource};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config_file_with_hash, resolve_config, ConfigWarning,
    ResolvedConfig, DEFAULT_BASE_URL, DEFAULT_GIST_API_URL, DEFAULT_SOURCE_FILE,
    DEFAULT_WEB_PORT,
};
