//! Configuration sources
//!
//! A source answers "what is the raw value of this key", nothing more.
//! Defaults and integer parsing live in the resolver.

use crate::ConfigError;
use std::collections::HashMap;
use std::path::Path;

/// Capability for looking up raw configuration values by key
pub trait ConfigSource: Send + Sync {
    /// Returns the raw value for `key`, or `None` when the key is absent
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads values from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory key/value source
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Flat TOML file using the environment variable names as keys
///
/// ```toml
/// SOURCE_FILE = "/app/links.txt"
/// RUN_INTERVAL_SECONDS = 3600
/// PARAMS_EMOJI = true
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    values: MapSource,
}

impl FileSource {
    /// Parses a flat TOML document
    ///
    /// Strings, integers and booleans are accepted; any other value type is
    /// rejected so that typos surface instead of being ignored.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(content)?;
        let mut values = MapSource::new();

        for (key, value) in table {
            let raw = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                _ => return Err(ConfigError::UnsupportedValue { key }),
            };
            values.insert(key, raw);
        }

        Ok(Self { values })
    }

    /// Reads and parses a TOML file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}

impl ConfigSource for FileSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key)
    }
}

/// Stack of sources; the first one holding a key wins
#[derive(Default)]
pub struct Layered {
    layers: Vec<Box<dyn ConfigSource>>,
}

impl Layered {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer with lower precedence than the existing ones
    pub fn push(mut self, source: impl ConfigSource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }
}

impl ConfigSource for Layered {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }
}
