use std::path::PathBuf;
use std::time::Duration;

/// Placeholder Gist id meaning "not configured"
pub const GIST_ID_SENTINEL: &str = "YOUR_GIST_ID";

/// Placeholder Gist token meaning "not configured"
pub const GIST_TOKEN_SENTINEL: &str = "YOUR_GITHUB_TOKEN";

/// Immutable configuration snapshot for a single run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Local file holding one link per line
    pub source_file: PathBuf,

    /// Remote URL serving the link list; `None` disables the remote path
    pub remote_source_url: Option<String>,

    /// Conversion service endpoint
    pub base_url: String,

    /// Paste store identity
    pub gist: GistConfig,

    /// Query parameters forwarded to the conversion service
    pub params: ConversionParams,

    /// Scheduling knobs read by the process shell
    pub schedule: ScheduleConfig,
}

/// Gist identity and credentials
#[derive(Debug, Clone)]
pub struct GistConfig {
    /// Gist id
    pub id: String,

    /// Personal access token with gist scope
    pub token: String,

    /// File name inside the Gist that receives the document
    pub filename: String,

    /// API root, e.g. `https://api.github.com`
    pub api_url: String,
}

impl GistConfig {
    /// Returns true when both id and token hold real values
    pub fn is_configured(&self) -> bool {
        !self.id.is_empty()
            && !self.token.is_empty()
            && self.id != GIST_ID_SENTINEL
            && self.token != GIST_TOKEN_SENTINEL
    }

    /// Endpoint addressing this Gist
    pub fn endpoint(&self) -> String {
        format!("{}/gists/{}", self.api_url.trim_end_matches('/'), self.id)
    }
}

/// Ordered conversion-service query parameters
///
/// Order is preserved so the generated query string is stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionParams {
    pairs: Vec<(String, String)>,
}

impl ConversionParams {
    /// Creates an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing an existing value in place
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Looks up a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Process-level scheduling settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Fixed delay between runs; `None` means run once
    pub interval: Option<Duration>,

    /// Cron expression for background runs in server mode
    pub cron: Option<String>,

    /// Port for the HTTP trigger
    pub web_port: u16,
}
