use crate::config::source::{ConfigSource, FileSource};
use crate::config::types::{
    ConversionParams, GistConfig, RunConfig, ScheduleConfig, GIST_ID_SENTINEL,
    GIST_TOKEN_SENTINEL,
};
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SOURCE_FILE: &str = "/app/links.txt";
pub const DEFAULT_BASE_URL: &str = "https://sub.dsdog.tk/sub";
pub const DEFAULT_GIST_FILENAME: &str = "merged_sub.txt";
pub const DEFAULT_GIST_API_URL: &str = "https://api.github.com";
pub const DEFAULT_WEB_PORT: u16 = 8080;

/// Conversion parameters: (query key, config key, default value)
const PARAM_KEYS: [(&str, &str, &str); 7] = [
    ("target", "PARAMS_TARGET", "clash"),
    (
        "exclude",
        "PARAMS_EXCLUDE",
        "剩余|订阅|好友|线路|套餐|官网|机场|过期|去除|地址|群|通知|限制",
    ),
    ("emoji", "PARAMS_EMOJI", "true"),
    ("udp", "PARAMS_UDP", "true"),
    ("sort", "PARAMS_SORT", "false"),
    ("scv", "PARAMS_SCV", "false"),
    ("list", "PARAMS_LIST", "true"),
];

/// A setting that could not be parsed and fell back to its default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: &'static str,
    pub value: String,
    pub default: String,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid value '{}' for {}, using default {}",
            self.value, self.key, self.default
        )
    }
}

/// Result of resolving a configuration snapshot
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: RunConfig,
    pub warnings: Vec<ConfigWarning>,
}

/// Builds a [`RunConfig`] from a source, substituting defaults for absent keys
///
/// Never fails: malformed integers are replaced by their default and reported
/// in [`ResolvedConfig::warnings`].
///
/// # Example
///
/// ```
/// use subgist::config::{resolve_config, MapSource};
///
/// let source = MapSource::new().with("WEB_PORT", "9000");
/// let resolved = resolve_config(&source);
/// assert_eq!(resolved.config.schedule.web_port, 9000);
/// ```
pub fn resolve_config(source: &dyn ConfigSource) -> ResolvedConfig {
    let mut warnings = Vec::new();
    let get = |key: &str, default: &str| source.get(key).unwrap_or_else(|| default.to_string());

    let remote_source_url = source
        .get("REMOTE_SOURCE_URL")
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let cron = source
        .get("CRON_SCHEDULE")
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let mut params = ConversionParams::new();
    for (name, key, default) in PARAM_KEYS {
        params.set(name, get(key, default));
    }

    let interval_secs: u64 = parse_number(source, "RUN_INTERVAL_SECONDS", 0, &mut warnings);
    let web_port: u16 = parse_number(source, "WEB_PORT", DEFAULT_WEB_PORT, &mut warnings);

    let config = RunConfig {
        source_file: PathBuf::from(get("SOURCE_FILE", DEFAULT_SOURCE_FILE)),
        remote_source_url,
        base_url: get("BASE_URL", DEFAULT_BASE_URL),
        gist: GistConfig {
            id: get("GIST_ID", GIST_ID_SENTINEL),
            token: get("GIST_TOKEN", GIST_TOKEN_SENTINEL),
            filename: get("GIST_FILENAME", DEFAULT_GIST_FILENAME),
            api_url: get("GIST_API_URL", DEFAULT_GIST_API_URL),
        },
        params,
        schedule: ScheduleConfig {
            interval: (interval_secs > 0).then(|| Duration::from_secs(interval_secs)),
            cron,
            web_port,
        },
    };

    ResolvedConfig { config, warnings }
}

fn parse_number<T>(
    source: &dyn ConfigSource,
    key: &'static str,
    default: T,
    warnings: &mut Vec<ConfigWarning>,
) -> T
where
    T: std::str::FromStr + ToString,
{
    let Some(raw) = source.get(key) else {
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warnings.push(ConfigWarning {
                key,
                value: raw,
                default: default.to_string(),
            });
            default
        }
    }
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so operators can tell which file revision a process
/// was started with.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a TOML config file and returns both the source and its hash
pub fn load_config_file_with_hash(path: &Path) -> Result<(FileSource, String), ConfigError> {
    let source = FileSource::load(path)?;
    let hash = compute_config_hash(path)?;
    Ok((source, hash))
}
