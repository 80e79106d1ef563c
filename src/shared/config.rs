use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::Deserialize;

use crate::infra::github::DEFAULT_API_BASE_URL;

/// Top-level configuration for repodeck.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// GitHub account and API settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// GitHub account and API configuration.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GitHubConfig {
    /// Account whose repositories are listed. Overridden by REPODECK_ACCOUNT.
    #[serde(default)]
    pub account: Option<String>,

    /// REST API base URL (default: "https://api.github.com").
    #[serde(default = "default_api_base_url")]
    #[schemars(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Repositories per listed page (default: 6).
    #[serde(default = "default_per_page")]
    #[schemars(default = "default_per_page")]
    pub per_page: u32,

    /// Tag appended to the description of repositories created by repodeck
    /// (default: "[repodeck]").
    #[serde(default = "default_project_tag")]
    #[schemars(default = "default_project_tag")]
    pub project_tag: String,

    /// Description used when `create` is given none (default: empty).
    #[serde(default)]
    pub default_description: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            account: None,
            api_base_url: default_api_base_url(),
            per_page: default_per_page(),
            project_tag: default_project_tag(),
            default_description: String::new(),
        }
    }
}

/// HTTP transport configuration.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Request timeout in seconds. Unset means the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Output format for stderr logs ("text" or "json", default: "text").
    #[serde(default)]
    pub format: LogFormat,
}

/// Log output format.
#[derive(Debug, Default, Clone, Copy, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_per_page() -> u32 {
    6
}

fn default_project_tag() -> String {
    "[repodeck]".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file (permission error, etc.)
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parse error
    #[error("Invalid config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("github.per_page must be between 1 and 100, got {0}")]
    InvalidPerPage(u32),
}

/// Load configuration from ~/.config/repodeck/config.ya?ml.
/// Returns Config::default() if no config file exists.
pub fn load_config() -> anyhow::Result<Config> {
    let Some(dir) = super::dirs::app_config_dir() else {
        return Ok(Config::default());
    };
    load_config_from_dir(&dir)
}

/// Load configuration from a specific directory.
/// Searches for config.yaml, then config.yml in the given directory.
/// Returns Config::default() if neither file exists.
pub fn load_config_from_dir(dir: &Path) -> anyhow::Result<Config> {
    for filename in &["config.yaml", "config.yml"] {
        let path = dir.join(filename);
        match std::fs::read_to_string(&path) {
            Ok(content) => return parse_config(&content, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(ConfigError::ReadError { path, source: e }.into()),
        }
    }

    Ok(Config::default())
}

/// Parse YAML content into Config.
fn parse_config(content: &str, path: &Path) -> anyhow::Result<Config> {
    let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if !(1..=100).contains(&config.github.per_page) {
        return Err(ConfigError::InvalidPerPage(config.github.per_page).into());
    }

    Ok(config)
}

/// Generate JSON Schema for the Config struct.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}
