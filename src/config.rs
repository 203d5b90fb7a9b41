//! Application configuration loaded from TOML.
//!
//! ```toml
//! [elasticsearch]
//! host = "http://localhost:9200"
//! index = "bittorrent_metadata"
//! timeout_secs = 10
//!
//! [pagination]
//! page_size = 15
//!
//! [logging]
//! level = "info"
//! format = "compact"   # or "json"
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.

use crate::context::SearchSettings;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TORRENT_SEARCH_CONFIG";

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR_NAME: &str = "torrent-search";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub elasticsearch: ElasticsearchConfig,
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticsearchConfig {
    /// Store endpoint, e.g. `http://localhost:9200`
    pub host: String,
    pub index: String,
    pub timeout_secs: u64,
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:9200".to_string(),
            index: "bittorrent_metadata".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ElasticsearchConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { page_size: 15 }
    }
}

/// Log line format.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive; `RUST_LOG` takes precedence
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl AppConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Find and load the configuration file.
    ///
    /// An explicit path must exist. Otherwise the first existing file from
    /// [`candidate_paths`] is used, and defaults apply when there is none.
    /// Returns the path that was loaded, if any.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load_from(path)?, Some(path.to_path_buf())));
        }

        match candidate_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Ok((Self::load_from(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Reject values the translator cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.pagination.page_size == 0 {
            bail!("pagination.page_size must be at least 1");
        }
        if self.elasticsearch.index.trim().is_empty() {
            bail!("elasticsearch.index must not be empty");
        }
        if self.elasticsearch.timeout_secs == 0 {
            bail!("elasticsearch.timeout_secs must be at least 1");
        }
        url::Url::parse(&self.elasticsearch.host).with_context(|| {
            format!("elasticsearch.host '{}' is not a valid URL", self.elasticsearch.host)
        })?;
        Ok(())
    }

    /// Plain values handed to the search context.
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            index: self.elasticsearch.index.clone(),
            page_size: self.pagination.page_size,
            timeout: self.elasticsearch.timeout(),
        }
    }
}

/// Config file locations searched when no explicit path is given, in order.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from(CONFIG_FILE_NAME),
        Path::new("config").join(CONFIG_FILE_NAME),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    paths
}
