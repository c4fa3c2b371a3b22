//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the Matrix login, the feed registry, dedup and directory settings.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::domain::types::Feed;
use crate::strings::logs;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    pub feeds: FeedsConfig,
    #[serde(default)]
    pub dedup: DedupConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

impl AppConfig {
    /// Reads and parses a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("{} ({})", logs::CONFIG_READ_ERROR, path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context(logs::CONFIG_PARSE_ERROR)
    }
}

/// Configuration for various connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Where and how often feeds are polled, plus the feed registry itself.
#[derive(Debug, Deserialize, Clone)]
pub struct FeedsConfig {
    /// URL template; `{feed}` is replaced by the feed id.
    pub source_url: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_retry_interval")]
    pub retry_interval_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub list: Vec<Feed>,
}

impl FeedsConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_poll_interval() -> u64 {
    60
}
fn default_retry_interval() -> u64 {
    15
}
fn default_request_timeout() -> u64 {
    10
}

/// Seen-item history. `capacity: 0` keeps every id for the process lifetime.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct DedupConfig {
    #[serde(default)]
    pub capacity: usize,
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryBackend {
    #[default]
    File,
    Redis,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub backend: DirectoryBackend,
    #[serde(default = "default_directory_path")]
    pub path: String,
    #[serde(default)]
    pub redis_url: Option<String>,
    #[serde(default = "default_redis_key")]
    pub redis_key: String,
    /// How long `list_groups` results are memoised. 0 disables the cache.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            backend: DirectoryBackend::default(),
            path: default_directory_path(),
            redis_url: None,
            redis_key: default_redis_key(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_directory_path() -> String {
    "data/servers.json".to_string()
}
fn default_redis_key() -> String {
    "feedcast:groups".to_string()
}
fn default_cache_ttl() -> u64 {
    300
}

/// System-level settings for the bot.
#[derive(Debug, Deserialize, Clone)]
pub struct SystemConfig {
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
        }
    }
}

fn default_log_dir() -> String {
    "data".to_string()
}
