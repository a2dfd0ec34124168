//! Operational configuration for the retrieval pipeline.

use std::fs;

use log::error;
use serde::Deserialize;

use crate::errors::Error;

/// Knobs for the provider, retry schedule, and cache. Every field is
/// optional; unset fields use built-in defaults, and an absent config file
/// altogether is a valid setup.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Override for the provider base URL (useful for tests and proxies).
    pub base_url: Option<String>,

    /// User agent sent with every request.
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Client-side request budget per minute. Zero means default.
    pub max_requests_per_minute: Option<u32>,

    /// Additional attempts after a failed request.
    pub max_retries: Option<u32>,

    /// Delay before the first retry, in milliseconds.
    pub base_delay_ms: Option<u64>,

    /// Number of distinct queries the load cache keeps.
    pub cache_capacity: Option<usize>,
}

/// Reads and parses a TOML config file.
pub fn read_config(path: &str) -> Result<Config, Error> {
    let content = fs::read_to_string(path).map_err(|e| {
        error!("Failed to read config file {path}: {e}");
        Error::Config(format!("failed to read {path}: {e}"))
    })?;

    toml::from_str(&content).map_err(|e| {
        error!("Failed to parse config file {path}: {e}");
        Error::Config(format!("failed to parse {path}: {e}"))
    })
}
