//! Configuration for tcgend.
//!
//! Loads settings from /etc/tcgen/config.toml (overridable via the
//! TCGEND_CONFIG environment variable) or uses defaults. The model
//! credential is never stored in the file by convention; it comes from
//! the GEMINI_API_KEY environment variable, which always wins.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Default config file path
pub const CONFIG_PATH: &str = "/etc/tcgen/config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bind address for the HTTP server
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Gemini model used for generation
    #[serde(default = "default_model")]
    pub model: String,

    /// Model API key; normally supplied via GEMINI_API_KEY
    #[serde(default)]
    pub api_key: Option<String>,

    /// Outbound model-call timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Attempts per model call (first try included)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between overload retries, in seconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,

    /// Upper bound for an upload request body, in bytes
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
}

fn default_bind_addr() -> String {
    "127.0.0.1:7878".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_request_timeout() -> u64 {
    120
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    5
}

fn default_max_upload() -> usize {
    // Planning PDFs plus one prior workbook.
    32 * 1024 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            model: default_model(),
            api_key: None,
            request_timeout_secs: default_request_timeout(),
            max_attempts: default_max_attempts(),
            retry_delay_secs: default_retry_delay(),
            max_upload_bytes: default_max_upload(),
        }
    }
}

/// Load configuration from disk, falling back to defaults, then apply
/// the environment credential override.
pub fn load() -> Result<Config> {
    let path = std::env::var("TCGEND_CONFIG").unwrap_or_else(|_| CONFIG_PATH.to_string());

    let mut config = if Path::new(&path).exists() {
        let raw = fs::read_to_string(&path)?;
        toml::from_str(&raw)?
    } else {
        info!("No config at {}, using defaults", path);
        Config::default()
    };

    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            config.api_key = Some(key);
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_retry_policy() {
        let config = Config::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_delay_secs, 5);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str("model = \"gemini-1.5-pro\"").unwrap();
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.bind_addr, default_bind_addr());
        assert_eq!(config.request_timeout_secs, 120);
    }
}
