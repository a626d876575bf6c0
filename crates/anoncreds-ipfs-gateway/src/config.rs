use std::{str::FromStr, time::Duration};

use reqwest::Url;
use serde::Deserialize;

use crate::{ConfigError, RetryPolicy};

pub const ENV_URL: &str = "ANONCREDS_IPFS_URL";
pub const ENV_MAX_RETRIES: &str = "ANONCREDS_IPFS_MAX_RETRIES";
pub const ENV_INITIAL_DELAY_MS: &str = "ANONCREDS_IPFS_INITIAL_DELAY_MS";
pub const ENV_TIMEOUT_MS: &str = "ANONCREDS_IPFS_TIMEOUT_MS";

/// Connection settings for an IPFS HTTP gateway.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Base URL of the RPC API, e.g. `http://127.0.0.1:5001`.
    pub url: String,
    /// Total attempts per request.
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    /// Per-request timeout.
    pub timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5001".to_string(),
            max_retries: 3,
            initial_delay_ms: 100,
            timeout_ms: 30_000,
        }
    }
}

impl GatewayConfig {
    /// Reads overrides from `ANONCREDS_IPFS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from defaults, overridden by whatever `lookup` returns.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_URL) {
            config.url = url;
        }
        if let Some(value) = lookup(ENV_MAX_RETRIES) {
            config.max_retries = parse(ENV_MAX_RETRIES, value)?;
        }
        if let Some(value) = lookup(ENV_INITIAL_DELAY_MS) {
            config.initial_delay_ms = parse(ENV_INITIAL_DELAY_MS, value)?;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_MS) {
            config.timeout_ms = parse(ENV_TIMEOUT_MS, value)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retries < 1 {
            return Err(ConfigError::MaxRetries);
        }

        self.parsed_url().map(|_| ())
    }

    pub(crate) fn parsed_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.url).map_err(|_| ConfigError::InvalidUrl(self.url.clone()))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(ConfigError::InvalidUrl(self.url.clone())),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.initial_delay_ms))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
