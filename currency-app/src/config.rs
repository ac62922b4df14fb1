//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use anyhow::Context;

use currency_quotes::DEFAULT_QUOTE_API_URL;

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub quote_api_url: String,
    pub request_timeout: Duration,
    pub max_concurrent_requests: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var("PORT", "3000")
            .parse()
            .context("PORT must be a valid port number")?;

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;

        let max_concurrent_requests: usize = var("MAX_CONCURRENT_REQUESTS", "512")
            .parse()
            .context("MAX_CONCURRENT_REQUESTS must be a positive integer")?;
        if max_concurrent_requests == 0 {
            anyhow::bail!("MAX_CONCURRENT_REQUESTS must be a positive integer");
        }

        Ok(Self {
            port,
            database_url: var("DATABASE_URL", "memory://"),
            quote_api_url: var("QUOTE_API_URL", DEFAULT_QUOTE_API_URL),
            request_timeout: Duration::from_secs(request_timeout_secs),
            max_concurrent_requests,
        })
    }
}
