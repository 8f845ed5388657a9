//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::ExpiringConfig;

/// Which cache variant backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CacheMode {
    /// Entries expire after the configured TTL
    #[default]
    Expiring,
    /// Entries live until deleted
    Unbounded,
}

impl CacheMode {
    /// Returns the lowercase name used in config and API output.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheMode::Expiring => "expiring",
            CacheMode::Unbounded => "unbounded",
        }
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expiring" => Ok(CacheMode::Expiring),
            "unbounded" => Ok(CacheMode::Unbounded),
            other => Err(format!("unknown cache mode: {}", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache variant to serve
    pub cache_mode: CacheMode,
    /// Entry TTL in milliseconds (expiring mode only)
    pub ttl_ms: u64,
    /// Sweep interval in milliseconds; `None` derives it from the TTL
    pub sweep_interval_ms: Option<u64>,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MODE` - `expiring` or `unbounded` (default: expiring)
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: 30000)
    /// - `SWEEP_INTERVAL_MS` - Sweep interval in milliseconds (default: derived from TTL)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_mode: env::var("CACHE_MODE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_mode),
            ttl_ms: env::var("CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_ms),
            sweep_interval_ms: env::var("SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// Builds the expiring cache configuration from the TTL settings.
    pub fn expiring_config(&self) -> ExpiringConfig {
        let config = ExpiringConfig::new(Duration::from_millis(self.ttl_ms));
        match self.sweep_interval_ms {
            Some(ms) => config.with_sweep_interval(Duration::from_millis(ms)),
            None => config,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_mode: CacheMode::Expiring,
            ttl_ms: 30_000,
            sweep_interval_ms: None,
            server_port: 8080,
        }
    }
}
