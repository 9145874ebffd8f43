//! Tick cadence configuration: clock and snapshot refresh intervals.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RefreshEnvConfig {
    pub clock_interval: Duration,
    pub refresh_interval: Duration,
    pub auto_refresh: bool,
}

impl RefreshEnvConfig {
    pub fn from_env() -> Result<Self> {
        let clock_interval_ms = Self::parse_u64("CLOCK_INTERVAL_MS", 1000)?;
        let refresh_interval_ms = Self::parse_u64("REFRESH_INTERVAL_MS", 5000)?;

        if clock_interval_ms == 0 || refresh_interval_ms == 0 {
            anyhow::bail!("CLOCK_INTERVAL_MS and REFRESH_INTERVAL_MS must be greater than zero");
        }

        let auto_refresh = env::var("AUTO_REFRESH")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .context("Failed to parse AUTO_REFRESH")?;

        Ok(Self {
            clock_interval: Duration::from_millis(clock_interval_ms),
            refresh_interval: Duration::from_millis(refresh_interval_ms),
            auto_refresh,
        })
    }

    fn parse_u64(key: &str, default: u64) -> Result<u64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<u64>()
            .context(format!("Failed to parse {}", key))
    }
}
