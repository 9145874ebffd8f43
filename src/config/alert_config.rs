use crate::application::alert_generator::DEFAULT_ALERT_THRESHOLD;
use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct AlertEnvConfig {
    /// Per-tick gate; an alert fires when the sample exceeds it
    pub threshold: f64,
}

impl AlertEnvConfig {
    pub fn from_env() -> Result<Self> {
        let threshold = env::var("ALERT_THRESHOLD")
            .unwrap_or_else(|_| DEFAULT_ALERT_THRESHOLD.to_string())
            .parse::<f64>()
            .context("Failed to parse ALERT_THRESHOLD")?;

        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!("ALERT_THRESHOLD must be between 0 and 1, got {}", threshold);
        }

        Ok(Self { threshold })
    }
}
