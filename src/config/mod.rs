//! Configuration module for MarketLens.
//!
//! Structured configuration loaded from environment variables, organized by
//! concern: tick cadence, alerts, export, and simulation.

mod alert_config;
mod export_config;
mod refresh_config;
mod simulation_config;

pub use alert_config::AlertEnvConfig;
pub use export_config::ExportEnvConfig;
pub use refresh_config::RefreshEnvConfig;
pub use simulation_config::SimulationEnvConfig;

use crate::domain::market::{Market, SessionActivityMode};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration.
///
/// Flattened view over the sub-configs; the binary may override a few
/// fields from command-line flags after loading.
#[derive(Debug, Clone)]
pub struct Config {
    // Ticks
    pub clock_interval: Duration,
    pub refresh_interval: Duration,
    pub auto_refresh: bool,

    // Alerts
    pub alert_threshold: f64,

    // Export
    pub export_dir: PathBuf,

    // Simulation
    pub simulation_seed: Option<u64>,
    pub session_mode: SessionActivityMode,
    pub market: Market,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let refresh = RefreshEnvConfig::from_env().context("Failed to load refresh config")?;
        let alerts = AlertEnvConfig::from_env().context("Failed to load alert config")?;
        let export = ExportEnvConfig::from_env();
        let simulation =
            SimulationEnvConfig::from_env().context("Failed to load simulation config")?;

        Ok(Self {
            clock_interval: refresh.clock_interval,
            refresh_interval: refresh.refresh_interval,
            auto_refresh: refresh.auto_refresh,

            alert_threshold: alerts.threshold,

            export_dir: export.directory,

            simulation_seed: simulation.seed,
            session_mode: simulation.session_mode,
            market: simulation.market,
        })
    }
}

impl Default for Config {
    /// Defaults as documented for each environment variable
    fn default() -> Self {
        Self {
            clock_interval: Duration::from_millis(1000),
            refresh_interval: Duration::from_millis(5000),
            auto_refresh: true,
            alert_threshold: crate::application::alert_generator::DEFAULT_ALERT_THRESHOLD,
            export_dir: PathBuf::from("."),
            simulation_seed: None,
            session_mode: SessionActivityMode::default(),
            market: Market::default(),
        }
    }
}
