use crate::domain::market::{Market, SessionActivityMode};
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct SimulationEnvConfig {
    /// Seeds every random source; unset means OS entropy
    pub seed: Option<u64>,
    pub session_mode: SessionActivityMode,
    pub market: Market,
}

impl SimulationEnvConfig {
    pub fn from_env() -> Result<Self> {
        let seed = match env::var("SIMULATION_SEED") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .context("Failed to parse SIMULATION_SEED")?,
            ),
            Err(_) => None,
        };

        let session_mode = SessionActivityMode::from_str(
            &env::var("SESSION_ACTIVITY_MODE").unwrap_or_else(|_| "static".to_string()),
        )
        .map_err(anyhow::Error::msg)?;

        let market = Market::from_str(&env::var("MARKET").unwrap_or_else(|_| "stocks".to_string()))
            .map_err(anyhow::Error::msg)?;

        Ok(Self {
            seed,
            session_mode,
            market,
        })
    }
}
