//! Simulated snapshot feed over a fixed 21-stock universe.
//!
//! Each fetch draws a fresh price move, volume and descriptive fields for
//! every listing. Output is text-typed exactly as a wire feed would emit it;
//! the scoring stage is responsible for parsing it.

use crate::domain::market::{AssetInsights, RawAssetFields};
use crate::domain::ports::{RandomSource, SnapshotFeed};
use crate::interfaces::formatting::group_thousands;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;

/// A tracked instrument: identity only, no market data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub symbol: String,
    pub name: String,
    pub sector: String,
}

impl Listing {
    pub fn new(symbol: &str, name: &str, sector: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            sector: sector.to_string(),
        }
    }
}

/// The default universe, in feed rank order
pub fn top_21_stocks() -> Vec<Listing> {
    [
        ("NVDA", "NVIDIA", "AI/Semiconductors"),
        ("MSFT", "Microsoft", "Cloud/AI"),
        ("GOOGL", "Alphabet", "AI/Search"),
        ("META", "Meta Platforms", "Social/VR"),
        ("AAPL", "Apple", "Consumer Tech"),
        ("PLTR", "Palantir", "AI/Defense"),
        ("SNOW", "Snowflake", "Cloud Data"),
        ("AI", "C3.ai", "Enterprise AI"),
        ("AVGO", "Broadcom", "Semiconductors"),
        ("V", "Visa", "FinTech"),
        ("MA", "Mastercard", "FinTech"),
        ("BLK", "BlackRock", "Asset Mgmt"),
        ("COIN", "Coinbase", "Crypto Exchange"),
        ("TSLA", "Tesla", "EV/Energy"),
        ("NEE", "NextEra Energy", "Clean Energy"),
        ("ENPH", "Enphase", "Solar"),
        ("LLY", "Eli Lilly", "Biotech"),
        ("ISRG", "Intuitive Surgical", "MedTech"),
        ("VRTX", "Vertex Pharma", "Biotech"),
        ("AMD", "AMD", "Semiconductors"),
        ("QCOM", "Qualcomm", "5G/Mobile"),
    ]
    .iter()
    .map(|(symbol, name, sector)| Listing::new(symbol, name, sector))
    .collect()
}

pub struct SimulatedFeed {
    listings: Vec<Listing>,
    rng: Mutex<Box<dyn RandomSource>>,
}

impl SimulatedFeed {
    pub fn new(listings: Vec<Listing>, rng: Box<dyn RandomSource>) -> Self {
        Self {
            listings,
            rng: Mutex::new(rng),
        }
    }

    pub fn with_default_universe(rng: Box<dyn RandomSource>) -> Self {
        Self::new(top_21_stocks(), rng)
    }

    fn generate(&self, rng: &mut dyn RandomSource) -> Vec<RawAssetFields> {
        let today = Utc::now();

        self.listings
            .iter()
            .enumerate()
            .map(|(idx, listing)| {
                let base_price = 100.0 + idx as f64 * 50.0;
                let price_change = (rng.next_unit() - 0.5) * 10.0;
                let change_percent = price_change / base_price * 100.0;
                let volume = (rng.next_unit() * 10_000_000.0).floor() as u64;
                let volume_profile = ["Very High", "High", "Medium"][rng.next_index(3)];

                let insights = AssetInsights {
                    next_optimal: ["NY Kill Zone", "London Kill Zone", "Silver Bullet"]
                        [rng.next_index(3)]
                    .to_string(),
                    institutional_flow: pick(rng, 0.5, "Buying", "Selling"),
                    dark_pool_activity: format!("{:.1}M", rng.next_range(0.0, 100.0)),
                    short_interest: format!("{:.1}%", rng.next_range(0.0, 15.0)),
                    options_flow: pick(rng, 0.5, "Bullish", "Neutral"),
                    earnings_date: (today
                        + Duration::seconds((rng.next_unit() * 90.0 * 86_400.0) as i64))
                    .format("%Y-%m-%d")
                    .to_string(),
                    whale_activity: pick(rng, 0.7, "Detected", "Normal"),
                    market_cap: format!("{:.1}B", rng.next_range(0.0, 1000.0)),
                    pe_ratio: format!("{:.1}", rng.next_range(0.0, 50.0)),
                    dividend_yield: format!("{:.2}%", rng.next_range(0.0, 3.0)),
                };

                RawAssetFields {
                    symbol: listing.symbol.clone(),
                    name: listing.name.clone(),
                    sector: listing.sector.clone(),
                    price: format!("{:.2}", base_price + price_change),
                    change_percent: format!("{:.2}", change_percent),
                    volume: group_thousands(volume),
                    volume_profile: volume_profile.to_string(),
                    insights,
                }
            })
            .collect()
    }
}

#[async_trait]
impl SnapshotFeed for SimulatedFeed {
    async fn fetch(&self) -> Result<Vec<RawAssetFields>> {
        let mut rng = self.rng.lock().await;
        let batch = self.generate(&mut **rng);
        debug!("SimulatedFeed: generated {} records", batch.len());
        Ok(batch)
    }
}

/// `when_above` if the sample exceeds `threshold`, `otherwise` if not
fn pick(rng: &mut dyn RandomSource, threshold: f64, when_above: &str, otherwise: &str) -> String {
    if rng.next_unit() > threshold {
        when_above.to_string()
    } else {
        otherwise.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::simulation::random::{RngSource, ScriptedSource};

    #[tokio::test]
    async fn test_fetch_emits_universe_in_rank_order() {
        let feed = SimulatedFeed::with_default_universe(Box::new(RngSource::seeded(7)));
        let batch = feed.fetch().await.unwrap();

        assert_eq!(batch.len(), 21);
        assert_eq!(batch[0].symbol, "NVDA");
        assert_eq!(batch[20].symbol, "QCOM");
        for record in &batch {
            assert!(record.price.parse::<f64>().unwrap() > 0.0);
        }
    }

    #[tokio::test]
    async fn test_fetch_with_midpoint_sample_is_flat() {
        let feed = SimulatedFeed::new(
            vec![Listing::new("NVDA", "NVIDIA", "AI/Semiconductors")],
            Box::new(ScriptedSource::constant(0.5)),
        );
        let batch = feed.fetch().await.unwrap();

        assert_eq!(batch[0].price, "100.00");
        assert_eq!(batch[0].change_percent, "0.00");
        assert_eq!(batch[0].volume, "5,000,000");
        assert_eq!(batch[0].volume_profile, "High");
        assert_eq!(batch[0].insights.institutional_flow, "Selling");
    }
}
