use crate::domain::market::risk_band::RiskBand;
use crate::domain::market::sector::Sector;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Market the dashboard is pointed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Market {
    #[default]
    Stocks,
    Crypto,
    Forex,
    Futures,
    Options,
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Market::Stocks => write!(f, "Stocks"),
            Market::Crypto => write!(f, "Crypto"),
            Market::Forex => write!(f, "Forex"),
            Market::Futures => write!(f, "Futures"),
            Market::Options => write!(f, "Options"),
        }
    }
}

impl FromStr for Market {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stocks" | "stock" => Ok(Market::Stocks),
            "crypto" => Ok(Market::Crypto),
            "forex" | "fx" => Ok(Market::Forex),
            "futures" => Ok(Market::Futures),
            "options" => Ok(Market::Options),
            _ => Err(format!(
                "unknown market '{}'. Must be stocks, crypto, forex, futures or options",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    StrongBuy,
    Buy,
    Hold,
}

impl Signal {
    pub fn is_strong(&self) -> bool {
        matches!(self, Signal::StrongBuy)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::StrongBuy => write!(f, "STRONG BUY"),
            Signal::Buy => write!(f, "BUY"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Bullish,
    Bearish,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Bullish => write!(f, "BULLISH"),
            Trend::Bearish => write!(f, "BEARISH"),
        }
    }
}

/// Categorical trading-volume level, ordered Low < Medium < High < Very High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VolumeProfile {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl VolumeProfile {
    pub fn label(&self) -> &'static str {
        match self {
            VolumeProfile::Low => "Low",
            VolumeProfile::Medium => "Medium",
            VolumeProfile::High => "High",
            VolumeProfile::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for VolumeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VolumeProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(VolumeProfile::Low),
            "medium" => Ok(VolumeProfile::Medium),
            "high" => Ok(VolumeProfile::High),
            "very high" => Ok(VolumeProfile::VeryHigh),
            _ => Err(format!("unknown volume profile '{}'", s)),
        }
    }
}

/// Descriptive passthrough fields shown in the expanded detail row.
///
/// No invariants beyond being present; they are carried verbatim from the
/// feed into the snapshot and the export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInsights {
    pub next_optimal: String,
    pub institutional_flow: String,
    pub dark_pool_activity: String,
    pub short_interest: String,
    pub options_flow: String,
    pub earnings_date: String,
    pub whale_activity: String,
    pub market_cap: String,
    pub pe_ratio: String,
    pub dividend_yield: String,
}

/// One record as the feed emits it. Numeric fields are still text and are
/// only trusted after the scoring stage has parsed them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAssetFields {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub price: String,
    pub change_percent: String,
    pub volume: String,
    pub volume_profile: String,
    #[serde(flatten)]
    pub insights: AssetInsights,
}

/// One traded instrument at one point in time, after scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSnapshot {
    pub rank: usize,
    pub symbol: String,
    pub name: String,
    pub sector: Sector,
    pub price: Decimal,
    pub change_percent: Decimal,
    pub volume: u64,
    pub volume_profile: VolumeProfile,
    pub total_score: f64,
    pub ai_score: f64,
    pub ict_score: f64,
    pub sentiment_score: f64,
    pub risk_score: f64,
    pub signal: Signal,
    pub trend: Trend,
    #[serde(flatten)]
    pub insights: AssetInsights,
}

impl AssetSnapshot {
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_score(self.risk_score)
    }

    pub fn is_advancing(&self) -> bool {
        self.change_percent > Decimal::ZERO
    }

    pub fn is_declining(&self) -> bool {
        self.change_percent < Decimal::ZERO
    }
}
