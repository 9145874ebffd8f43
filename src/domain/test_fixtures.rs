use crate::domain::market::{
    AssetInsights, AssetSnapshot, Sector, Signal, Trend, VolumeProfile,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Minimal scored asset for unit tests
pub fn asset(rank: usize, symbol: &str, sector: Sector, risk_score: f64) -> AssetSnapshot {
    AssetSnapshot {
        rank,
        symbol: symbol.to_string(),
        name: format!("{} Corp", symbol),
        sector,
        price: Decimal::from(100 + rank as i64 * 50),
        change_percent: Decimal::ZERO,
        volume: 1_000_000,
        volume_profile: VolumeProfile::Medium,
        total_score: 95.0 - rank as f64 * 2.0,
        ai_score: 90.0,
        ict_score: 85.0,
        sentiment_score: 80.0,
        risk_score,
        signal: if rank <= 7 { Signal::StrongBuy } else { Signal::Buy },
        trend: Trend::Bullish,
        insights: AssetInsights::default(),
    }
}

pub fn with_change(mut asset: AssetSnapshot, change: f64) -> AssetSnapshot {
    asset.change_percent = Decimal::from_f64(change).unwrap_or_default().round_dp(2);
    asset
}
