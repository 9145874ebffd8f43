//! Derived views over the full scored set: top movers and aggregate stats.
//!
//! Both are pure reductions recomputed on every read; they ignore the
//! user's filter and sort selection.

use crate::domain::market::AssetSnapshot;
use rust_decimal::Decimal;

/// Number of gainers and losers shown
pub const TOP_MOVERS_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct TopMovers<'a> {
    pub gainers: Vec<&'a AssetSnapshot>,
    pub losers: Vec<&'a AssetSnapshot>,
}

/// Extremes by signed change percent. Ties keep feed rank order.
pub fn top_movers(assets: &[AssetSnapshot], count: usize) -> TopMovers<'_> {
    let mut by_rank: Vec<&AssetSnapshot> = assets.iter().collect();
    by_rank.sort_by_key(|a| a.rank);

    let mut gainers = by_rank.clone();
    gainers.sort_by(|a, b| b.change_percent.cmp(&a.change_percent));
    gainers.truncate(count);

    let mut losers = by_rank;
    losers.sort_by(|a, b| a.change_percent.cmp(&b.change_percent));
    losers.truncate(count);

    TopMovers { gainers, losers }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketStats {
    pub total_assets: usize,
    pub strong_signals: usize,
    pub advancing: usize,
    pub declining: usize,
    pub unchanged: usize,
    pub average_total_score: f64,
    pub average_risk_score: f64,
    pub total_volume: u64,
    pub average_change_percent: Decimal,
}

impl MarketStats {
    pub fn compute(assets: &[AssetSnapshot]) -> Self {
        let total_assets = assets.len();
        let strong_signals = assets.iter().filter(|a| a.signal.is_strong()).count();
        let advancing = assets.iter().filter(|a| a.is_advancing()).count();
        let declining = assets.iter().filter(|a| a.is_declining()).count();

        let (average_total_score, average_risk_score, average_change_percent) =
            if total_assets == 0 {
                (0.0, 0.0, Decimal::ZERO)
            } else {
                let n = total_assets as f64;
                let change_sum = assets
                    .iter()
                    .fold(Decimal::ZERO, |sum, a| sum.saturating_add(a.change_percent));
                (
                    assets.iter().map(|a| a.total_score).sum::<f64>() / n,
                    assets.iter().map(|a| a.risk_score).sum::<f64>() / n,
                    (change_sum / Decimal::from(total_assets)).round_dp(2),
                )
            };

        Self {
            total_assets,
            strong_signals,
            advancing,
            declining,
            unchanged: total_assets - advancing - declining,
            average_total_score,
            average_risk_score,
            // Feed volumes are unbounded; the total pins at u64::MAX
            total_volume: assets
                .iter()
                .fold(0u64, |sum, a| sum.saturating_add(a.volume)),
            average_change_percent,
        }
    }
}
