//! Scoring stage: turns raw feed records into scored asset snapshots.
//!
//! Parsing happens before any random draw, so a rejected record never
//! consumes samples from the random source.

use crate::domain::errors::DataFormatError;
use crate::domain::market::{
    AssetSnapshot, RawAssetFields, Sector, Signal, Trend, VolumeProfile,
};
use crate::domain::market::risk_band::MAX_RISK_SCORE;
use crate::domain::ports::RandomSource;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Ranks 1..=strong_buy_max_rank are STRONG_BUY
    pub strong_buy_max_rank: usize,
    /// Ranks up to buy_max_rank are BUY, the rest HOLD
    pub buy_max_rank: usize,
    /// Probability threshold above which the trend is BULLISH
    pub bearish_probability: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strong_buy_max_rank: 7,
            buy_max_rank: 14,
            bearish_probability: 0.3,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoringStage {
    config: ScoringConfig,
}

impl ScoringStage {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score a whole feed batch. Rank follows batch order, starting at 1.
    ///
    /// The first malformed record rejects the batch.
    pub fn score_batch(
        &self,
        batch: &[RawAssetFields],
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<AssetSnapshot>, DataFormatError> {
        let mut seen = HashSet::with_capacity(batch.len());
        let mut scored = Vec::with_capacity(batch.len());

        for (idx, raw) in batch.iter().enumerate() {
            let asset = self.score(raw, idx + 1, rng).inspect_err(|e| {
                warn!("ScoringStage: rejecting batch at record #{}: {}", idx + 1, e);
            })?;
            if !seen.insert(asset.symbol.clone()) {
                return Err(DataFormatError::DuplicateSymbol {
                    symbol: asset.symbol,
                });
            }
            scored.push(asset);
        }

        debug!("ScoringStage: scored {} assets", scored.len());
        Ok(scored)
    }

    pub fn score(
        &self,
        raw: &RawAssetFields,
        rank: usize,
        rng: &mut dyn RandomSource,
    ) -> Result<AssetSnapshot, DataFormatError> {
        let symbol = required(&raw.symbol, rank, "symbol")?;
        let name = required(&raw.name, rank, "name")?;

        let sector = Sector::from_str(&raw.sector).map_err(|_| DataFormatError::UnknownSector {
            symbol: symbol.clone(),
            value: raw.sector.clone(),
        })?;

        let price = parse_decimal(&symbol, "price", &raw.price)?;
        if price <= Decimal::ZERO {
            return Err(DataFormatError::NonPositivePrice {
                symbol,
                value: raw.price.clone(),
            });
        }
        let change_percent = parse_decimal(&symbol, "changePercent", &raw.change_percent)?;
        let volume = parse_volume(&symbol, &raw.volume)?;
        let volume_profile = VolumeProfile::from_str(&raw.volume_profile).map_err(|_| {
            DataFormatError::UnknownVolumeProfile {
                symbol: symbol.clone(),
                value: raw.volume_profile.clone(),
            }
        })?;

        let rank_offset = rank.saturating_sub(1) as f64;
        let total_score = finite(&symbol, "totalScore", 95.0 - rank_offset * 2.0 + rng.next_unit() * 5.0)?;
        let ai_score = finite(&symbol, "aiScore", rng.next_range(85.0, 100.0))?;
        let ict_score = finite(&symbol, "ictScore", rng.next_range(80.0, 100.0))?;
        let sentiment_score = finite(&symbol, "sentimentScore", rng.next_range(70.0, 100.0))?;
        let risk_score = finite(&symbol, "riskScore", rng.next_range(3.0, 7.0))?;
        let trend = if rng.next_unit() > self.config.bearish_probability {
            Trend::Bullish
        } else {
            Trend::Bearish
        };

        Ok(AssetSnapshot {
            rank,
            symbol,
            name,
            sector,
            price,
            change_percent,
            volume,
            volume_profile,
            total_score: score_0_100(total_score),
            ai_score: score_0_100(ai_score),
            ict_score: score_0_100(ict_score),
            sentiment_score: score_0_100(sentiment_score),
            risk_score: round_tenth(risk_score.clamp(0.0, MAX_RISK_SCORE)),
            signal: self.signal_for_rank(rank),
            trend,
            insights: raw.insights.clone(),
        })
    }

    pub fn signal_for_rank(&self, rank: usize) -> Signal {
        if rank <= self.config.strong_buy_max_rank {
            Signal::StrongBuy
        } else if rank <= self.config.buy_max_rank {
            Signal::Buy
        } else {
            Signal::Hold
        }
    }
}

fn required(value: &str, position: usize, field: &'static str) -> Result<String, DataFormatError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DataFormatError::EmptyField { position, field })
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_decimal(symbol: &str, field: &'static str, value: &str) -> Result<Decimal, DataFormatError> {
    Decimal::from_str(value.trim()).map_err(|_| DataFormatError::InvalidNumber {
        symbol: symbol.to_string(),
        field,
        value: value.to_string(),
    })
}

/// Accepts plain digits or digits grouped with ',' / '_'
fn parse_volume(symbol: &str, value: &str) -> Result<u64, DataFormatError> {
    let digits: String = value
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    digits.parse::<u64>().map_err(|_| DataFormatError::InvalidNumber {
        symbol: symbol.to_string(),
        field: "volume",
        value: value.to_string(),
    })
}

fn finite(symbol: &str, field: &'static str, value: f64) -> Result<f64, DataFormatError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DataFormatError::NonFinite {
            symbol: symbol.to_string(),
            field,
        })
    }
}

fn score_0_100(value: f64) -> f64 {
    round_tenth(value.clamp(0.0, 100.0))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::AssetInsights;
    use crate::infrastructure::simulation::random::ScriptedSource;
    use rust_decimal_macros::dec;

    fn raw(symbol: &str) -> RawAssetFields {
        RawAssetFields {
            symbol: symbol.to_string(),
            name: format!("{} Inc", symbol),
            sector: "FinTech".to_string(),
            price: "152.40".to_string(),
            change_percent: "-1.25".to_string(),
            volume: "4,512,300".to_string(),
            volume_profile: "Very High".to_string(),
            insights: AssetInsights::default(),
        }
    }

    #[test]
    fn test_score_parses_and_derives() {
        let stage = ScoringStage::default();
        let mut rng = ScriptedSource::constant(0.5);
        let asset = stage.score(&raw("V"), 10, &mut rng).unwrap();

        assert_eq!(asset.price, dec!(152.40));
        assert_eq!(asset.change_percent, dec!(-1.25));
        assert_eq!(asset.volume, 4_512_300);
        assert_eq!(asset.volume_profile, VolumeProfile::VeryHigh);
        assert_eq!(asset.total_score, 79.5); // 95 - 18 + 2.5
        assert_eq!(asset.ai_score, 92.5);
        assert_eq!(asset.ict_score, 90.0);
        assert_eq!(asset.sentiment_score, 85.0);
        assert_eq!(asset.risk_score, 5.0);
        assert_eq!(asset.signal, Signal::Buy);
        assert_eq!(asset.trend, Trend::Bullish);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let stage = ScoringStage::default();
        for sample in [0.0, 0.999_999] {
            let mut rng = ScriptedSource::constant(sample);
            for rank in [1, 21, 80] {
                let asset = stage.score(&raw("X"), rank, &mut rng).unwrap();
                for score in [asset.total_score, asset.ai_score, asset.ict_score, asset.sentiment_score] {
                    assert!((0.0..=100.0).contains(&score));
                }
                assert!((0.0..=10.0).contains(&asset.risk_score));
            }
        }
    }

    #[test]
    fn test_signal_bands() {
        let stage = ScoringStage::default();
        assert_eq!(stage.signal_for_rank(1), Signal::StrongBuy);
        assert_eq!(stage.signal_for_rank(7), Signal::StrongBuy);
        assert_eq!(stage.signal_for_rank(8), Signal::Buy);
        assert_eq!(stage.signal_for_rank(14), Signal::Buy);
        assert_eq!(stage.signal_for_rank(15), Signal::Hold);
    }

    #[test]
    fn test_malformed_price_is_rejected() {
        let stage = ScoringStage::default();
        let mut rng = ScriptedSource::constant(0.5);

        let mut bad = raw("NVDA");
        bad.price = "12a.5".to_string();
        assert!(matches!(
            stage.score(&bad, 1, &mut rng),
            Err(DataFormatError::InvalidNumber { field: "price", .. })
        ));

        bad.price = "NaN".to_string();
        assert!(stage.score(&bad, 1, &mut rng).is_err());

        bad.price = "0".to_string();
        assert!(matches!(
            stage.score(&bad, 1, &mut rng),
            Err(DataFormatError::NonPositivePrice { .. })
        ));
    }

    #[test]
    fn test_non_finite_sample_is_rejected() {
        let stage = ScoringStage::default();
        let mut rng = ScriptedSource::constant(f64::NAN);
        assert!(matches!(
            stage.score(&raw("V"), 1, &mut rng),
            Err(DataFormatError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_batch_rejects_duplicates_and_bad_records() {
        let stage = ScoringStage::default();
        let mut rng = ScriptedSource::constant(0.5);

        let duplicated = vec![raw("V"), raw("MA"), raw("V")];
        assert_eq!(
            stage.score_batch(&duplicated, &mut rng),
            Err(DataFormatError::DuplicateSymbol { symbol: "V".to_string() })
        );

        let mut unknown = raw("ZZ");
        unknown.sector = "Agriculture".to_string();
        assert!(matches!(
            stage.score_batch(&[raw("V"), unknown], &mut rng),
            Err(DataFormatError::UnknownSector { .. })
        ));

        let mut blank = raw("V");
        blank.symbol = "  ".to_string();
        assert_eq!(
            stage.score_batch(&[blank], &mut rng),
            Err(DataFormatError::EmptyField { position: 1, field: "symbol" })
        );
    }

    #[test]
    fn test_batch_assigns_ranks_in_order() {
        let stage = ScoringStage::default();
        let mut rng = ScriptedSource::constant(0.5);
        let scored = stage.score_batch(&[raw("V"), raw("MA"), raw("BLK")], &mut rng).unwrap();
        let ranks: Vec<usize> = scored.iter().map(|a| a.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }
}
