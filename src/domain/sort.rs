//! Sort stage applied after the filter chain.

use crate::domain::market::AssetSnapshot;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    TotalScore,
    AiScore,
    RiskScore,
    VolumeProfile,
    PriceChange,
    #[default]
    Rank,
}

impl SortKey {
    /// Comparator for this key. All keys are total orders; ties are left to
    /// the stable sort.
    pub fn compare(&self, a: &AssetSnapshot, b: &AssetSnapshot) -> Ordering {
        match self {
            SortKey::TotalScore => b.total_score.total_cmp(&a.total_score),
            SortKey::AiScore => b.ai_score.total_cmp(&a.ai_score),
            SortKey::RiskScore => a.risk_score.total_cmp(&b.risk_score),
            SortKey::VolumeProfile => b.volume_profile.cmp(&a.volume_profile),
            SortKey::PriceChange => b.change_percent.cmp(&a.change_percent),
            SortKey::Rank => a.rank.cmp(&b.rank),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::TotalScore => write!(f, "Total Score"),
            SortKey::AiScore => write!(f, "AI Score"),
            SortKey::RiskScore => write!(f, "Risk Score"),
            SortKey::VolumeProfile => write!(f, "Volume Profile"),
            SortKey::PriceChange => write!(f, "Price Change"),
            SortKey::Rank => write!(f, "Rank"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "total" | "totalscore" => Ok(SortKey::TotalScore),
            "ai" | "aiscore" => Ok(SortKey::AiScore),
            "risk" | "riskscore" => Ok(SortKey::RiskScore),
            "volume" | "volumeprofile" => Ok(SortKey::VolumeProfile),
            "change" | "pricechange" => Ok(SortKey::PriceChange),
            "rank" => Ok(SortKey::Rank),
            _ => Err(format!("unknown sort key '{}'", s)),
        }
    }
}

/// Stable sort of `assets` by `key`. Consumes and returns the list so the
/// caller's input sequence is never reordered in place.
pub fn sort_assets<'a>(assets: Vec<&'a AssetSnapshot>, key: SortKey) -> Vec<&'a AssetSnapshot> {
    let mut sorted = assets;
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::{Sector, VolumeProfile};
    use crate::domain::test_fixtures::{asset, with_change};

    fn symbols(assets: &[&AssetSnapshot]) -> Vec<String> {
        assets.iter().map(|a| a.symbol.clone()).collect()
    }

    #[test]
    fn test_risk_ascending() {
        let assets = vec![
            asset(1, "A", Sector::Biotech, 7.8),
            asset(2, "B", Sector::Biotech, 3.2),
            asset(3, "C", Sector::Biotech, 5.0),
        ];
        let sorted = sort_assets(assets.iter().collect(), SortKey::RiskScore);
        assert_eq!(symbols(&sorted), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_volume_profile_uses_ordinal_not_alphabet() {
        let mut low = asset(1, "LOW", Sector::Biotech, 3.0);
        low.volume_profile = VolumeProfile::Low;
        let mut very_high = asset(2, "VH", Sector::Biotech, 3.0);
        very_high.volume_profile = VolumeProfile::VeryHigh;
        let mut medium = asset(3, "MED", Sector::Biotech, 3.0);
        medium.volume_profile = VolumeProfile::Medium;
        let mut high = asset(4, "HIGH", Sector::Biotech, 3.0);
        high.volume_profile = VolumeProfile::High;

        let assets = [low, very_high, medium, high];
        let sorted = sort_assets(assets.iter().collect(), SortKey::VolumeProfile);
        assert_eq!(symbols(&sorted), vec!["VH", "HIGH", "MED", "LOW"]);
    }

    #[test]
    fn test_ties_keep_prior_order() {
        let assets = vec![
            with_change(asset(1, "A", Sector::Biotech, 3.0), 1.5),
            with_change(asset(2, "B", Sector::Biotech, 3.0), 2.0),
            with_change(asset(3, "C", Sector::Biotech, 3.0), 1.5),
            with_change(asset(4, "D", Sector::Biotech, 3.0), 1.5),
        ];
        let sorted = sort_assets(assets.iter().collect(), SortKey::PriceChange);
        assert_eq!(symbols(&sorted), vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn test_sort_is_idempotent_for_every_key() {
        let assets = vec![
            with_change(asset(3, "C", Sector::Biotech, 6.0), -1.0),
            with_change(asset(1, "A", Sector::FinTech, 4.0), 2.0),
            with_change(asset(2, "B", Sector::Solar, 4.0), 2.0),
        ];
        for key in [
            SortKey::TotalScore,
            SortKey::AiScore,
            SortKey::RiskScore,
            SortKey::VolumeProfile,
            SortKey::PriceChange,
            SortKey::Rank,
        ] {
            let once = sort_assets(assets.iter().collect(), key);
            let twice = sort_assets(once.clone(), key);
            assert_eq!(once, twice, "key {} is not idempotent", key);
        }
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!(SortKey::from_str("Total Score").unwrap(), SortKey::TotalScore);
        assert_eq!(SortKey::from_str("ai").unwrap(), SortKey::AiScore);
        assert_eq!(SortKey::from_str("price-change").unwrap(), SortKey::PriceChange);
        assert!(SortKey::from_str("alphabet").is_err());
    }
}
