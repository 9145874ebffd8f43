use super::criteria::RiskFilter;
use super::predicate_trait::AssetPredicate;
use crate::domain::market::AssetSnapshot;

/// Keeps assets whose risk score falls in the selected band
pub struct RiskPredicate {
    selection: RiskFilter,
}

impl RiskPredicate {
    pub fn new(selection: RiskFilter) -> Self {
        Self { selection }
    }
}

impl AssetPredicate for RiskPredicate {
    fn name(&self) -> &str {
        "risk"
    }

    fn matches(&self, asset: &AssetSnapshot) -> bool {
        match self.selection {
            RiskFilter::All => true,
            RiskFilter::Only(band) => band.contains(asset.risk_score),
        }
    }

    fn is_active(&self) -> bool {
        self.selection != RiskFilter::All
    }

    fn order(&self) -> u8 {
        20
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::{RiskBand, Sector};
    use crate::domain::test_fixtures::asset;

    #[test]
    fn test_band_boundaries() {
        let low = RiskPredicate::new(RiskFilter::Only(RiskBand::Low));
        let medium = RiskPredicate::new(RiskFilter::Only(RiskBand::Medium));
        let high = RiskPredicate::new(RiskFilter::Only(RiskBand::High));

        let at_four = asset(1, "A", Sector::Biotech, 4.0);
        let at_six = asset(2, "B", Sector::Biotech, 6.0);
        let above_six = asset(3, "C", Sector::Biotech, 6.1);

        assert!(low.matches(&at_four));
        assert!(!medium.matches(&at_four));
        assert!(medium.matches(&at_six));
        assert!(!high.matches(&at_six));
        assert!(high.matches(&above_six));
    }
}
