use tracing::debug;

use super::criteria::FilterCriteria;
use super::predicate_trait::AssetPredicate;
use super::risk_filter::RiskPredicate;
use super::search_filter::SearchPredicate;
use super::sector_filter::SectorPredicate;
use crate::domain::market::AssetSnapshot;

/// Ordered composition of asset predicates.
///
/// Each asset is tested against the predicates in order and dropped at the
/// first miss. The output keeps the input order and never owns or mutates
/// the assets.
pub struct FilterChain {
    predicates: Vec<Box<dyn AssetPredicate>>,
}

impl FilterChain {
    /// Create a chain from arbitrary predicates, sorted by their order key
    pub fn new(predicates: Vec<Box<dyn AssetPredicate>>) -> Self {
        let mut sorted = predicates;
        sorted.sort_by_key(|p| p.order());
        Self { predicates: sorted }
    }

    /// Sector, then risk band, then free-text search
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let predicates: Vec<Box<dyn AssetPredicate>> = vec![
            Box::new(SectorPredicate::new(criteria.sector)),
            Box::new(RiskPredicate::new(criteria.risk)),
            Box::new(SearchPredicate::new(&criteria.search_text)),
        ];
        Self::new(predicates)
    }

    pub fn apply<'a, I>(&self, assets: I) -> Vec<&'a AssetSnapshot>
    where
        I: IntoIterator<Item = &'a AssetSnapshot>,
    {
        let active: Vec<&dyn AssetPredicate> = self
            .predicates
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| p.is_active())
            .collect();

        let kept: Vec<&'a AssetSnapshot> = assets
            .into_iter()
            .filter(|asset| active.iter().all(|p| p.matches(asset)))
            .collect();

        debug!(
            "FilterChain: {} assets kept by [{}]",
            kept.len(),
            active.iter().map(|p| p.name()).collect::<Vec<_>>().join(", ")
        );
        kept
    }

    pub fn active_predicates(&self) -> Vec<&str> {
        self.predicates
            .iter()
            .filter(|p| p.is_active())
            .map(|p| p.name())
            .collect()
    }
}

/// Convenience wrapper: build the chain for `criteria` and run it
pub fn filter_assets<'a>(
    assets: &'a [AssetSnapshot],
    criteria: &FilterCriteria,
) -> Vec<&'a AssetSnapshot> {
    FilterChain::from_criteria(criteria).apply(assets)
}
