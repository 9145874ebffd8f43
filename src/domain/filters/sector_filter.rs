use super::criteria::SectorFilter;
use super::predicate_trait::AssetPredicate;
use crate::domain::market::AssetSnapshot;

/// Keeps assets of the selected sector
pub struct SectorPredicate {
    selection: SectorFilter,
}

impl SectorPredicate {
    pub fn new(selection: SectorFilter) -> Self {
        Self { selection }
    }
}

impl AssetPredicate for SectorPredicate {
    fn name(&self) -> &str {
        "sector"
    }

    fn matches(&self, asset: &AssetSnapshot) -> bool {
        match self.selection {
            SectorFilter::All => true,
            SectorFilter::Only(sector) => asset.sector == sector,
        }
    }

    fn is_active(&self) -> bool {
        self.selection != SectorFilter::All
    }

    fn order(&self) -> u8 {
        10
    }
}
