//! Filter chain applied to the scored asset set before sorting.

pub mod criteria;
pub mod filter_chain;
pub mod predicate_trait;
pub mod risk_filter;
pub mod search_filter;
pub mod sector_filter;

pub use criteria::{FilterCriteria, RiskFilter, SectorFilter};
pub use filter_chain::{FilterChain, filter_assets};
pub use predicate_trait::AssetPredicate;
