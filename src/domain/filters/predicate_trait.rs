use crate::domain::market::AssetSnapshot;

/// A single keep/drop rule in the filter chain.
///
/// Predicates must be side-effect free and must not depend on any asset
/// other than the one being tested.
pub trait AssetPredicate: Send + Sync {
    /// Unique name for logging and debugging
    fn name(&self) -> &str;

    /// Whether the asset survives this predicate
    fn matches(&self, asset: &AssetSnapshot) -> bool;

    /// Whether this predicate can drop anything at all.
    ///
    /// Pass-through predicates (an `All` selection, an empty search) are
    /// skipped by the chain.
    fn is_active(&self) -> bool {
        true
    }

    /// Evaluation order (lower = earlier)
    fn order(&self) -> u8 {
        100
    }
}
