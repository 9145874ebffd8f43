// Assets, sectors, risk bands and session windows
pub mod market;

// Filter chain and sort stage
pub mod filters;
pub mod sort;

// Derived views over the full scored set
pub mod market_stats;

// Alert feed and watchlist
pub mod alerts;
pub mod watchlist;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;

#[cfg(test)]
pub(crate) mod test_fixtures;
