use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Symbols the user has starred. Keyed by symbol, so membership survives
/// snapshot replacement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Watchlist {
    symbols: BTreeSet<String>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the symbol if absent, remove it if present.
    ///
    /// Returns `true` when the symbol is watched afterwards.
    pub fn toggle(&mut self, symbol: &str) -> bool {
        if self.symbols.remove(symbol) {
            false
        } else {
            self.symbols.insert(symbol.to_string());
            true
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
