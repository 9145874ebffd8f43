use crate::domain::market::RawAssetFields;
use anyhow::Result;
use async_trait::async_trait;

/// Producer of complete replacement snapshot batches.
///
/// Rank is implicit in the returned order: the first record is rank 1.
#[async_trait]
pub trait SnapshotFeed: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawAssetFields>>;
}

/// Injectable source of uniform samples.
///
/// All stochastic fields (scores, trend, alerts) draw from this so runs can
/// be replayed from a seed.
pub trait RandomSource: Send {
    /// Uniform sample in [0, 1)
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f64) as usize).min(len.saturating_sub(1))
    }

    /// Uniform sample in [low, high)
    fn next_range(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_unit() * (high - low)
    }
}
