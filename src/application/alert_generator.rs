use crate::domain::alerts::{AlertEvent, AlertSeverity};
use crate::domain::market::AssetSnapshot;
use crate::domain::ports::RandomSource;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Default per-tick gate: an alert fires when the sample exceeds 0.7
pub const DEFAULT_ALERT_THRESHOLD: f64 = 0.7;

/// Largest simulated move reported in an alert, in percent (exclusive)
const MAX_ALERT_MOVE_PCT: f64 = 5.0;

/// Stochastic, threshold-gated price-alert source.
///
/// Best effort only: no asset is guaranteed an alert and the same asset may
/// be picked on consecutive ticks.
#[derive(Debug, Clone)]
pub struct AlertGenerator {
    threshold: f64,
}

impl Default for AlertGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_THRESHOLD)
    }
}

impl AlertGenerator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Run once for a refresh tick. Returns the alert to prepend, if any.
    pub fn maybe_generate(
        &self,
        assets: &[AssetSnapshot],
        rng: &mut dyn RandomSource,
        id: u64,
        now: DateTime<Utc>,
    ) -> Option<AlertEvent> {
        if rng.next_unit() <= self.threshold || assets.is_empty() {
            return None;
        }

        let asset = &assets[rng.next_index(assets.len())];
        let direction = if rng.next_unit() > 0.5 { "up" } else { "down" };
        let magnitude = rng.next_range(0.0, MAX_ALERT_MOVE_PCT);
        let severity = if rng.next_unit() > 0.5 {
            AlertSeverity::Info
        } else {
            AlertSeverity::Warning
        };

        let alert = AlertEvent {
            id,
            message: format!(
                "Price alert: {} moved {} {:.2}%",
                asset.symbol, direction, magnitude
            ),
            severity,
            timestamp: now,
        };
        debug!("AlertGenerator: {} ({})", alert.message, alert.severity);
        Some(alert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::Sector;
    use crate::domain::test_fixtures::asset;
    use crate::infrastructure::simulation::random::{RngSource, ScriptedSource};

    fn assets() -> Vec<AssetSnapshot> {
        vec![
            asset(1, "NVDA", Sector::AiSemiconductors, 3.0),
            asset(2, "MSFT", Sector::CloudAi, 4.0),
        ]
    }

    #[test]
    fn test_below_threshold_is_silent() {
        let generator = AlertGenerator::default();
        let mut rng = ScriptedSource::constant(0.7);
        assert!(generator.maybe_generate(&assets(), &mut rng, 1, Utc::now()).is_none());
    }

    #[test]
    fn test_alert_content() {
        let generator = AlertGenerator::default();
        // gate, asset pick, direction, magnitude, severity
        let mut rng = ScriptedSource::new(vec![0.95, 0.6, 0.2, 0.5, 0.9]);
        let alert = generator
            .maybe_generate(&assets(), &mut rng, 42, Utc::now())
            .unwrap();

        assert_eq!(alert.id, 42);
        assert_eq!(alert.message, "Price alert: MSFT moved down 2.50%");
        assert_eq!(alert.severity, AlertSeverity::Info);
    }

    #[test]
    fn test_empty_set_never_alerts() {
        let generator = AlertGenerator::default();
        let mut rng = ScriptedSource::constant(0.99);
        assert!(generator.maybe_generate(&[], &mut rng, 1, Utc::now()).is_none());
    }

    #[test]
    fn test_fire_rate_near_thirty_percent() {
        let generator = AlertGenerator::default();
        let mut rng = RngSource::seeded(2024);
        let universe = assets();

        let fired = (0..1000)
            .filter(|i| {
                generator
                    .maybe_generate(&universe, &mut rng, *i as u64, Utc::now())
                    .is_some()
            })
            .count();
        assert!((230..=370).contains(&fired), "fired {} of 1000", fired);
    }
}
