use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Maximum number of alerts kept in the rolling log
pub const ALERT_LOG_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Info => write!(f, "info"),
            AlertSeverity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub id: u64,
    pub message: String,
    pub severity: AlertSeverity,
    pub timestamp: DateTime<Utc>,
}

/// Capped, newest-first alert feed.
///
/// Pushing past the capacity evicts the oldest entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlertLog {
    events: VecDeque<AlertEvent>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self {
            events: VecDeque::with_capacity(ALERT_LOG_CAPACITY),
        }
    }

    pub fn push(&mut self, event: AlertEvent) {
        self.events.push_front(event);
        self.events.truncate(ALERT_LOG_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Most recent alert, shown as the banner
    pub fn latest(&self) -> Option<&AlertEvent> {
        self.events.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlertEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(id: u64) -> AlertEvent {
        AlertEvent {
            id,
            message: format!("Price alert #{}", id),
            severity: AlertSeverity::Info,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_log_is_capped_and_newest_first() {
        let mut log = AlertLog::new();
        for id in 1..=12 {
            log.push(alert(id));
            assert!(log.len() <= ALERT_LOG_CAPACITY);
        }

        let ids: Vec<u64> = log.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![12, 11, 10, 9, 8]);
        assert_eq!(log.latest().map(|a| a.id), Some(12));
    }

    #[test]
    fn test_clear() {
        let mut log = AlertLog::new();
        log.push(alert(1));
        log.clear();
        assert!(log.is_empty());
        assert!(log.latest().is_none());
    }
}
