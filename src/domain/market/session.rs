//! Kill-zone session windows.
//!
//! The schedule is a static table. Whether a window counts as active is
//! decided by [`SessionActivityMode`]: either the declared flag carried in the
//! table, or a containment check of the current wall-clock time against the
//! window's range (stated in IST, UTC+05:30).

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::market::asset::VolumeProfile;

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionActivityMode {
    /// Use the declared `active` flag of each window
    #[default]
    Static,
    /// Derive activity from the current time
    Clock,
}

impl FromStr for SessionActivityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "clock" => Ok(Self::Clock),
            _ => Err(format!(
                "unknown session activity mode '{}'. Must be 'static' or 'clock'",
                s
            )),
        }
    }
}

/// A named, time-boxed trading period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionWindow {
    pub name: String,
    pub declared_active: bool,
    /// Minutes after IST midnight, inclusive
    pub start_minute: u32,
    /// Minutes after IST midnight, exclusive
    pub end_minute: u32,
    /// 1 (lowest) to 5 (highest)
    pub priority: u8,
    pub volatility: VolumeProfile,
    pub volume: VolumeProfile,
}

impl SessionWindow {
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        let minute = ist_minute_of_day(now);
        if self.start_minute <= self.end_minute {
            minute >= self.start_minute && minute < self.end_minute
        } else {
            // Window wraps past midnight
            minute >= self.start_minute || minute < self.end_minute
        }
    }

    pub fn time_label(&self) -> String {
        format!(
            "{}-{} IST",
            format_minute(self.start_minute),
            format_minute(self.end_minute)
        )
    }
}

/// A window together with its resolved activity
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub window: SessionWindow,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSchedule {
    windows: Vec<SessionWindow>,
    mode: SessionActivityMode,
}

impl SessionSchedule {
    pub fn new(windows: Vec<SessionWindow>, mode: SessionActivityMode) -> Self {
        Self { windows, mode }
    }

    /// The four ICT kill zones shown on the dashboard
    pub fn kill_zones(mode: SessionActivityMode) -> Self {
        let window = |name: &str,
                      declared_active: bool,
                      start: (u32, u32),
                      end: (u32, u32),
                      priority: u8,
                      volatility: VolumeProfile,
                      volume: VolumeProfile| SessionWindow {
            name: name.to_string(),
            declared_active,
            start_minute: start.0 * 60 + start.1,
            end_minute: end.0 * 60 + end.1,
            priority,
            volatility,
            volume,
        };

        Self::new(
            vec![
                window("Asian KZ", false, (6, 30), (9, 30), 3, VolumeProfile::Medium, VolumeProfile::Low),
                window("London KZ", true, (12, 30), (15, 30), 5, VolumeProfile::High, VolumeProfile::High),
                window("NY KZ", true, (17, 30), (20, 30), 5, VolumeProfile::High, VolumeProfile::VeryHigh),
                window("Silver Bullet", false, (20, 30), (21, 30), 4, VolumeProfile::Low, VolumeProfile::Medium),
            ],
            mode,
        )
    }

    pub fn mode(&self) -> SessionActivityMode {
        self.mode
    }

    pub fn windows(&self) -> &[SessionWindow] {
        &self.windows
    }

    pub fn statuses_at(&self, now: DateTime<Utc>) -> Vec<SessionStatus> {
        self.windows
            .iter()
            .map(|window| SessionStatus {
                active: match self.mode {
                    SessionActivityMode::Static => window.declared_active,
                    SessionActivityMode::Clock => window.contains(now),
                },
                window: window.clone(),
            })
            .collect()
    }

    pub fn active_names(&self, now: DateTime<Utc>) -> Vec<String> {
        self.statuses_at(now)
            .into_iter()
            .filter(|s| s.active)
            .map(|s| s.window.name)
            .collect()
    }
}

fn ist_minute_of_day(now: DateTime<Utc>) -> u32 {
    match FixedOffset::east_opt(IST_OFFSET_SECS) {
        Some(ist) => {
            let local = now.with_timezone(&ist);
            local.hour() * 60 + local.minute()
        }
        None => now.hour() * 60 + now.minute(),
    }
}

fn format_minute(minute: u32) -> String {
    let (hour, min) = (minute / 60 % 24, minute % 60);
    let (display_hour, suffix) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };
    format!("{}:{:02} {}", display_hour, min, suffix)
}
