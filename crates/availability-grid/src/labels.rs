//! Day and time label generation.
//!
//! Day labels cover the week that starts on the upcoming Sunday, so every date
//! from one Sunday through the following Saturday yields the same labels. Time
//! labels use a 12-hour clock and wrap at midnight.

use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::error::{Axis, GridError, Result};
use crate::matrix::{AvailabilityMatrix, WEEK_DAYS};

/// Display labels for the rows (days) and columns (time slots) of a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet {
    pub days: Vec<String>,
    pub times: Vec<String>,
}

impl LabelSet {
    pub fn new(days: Vec<String>, times: Vec<String>) -> Self {
        Self { days, times }
    }

    /// Default 7-day, 48-slot labels relative to `today`.
    pub fn defaults_for(today: NaiveDate) -> Self {
        Self::for_config(&GridConfig::default(), today)
    }

    /// Labels for an arbitrary configured shape.
    ///
    /// A seven-row grid gets dated weekday labels; any other row count gets
    /// ordinal `Day N` labels.
    pub fn for_config(config: &GridConfig, today: NaiveDate) -> Self {
        let days = if config.days == WEEK_DAYS {
            day_labels(today)
        } else {
            (1..=config.days).map(|n| format!("Day {n}")).collect()
        };
        let times = time_labels(config.start_hour, config.slots, config.slot_minutes);
        Self { days, times }
    }

    /// Check both label axes against the matrix shape.
    pub fn validate(&self, matrix: &AvailabilityMatrix) -> Result<()> {
        if self.days.len() != matrix.days() {
            return Err(GridError::DimensionMismatch {
                axis: Axis::Days,
                expected: matrix.days(),
                found: self.days.len(),
            });
        }
        if self.times.len() != matrix.slots() {
            return Err(GridError::DimensionMismatch {
                axis: Axis::Slots,
                expected: matrix.slots(),
                found: self.times.len(),
            });
        }
        Ok(())
    }
}

/// The first Sunday strictly after `today`. A Sunday maps to the next one.
pub fn next_sunday(today: NaiveDate) -> NaiveDate {
    let offset = 7 - u64::from(today.weekday().num_days_from_sunday());
    today + Days::new(offset)
}

/// Seven `"Sun 3/8"`-style labels for the week beginning on the upcoming Sunday.
pub fn day_labels(today: NaiveDate) -> Vec<String> {
    next_sunday(today)
        .iter_days()
        .take(WEEK_DAYS)
        .map(|date| date.format("%a %-m/%-d").to_string())
        .collect()
}

/// `count` clock labels starting at `start_hour`, `slot_minutes` apart.
pub fn time_labels(start_hour: u32, count: usize, slot_minutes: u32) -> Vec<String> {
    let config = GridConfig {
        slots: count,
        start_hour,
        slot_minutes,
        ..GridConfig::default()
    };
    (0..count)
        .map(|slot| clock_label(config.slot_start_minute(slot)))
        .collect()
}

/// 48 half-hour labels from 7:00 AM.
pub fn default_time_labels() -> Vec<String> {
    let config = GridConfig::default();
    time_labels(config.start_hour, config.slots, config.slot_minutes)
}

/// Render a minute-of-day as `"7:30 AM"`.
pub fn clock_label(minute_of_day: u32) -> String {
    NaiveTime::from_num_seconds_from_midnight_opt((minute_of_day % (24 * 60)) * 60, 0)
        .unwrap_or_default()
        .format("%-I:%M %p")
        .to_string()
}
