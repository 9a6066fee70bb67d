//! Collapse a matrix into contiguous selected ranges per day.
//!
//! Adjacent selected slots merge into a single range, the same way adjacent
//! busy periods merge when computing free time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::labels::{clock_label, next_sunday, LabelSet};
use crate::matrix::AvailabilityMatrix;

/// A run of selected slots on one day. `end_slot` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRange {
    pub day: usize,
    pub start_slot: usize,
    pub end_slot: usize,
}

impl SlotRange {
    pub fn len(&self) -> usize {
        self.end_slot - self.start_slot
    }

    pub fn duration_minutes(&self, slot_minutes: u32) -> u64 {
        self.len() as u64 * u64::from(slot_minutes)
    }
}

/// Every maximal run of selected slots, sorted by day then slot.
pub fn selected_ranges(matrix: &AvailabilityMatrix) -> Vec<SlotRange> {
    let mut ranges = Vec::new();
    for (day, row) in matrix.rows().iter().enumerate() {
        let mut start: Option<usize> = None;
        for (slot, &selected) in row.iter().enumerate() {
            match (selected, start) {
                (true, None) => start = Some(slot),
                (false, Some(s)) => {
                    ranges.push(SlotRange {
                        day,
                        start_slot: s,
                        end_slot: slot,
                    });
                    start = None;
                }
                _ => {}
            }
        }
        // Trailing run that reaches the last slot.
        if let Some(s) = start {
            ranges.push(SlotRange {
                day,
                start_slot: s,
                end_slot: row.len(),
            });
        }
    }
    ranges
}

/// Human-readable lines such as `"Sun 3/8: 9:00 AM - 10:30 AM"`.
///
/// Times come from the configured clock, so a range that ends on the last
/// slot still gets an end time even though no label exists for it.
pub fn describe_ranges(
    matrix: &AvailabilityMatrix,
    labels: &LabelSet,
    config: &GridConfig,
) -> Vec<String> {
    selected_ranges(matrix)
        .into_iter()
        .map(|range| {
            let day = labels
                .days
                .get(range.day)
                .cloned()
                .unwrap_or_else(|| format!("Day {}", range.day + 1));
            format!(
                "{}: {} - {}",
                day,
                clock_label(config.slot_start_minute(range.start_slot)),
                clock_label(config.slot_start_minute(range.end_slot)),
            )
        })
        .collect()
}

/// The "week of" date shown when confirming a sign-up.
pub fn week_of(today: NaiveDate) -> String {
    next_sunday(today).format("%-m/%-d/%Y").to_string()
}
