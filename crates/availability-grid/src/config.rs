//! Grid shape and clock configuration.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::matrix::{AvailabilityMatrix, DAY_SLOTS, WEEK_DAYS};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Shape of the availability grid and the clock its columns map onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of day rows.
    pub days: usize,
    /// Number of time-slot columns per day.
    pub slots: usize,
    /// Hour (0-23) of the first slot.
    pub start_hour: u32,
    /// Length of one slot in minutes. Must divide a day evenly.
    pub slot_minutes: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            days: WEEK_DAYS,
            slots: DAY_SLOTS,
            start_hour: 7,
            slot_minutes: 30,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        if self.start_hour > 23 {
            return Err(GridError::InvalidConfig(format!(
                "start_hour must be 0-23, got {}",
                self.start_hour
            )));
        }
        if self.slot_minutes == 0 || MINUTES_PER_DAY % self.slot_minutes != 0 {
            return Err(GridError::InvalidConfig(format!(
                "slot_minutes must evenly divide a day, got {}",
                self.slot_minutes
            )));
        }
        Ok(())
    }

    /// An empty matrix of the configured shape.
    pub fn blank_matrix(&self) -> AvailabilityMatrix {
        AvailabilityMatrix::new(self.days, self.slots)
    }

    /// Minute of the day (0..1440) at which `slot` begins.
    pub fn slot_start_minute(&self, slot: usize) -> u32 {
        let offset = (slot as u64 * self.slot_minutes as u64) % MINUTES_PER_DAY as u64;
        ((self.start_hour % 24) * 60 + offset as u32) % MINUTES_PER_DAY
    }
}
