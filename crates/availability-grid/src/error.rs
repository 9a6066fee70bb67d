//! Error types for availability-grid operations.

use thiserror::Error;

/// Which label axis failed validation against the matrix shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Days,
    Slots,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Days => f.write_str("day"),
            Axis::Slots => f.write_str("time"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Non-rectangular matrix: row {row} has {found} slots, expected {expected}")]
    NonRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Dimension mismatch: {axis} labels have length {found}, matrix has {expected}")]
    DimensionMismatch {
        axis: Axis,
        expected: usize,
        found: usize,
    },

    #[error("Cell (day {day}, slot {slot}) is outside a {days}x{slots} grid")]
    OutOfBounds {
        day: usize,
        slot: usize,
        days: usize,
        slots: usize,
    },

    #[error("Cannot replace the matrix while a drag is in progress")]
    DragInProgress,

    #[error("Invalid grid configuration: {0}")]
    InvalidConfig(String),
}

/// Failure reported by an [`AvailabilityStore`](crate::store::AvailabilityStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Rejected availability for user {user_id}: {reason}")]
    Rejected { user_id: u64, reason: String },
}

pub type Result<T> = std::result::Result<T, GridError>;
