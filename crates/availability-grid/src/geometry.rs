//! Cell coordinates and inclusive rectangles over the grid.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// A single cell: `day` indexes rows, `slot` indexes columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub day: usize,
    pub slot: usize,
}

impl Cell {
    pub fn new(day: usize, slot: usize) -> Self {
        Self { day, slot }
    }
}

/// An inclusive, axis-aligned rectangle of cells.
///
/// Only [`CellRect::spanning`] builds one, so `first <= last` holds on both
/// axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRect {
    first_day: usize,
    last_day: usize,
    first_slot: usize,
    last_slot: usize,
}

impl CellRect {
    /// The bounding rectangle of two cells, inclusive on both ends.
    ///
    /// Each axis is ordered independently, so the result is the same whichever
    /// corner is passed first.
    pub fn spanning(a: Cell, b: Cell) -> Self {
        Self {
            first_day: a.day.min(b.day),
            last_day: a.day.max(b.day),
            first_slot: a.slot.min(b.slot),
            last_slot: a.slot.max(b.slot),
        }
    }

    /// Top-left corner.
    pub fn first(&self) -> Cell {
        Cell::new(self.first_day, self.first_slot)
    }

    /// Bottom-right corner.
    pub fn last(&self) -> Cell {
        Cell::new(self.last_day, self.last_slot)
    }

    pub fn days(&self) -> RangeInclusive<usize> {
        self.first_day..=self.last_day
    }

    pub fn slots(&self) -> RangeInclusive<usize> {
        self.first_slot..=self.last_slot
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.first_day..=self.last_day).contains(&cell.day)
            && (self.first_slot..=self.last_slot).contains(&cell.slot)
    }

    /// Number of cells covered. Never zero.
    pub fn len(&self) -> usize {
        (self.last_day - self.first_day + 1) * (self.last_slot - self.first_slot + 1)
    }

    /// Iterate covered cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.first_day..=self.last_day).flat_map(move |day| {
            (self.first_slot..=self.last_slot).map(move |slot| Cell { day, slot })
        })
    }
}
