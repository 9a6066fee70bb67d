//! The availability matrix: a rectangular day × slot grid of booleans.
//!
//! The matrix is validated once at construction and cannot become ragged
//! afterwards: all mutation goes through cell-level setters that respect the
//! fixed shape.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::geometry::{Cell, CellRect};

/// Days in the default scheduling week.
pub const WEEK_DAYS: usize = 7;
/// Half-hour slots per default day.
pub const DAY_SLOTS: usize = 48;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct AvailabilityMatrix {
    rows: Vec<Vec<bool>>,
    slots: usize,
}

impl AvailabilityMatrix {
    /// An all-unselected matrix of the given shape.
    pub fn new(days: usize, slots: usize) -> Self {
        Self {
            rows: vec![vec![false; slots]; days],
            slots,
        }
    }

    /// An empty 7 × 48 week.
    pub fn blank_week() -> Self {
        Self::new(WEEK_DAYS, DAY_SLOTS)
    }

    /// Build a matrix from raw rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let slots = rows.first().map_or(0, Vec::len);
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != slots)
        {
            return Err(GridError::NonRectangular {
                row,
                expected: slots,
                found,
            });
        }
        Ok(Self { rows, slots })
    }

    pub fn days(&self) -> usize {
        self.rows.len()
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<bool>> {
        self.rows
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.day < self.days() && cell.slot < self.slots
    }

    pub fn get(&self, cell: Cell) -> Option<bool> {
        self.rows.get(cell.day)?.get(cell.slot).copied()
    }

    pub fn is_selected(&self, cell: Cell) -> bool {
        self.get(cell).unwrap_or(false)
    }

    pub fn set(&mut self, cell: Cell, value: bool) -> Result<()> {
        let slot = self.cell_mut(cell)?;
        *slot = value;
        Ok(())
    }

    /// Flip a cell and return its new value.
    pub fn toggle(&mut self, cell: Cell) -> Result<bool> {
        let slot = self.cell_mut(cell)?;
        *slot = !*slot;
        Ok(*slot)
    }

    /// Set every cell in `rect` to `value`.
    pub fn fill(&mut self, rect: CellRect, value: bool) -> Result<()> {
        self.check(rect.last())?;
        for row in &mut self.rows[rect.days()] {
            row[rect.slots()].fill(value);
        }
        Ok(())
    }

    /// Copy the cells of `rect` from `source`, which must share this shape.
    pub(crate) fn restore_from(&mut self, source: &AvailabilityMatrix, rect: CellRect) {
        for day in rect.days() {
            self.rows[day][rect.slots()].copy_from_slice(&source.rows[day][rect.slots()]);
        }
    }

    pub fn selected_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&v| v).count()
    }

    fn check(&self, cell: Cell) -> Result<()> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                day: cell.day,
                slot: cell.slot,
                days: self.days(),
                slots: self.slots,
            })
        }
    }

    fn cell_mut(&mut self, cell: Cell) -> Result<&mut bool> {
        self.check(cell)?;
        Ok(&mut self.rows[cell.day][cell.slot])
    }
}

impl TryFrom<Vec<Vec<bool>>> for AvailabilityMatrix {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<AvailabilityMatrix> for Vec<Vec<bool>> {
    fn from(matrix: AvailabilityMatrix) -> Self {
        matrix.rows
    }
}
