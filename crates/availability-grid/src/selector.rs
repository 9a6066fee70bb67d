//! Drag-to-select controller for an availability grid.
//!
//! Pointer interactions are interpreted as a two-state machine:
//!
//! - `Idle → Dragging` on pointer-down over a cell. The paint value is fixed
//!   to the negation of that cell's value.
//! - `Dragging → Dragging` on pointer-enter over a new cell. The rectangle
//!   spanned by the anchor and the entered cell is painted.
//! - `Dragging → Idle` on pointer-up anywhere. If the pointer never left the
//!   anchor, the anchor is toggled as a single click. The commit sink then
//!   receives the full matrix, exactly once per gesture.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{GridError, Result};
use crate::geometry::{Cell, CellRect};
use crate::labels::LabelSet;
use crate::matrix::AvailabilityMatrix;

/// Receives the finished matrix at the end of every gesture.
///
/// The sink runs inside [`GridSelector::pointer_up`]. When the selector is
/// shared through a `RefCell` (see [`mount`](crate::release::mount)) it is
/// mutably borrowed for the whole call, so read the matrix from the argument
/// and never borrow the selector back from inside the sink.
pub trait CommitSink {
    fn commit(&mut self, matrix: &AvailabilityMatrix);
}

impl<F> CommitSink for F
where
    F: FnMut(&AvailabilityMatrix),
{
    fn commit(&mut self, matrix: &AvailabilityMatrix) {
        self(matrix)
    }
}

/// How a drag treats cells that leave the rectangle when it shrinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintPolicy {
    /// Paint straight into the live matrix. Cells painted by an earlier,
    /// larger rectangle stay painted when the drag shrinks back.
    #[default]
    Cumulative,
    /// Recompute every move from the matrix as it was at pointer-down, so
    /// shrinking the drag reverts cells outside the new rectangle.
    RestoreOutside,
}

/// A pointer interaction over the grid.
///
/// Serialized as `{"type": "down", "day": 2, "slot": 10}` or `{"type": "up"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down(Cell),
    Enter(Cell),
    Up,
}

/// An in-progress paint gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub anchor: Cell,
    pub paint: bool,
    pub last_entered: Cell,
    /// Last painted rectangle, used to restore cells under `RestoreOutside`.
    painted: Option<CellRect>,
    /// Matrix at pointer-down; only kept under `RestoreOutside`.
    snapshot: Option<AvailabilityMatrix>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

pub struct GridSelector<S> {
    matrix: AvailabilityMatrix,
    labels: LabelSet,
    policy: PaintPolicy,
    state: DragState,
    sink: S,
}

impl<S> std::fmt::Debug for GridSelector<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridSelector")
            .field("matrix", &self.matrix)
            .field("labels", &self.labels)
            .field("policy", &self.policy)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<S: CommitSink> GridSelector<S> {
    /// Create a selector over `matrix`.
    ///
    /// Supplied labels must match the matrix shape. When omitted, labels are
    /// generated for the current week.
    pub fn new(matrix: AvailabilityMatrix, labels: Option<LabelSet>, sink: S) -> Result<Self> {
        let labels = match labels {
            Some(labels) => labels,
            None => default_labels_for(&matrix),
        };
        labels.validate(&matrix)?;
        Ok(Self {
            matrix,
            labels,
            policy: PaintPolicy::default(),
            state: DragState::Idle,
            sink,
        })
    }

    pub fn with_policy(mut self, policy: PaintPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn matrix(&self) -> &AvailabilityMatrix {
        &self.matrix
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn policy(&self) -> PaintPolicy {
        self.policy
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn into_matrix(self) -> AvailabilityMatrix {
        self.matrix
    }

    /// Start a gesture at `cell`.
    pub fn pointer_down(&mut self, cell: Cell) -> Result<()> {
        let current = self.value_at(cell)?;
        let snapshot = match self.policy {
            PaintPolicy::Cumulative => None,
            PaintPolicy::RestoreOutside => Some(self.matrix.clone()),
        };
        debug!(day = cell.day, slot = cell.slot, paint = !current, "drag started");
        self.state = DragState::Dragging(DragSession {
            anchor: cell,
            paint: !current,
            last_entered: cell,
            painted: None,
            snapshot,
        });
        Ok(())
    }

    /// Extend the active gesture to `cell`. A no-op while idle.
    pub fn pointer_enter(&mut self, cell: Cell) -> Result<()> {
        let DragState::Dragging(session) = &mut self.state else {
            return Ok(());
        };
        if !self.matrix.in_bounds(cell) {
            return Err(out_of_bounds(&self.matrix, cell));
        }
        if session.last_entered == cell {
            return Ok(());
        }
        session.last_entered = cell;

        let rect = CellRect::spanning(session.anchor, cell);
        if let (Some(snapshot), Some(previous)) = (&session.snapshot, session.painted) {
            self.matrix.restore_from(snapshot, previous);
        }
        self.matrix.fill(rect, session.paint)?;
        session.painted = Some(rect);
        trace!(first = ?rect.first(), last = ?rect.last(), "painted rectangle");
        Ok(())
    }

    /// Finish the active gesture and commit. Returns whether a commit fired.
    pub fn pointer_up(&mut self) -> bool {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return false;
        };
        if session.last_entered == session.anchor {
            if let Some(snapshot) = &session.snapshot {
                if let Some(painted) = session.painted {
                    self.matrix.restore_from(snapshot, painted);
                }
            }
            // The anchor was bounds-checked at pointer-down and the matrix
            // cannot be replaced mid-drag.
            let anchored = self.matrix.set(session.anchor, session.paint);
            debug_assert!(anchored.is_ok(), "anchor left the grid during a drag");
        }
        debug!(selected = self.matrix.selected_count(), "drag committed");
        self.sink.commit(&self.matrix);
        true
    }

    /// Dispatch a single pointer event. Returns whether a commit fired.
    pub fn handle(&mut self, event: PointerEvent) -> Result<bool> {
        match event {
            PointerEvent::Down(cell) => self.pointer_down(cell).map(|_| false),
            PointerEvent::Enter(cell) => self.pointer_enter(cell).map(|_| false),
            PointerEvent::Up => Ok(self.pointer_up()),
        }
    }

    /// Replace the matrix from outside, e.g. after the caller reloads it.
    pub fn replace_matrix(&mut self, matrix: AvailabilityMatrix) -> Result<()> {
        if self.is_dragging() {
            return Err(GridError::DragInProgress);
        }
        self.labels.validate(&matrix)?;
        self.matrix = matrix;
        Ok(())
    }

    pub fn set_labels(&mut self, labels: LabelSet) -> Result<()> {
        labels.validate(&self.matrix)?;
        self.labels = labels;
        Ok(())
    }

    fn value_at(&self, cell: Cell) -> Result<bool> {
        self.matrix
            .get(cell)
            .ok_or_else(|| out_of_bounds(&self.matrix, cell))
    }
}

fn default_labels_for(matrix: &AvailabilityMatrix) -> LabelSet {
    let config = crate::config::GridConfig {
        days: matrix.days(),
        slots: matrix.slots(),
        ..Default::default()
    };
    LabelSet::for_config(&config, chrono::Local::now().date_naive())
}

fn out_of_bounds(matrix: &AvailabilityMatrix, cell: Cell) -> GridError {
    GridError::OutOfBounds {
        day: cell.day,
        slot: cell.slot,
        days: matrix.days(),
        slots: matrix.slots(),
    }
}
