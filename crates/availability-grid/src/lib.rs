//! # availability-grid
//!
//! Headless core of a drag-to-select availability picker: a day × time-slot
//! boolean grid that a user paints with click-and-drag, reported back to the
//! caller once per gesture.
//!
//! ## Modules
//!
//! - [`matrix`] — Rectangular boolean availability matrix
//! - [`geometry`] — Cells and inclusive rectangles
//! - [`selector`] — Pointer-driven selection state machine
//! - [`release`] — Scoped document-level release listeners
//! - [`labels`] — Default day/time label generation
//! - [`summary`] — Contiguous selected ranges and their descriptions
//! - [`config`] — Grid shape and clock configuration
//! - [`wire`] — Availability records in service and client form
//! - [`store`] — Persistence boundary
//! - [`error`] — Error types

pub mod config;
pub mod error;
pub mod geometry;
pub mod labels;
pub mod matrix;
pub mod release;
pub mod selector;
pub mod store;
pub mod summary;
pub mod wire;

pub use config::GridConfig;
pub use error::{GridError, StoreError};
pub use geometry::{Cell, CellRect};
pub use labels::LabelSet;
pub use matrix::AvailabilityMatrix;
pub use release::{mount, ReleaseGuard, ReleaseScope, SharedSelector};
pub use selector::{CommitSink, DragSession, DragState, GridSelector, PaintPolicy, PointerEvent};
pub use store::{AvailabilityStore, MemoryStore};
pub use summary::{describe_ranges, selected_ranges, SlotRange};
pub use wire::InterviewAvailability;
