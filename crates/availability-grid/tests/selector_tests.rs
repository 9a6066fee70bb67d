//! Tests for the drag-to-select state machine.

use std::cell::RefCell;
use std::rc::Rc;

use availability_grid::{
    AvailabilityMatrix, Cell, CellRect, DragState, GridError, GridSelector, LabelSet, PaintPolicy,
    PointerEvent,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

type Commits = Rc<RefCell<Vec<AvailabilityMatrix>>>;

/// A selector whose commits are recorded into the returned vector.
fn recording(
    matrix: AvailabilityMatrix,
) -> (GridSelector<impl FnMut(&AvailabilityMatrix)>, Commits) {
    let commits: Commits = Rc::default();
    let sink = {
        let commits = Rc::clone(&commits);
        move |m: &AvailabilityMatrix| commits.borrow_mut().push(m.clone())
    };
    let selector = GridSelector::new(matrix, None, sink).unwrap();
    (selector, commits)
}

/// A 7×48 week with a checkerboard pattern, so paint values differ by cell.
fn checkerboard() -> AvailabilityMatrix {
    let rows = (0..7)
        .map(|d| (0..48).map(|t| (d + t) % 2 == 0).collect())
        .collect();
    AvailabilityMatrix::from_rows(rows).unwrap()
}

fn expected_after_drag(original: &AvailabilityMatrix, anchor: Cell, to: Cell) -> AvailabilityMatrix {
    let paint = !original.is_selected(anchor);
    let mut expected = original.clone();
    expected.fill(CellRect::spanning(anchor, to), paint).unwrap();
    expected
}

// ── Drag paints the bounding rectangle ──────────────────────────────────────

#[test]
fn drag_paints_rectangle_with_negated_anchor_value() {
    let original = checkerboard();
    let (mut selector, commits) = recording(original.clone());

    selector.pointer_down(Cell::new(2, 10)).unwrap();
    selector.pointer_enter(Cell::new(4, 15)).unwrap();
    assert!(selector.pointer_up());

    // (2,10) is selected in the checkerboard, so the rectangle is cleared.
    for day in 0..7 {
        for slot in 0..48 {
            let cell = Cell::new(day, slot);
            let inside = (2..=4).contains(&day) && (10..=15).contains(&slot);
            let expected = if inside {
                !original.is_selected(Cell::new(2, 10))
            } else {
                original.is_selected(cell)
            };
            assert_eq!(selector.matrix().is_selected(cell), expected, "cell {cell:?}");
        }
    }
    assert_eq!(commits.borrow().len(), 1);
    assert_eq!(&commits.borrow()[0], selector.matrix());
}

#[test]
fn reversed_drag_covers_same_rectangle_with_its_own_paint_value() {
    let original = checkerboard();

    let (mut forward, _) = recording(original.clone());
    forward.pointer_down(Cell::new(2, 10)).unwrap();
    forward.pointer_enter(Cell::new(4, 15)).unwrap();
    forward.pointer_up();

    let (mut backward, _) = recording(original.clone());
    backward.pointer_down(Cell::new(4, 15)).unwrap();
    backward.pointer_enter(Cell::new(2, 10)).unwrap();
    backward.pointer_up();

    assert_eq!(
        forward.matrix(),
        &expected_after_drag(&original, Cell::new(2, 10), Cell::new(4, 15))
    );
    assert_eq!(
        backward.matrix(),
        &expected_after_drag(&original, Cell::new(4, 15), Cell::new(2, 10))
    );
    // (2,10) is selected and (4,15) is not: opposite paint values.
    assert!(!forward.matrix().is_selected(Cell::new(3, 12)));
    assert!(backward.matrix().is_selected(Cell::new(3, 12)));
}

#[test]
fn drag_across_mixed_axes() {
    // Anchor below-right, current above-left.
    let (mut selector, _) = recording(AvailabilityMatrix::new(5, 5));
    selector.pointer_down(Cell::new(3, 1)).unwrap();
    selector.pointer_enter(Cell::new(1, 3)).unwrap();
    selector.pointer_up();
    assert_eq!(selector.matrix().selected_count(), 9);
    assert!(selector.matrix().is_selected(Cell::new(1, 1)));
    assert!(selector.matrix().is_selected(Cell::new(3, 3)));
}

// ── Single clicks ───────────────────────────────────────────────────────────

#[test]
fn click_flips_only_the_anchor() {
    let original = checkerboard();
    let (mut selector, commits) = recording(original.clone());

    selector.pointer_down(Cell::new(5, 20)).unwrap();
    assert!(selector.pointer_up());

    let mut expected = original;
    expected.toggle(Cell::new(5, 20)).unwrap();
    assert_eq!(selector.matrix(), &expected);
    assert_eq!(commits.borrow().len(), 1);
}

#[test]
fn two_clicks_restore_the_cell() {
    let (mut selector, commits) = recording(AvailabilityMatrix::new(2, 2));
    for _ in 0..2 {
        selector.pointer_down(Cell::new(1, 0)).unwrap();
        selector.pointer_up();
    }
    assert_eq!(selector.matrix().selected_count(), 0);
    assert_eq!(commits.borrow().len(), 2);
}

// ── No-ops ──────────────────────────────────────────────────────────────────

#[test]
fn release_without_press_is_a_noop() {
    let original = checkerboard();
    let (mut selector, commits) = recording(original.clone());

    assert!(!selector.pointer_up());
    assert_eq!(selector.matrix(), &original);
    assert!(commits.borrow().is_empty());
}

#[test]
fn enter_while_idle_is_a_noop() {
    let (mut selector, commits) = recording(AvailabilityMatrix::new(3, 3));
    selector.pointer_enter(Cell::new(2, 2)).unwrap();
    assert_eq!(selector.matrix().selected_count(), 0);
    assert_eq!(selector.state(), &DragState::Idle);
    assert!(commits.borrow().is_empty());
}

// ── Commit timing ───────────────────────────────────────────────────────────

#[test]
fn commit_fires_once_per_gesture_and_never_on_enter() {
    let (mut selector, commits) = recording(AvailabilityMatrix::blank_week());

    selector.pointer_down(Cell::new(0, 0)).unwrap();
    for slot in 1..10 {
        selector.pointer_enter(Cell::new(0, slot)).unwrap();
        assert!(commits.borrow().is_empty(), "commit fired during drag");
    }
    selector.pointer_up();
    selector.pointer_up();
    assert_eq!(commits.borrow().len(), 1);
    assert_eq!(commits.borrow()[0].selected_count(), 10);
}

#[test]
fn handle_dispatches_events() {
    let (mut selector, commits) = recording(AvailabilityMatrix::new(3, 3));
    let events = [
        PointerEvent::Down(Cell::new(0, 0)),
        PointerEvent::Enter(Cell::new(1, 1)),
        PointerEvent::Up,
    ];
    let fired: Vec<bool> = events
        .into_iter()
        .map(|e| selector.handle(e).unwrap())
        .collect();
    assert_eq!(fired, vec![false, false, true]);
    assert_eq!(commits.borrow()[0].selected_count(), 4);
}

// ── Shrinking drags ─────────────────────────────────────────────────────────

#[test]
fn cumulative_policy_keeps_cells_painted_after_shrink() {
    let (mut selector, _) = recording(AvailabilityMatrix::new(4, 4));
    assert_eq!(selector.policy(), PaintPolicy::Cumulative);

    selector.pointer_down(Cell::new(0, 0)).unwrap();
    selector.pointer_enter(Cell::new(3, 3)).unwrap();
    selector.pointer_enter(Cell::new(1, 1)).unwrap();
    selector.pointer_up();

    assert_eq!(selector.matrix().selected_count(), 16);
}

#[test]
fn restore_policy_reverts_cells_outside_shrunk_rectangle() {
    let mut original = AvailabilityMatrix::new(4, 4);
    original.set(Cell::new(3, 3), true).unwrap();
    let (selector, _) = recording(original.clone());
    let mut selector = selector.with_policy(PaintPolicy::RestoreOutside);

    selector.pointer_down(Cell::new(0, 0)).unwrap();
    selector.pointer_enter(Cell::new(3, 3)).unwrap();
    assert_eq!(selector.matrix().selected_count(), 16);
    selector.pointer_enter(Cell::new(1, 1)).unwrap();
    selector.pointer_up();

    assert_eq!(
        selector.matrix(),
        &expected_after_drag(&original, Cell::new(0, 0), Cell::new(1, 1))
    );
    // The pre-existing selection outside the final rectangle survives.
    assert!(selector.matrix().is_selected(Cell::new(3, 3)));
}

#[test]
fn wandering_back_to_the_anchor_commits_a_click() {
    let (selector, commits) = recording(AvailabilityMatrix::new(3, 3));
    let mut selector = selector.with_policy(PaintPolicy::RestoreOutside);

    selector.pointer_down(Cell::new(1, 1)).unwrap();
    selector.pointer_enter(Cell::new(2, 2)).unwrap();
    selector.pointer_enter(Cell::new(1, 1)).unwrap();
    assert!(selector.pointer_up());

    assert_eq!(selector.matrix().selected_count(), 1);
    assert!(selector.matrix().is_selected(Cell::new(1, 1)));
    assert_eq!(commits.borrow().len(), 1);
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn mismatched_labels_fail_fast() {
    let labels = LabelSet::new(vec!["Mon".into(), "Tue".into()], vec!["9:00 AM".into()]);
    let result = GridSelector::new(AvailabilityMatrix::new(3, 1), Some(labels), |_: &AvailabilityMatrix| {});
    assert!(matches!(
        result,
        Err(GridError::DimensionMismatch {
            expected: 3,
            found: 2,
            ..
        })
    ));
}

#[test]
fn default_labels_follow_matrix_shape() {
    let (selector, _) = recording(AvailabilityMatrix::new(3, 6));
    assert_eq!(selector.labels().days, vec!["Day 1", "Day 2", "Day 3"]);
    assert_eq!(selector.labels().times.len(), 6);
    assert_eq!(selector.labels().times[0], "7:00 AM");
}

#[test]
fn enter_out_of_bounds_is_an_error_and_keeps_drag() {
    let (mut selector, _) = recording(AvailabilityMatrix::new(2, 2));
    selector.pointer_down(Cell::new(0, 0)).unwrap();
    assert!(matches!(
        selector.pointer_enter(Cell::new(0, 9)),
        Err(GridError::OutOfBounds { slot: 9, .. })
    ));
    assert!(selector.is_dragging());
    assert_eq!(selector.matrix().selected_count(), 0);
}

#[test]
fn set_labels_validates_shape() {
    let (mut selector, _) = recording(AvailabilityMatrix::new(1, 2));
    let bad = LabelSet::new(vec!["Mon".into()], vec!["9:00 AM".into()]);
    assert!(selector.set_labels(bad).is_err());
    let good = LabelSet::new(vec!["Mon".into()], vec!["9:00 AM".into(), "9:30 AM".into()]);
    assert!(selector.set_labels(good).is_ok());
    assert_eq!(selector.labels().days, vec!["Mon"]);
}
