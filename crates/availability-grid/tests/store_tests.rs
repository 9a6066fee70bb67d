//! Tests for the persistence boundary and the submit flow around it.

use availability_grid::summary::week_of;
use availability_grid::wire::RawInterviewAvailability;
use availability_grid::{
    AvailabilityMatrix, AvailabilityStore, Cell, GridSelector, InterviewAvailability, MemoryStore,
    StoreError,
};
use chrono::NaiveDate;

#[test]
fn committed_matrix_round_trips_through_store() {
    let mut store = MemoryStore::with_shape(7, 48);
    let mut latest = None;
    {
        let mut selector = GridSelector::new(
            AvailabilityMatrix::blank_week(),
            None,
            |m: &AvailabilityMatrix| latest = Some(m.clone()),
        )
        .unwrap();
        selector.pointer_down(Cell::new(1, 4)).unwrap();
        selector.pointer_enter(Cell::new(1, 7)).unwrap();
        selector.pointer_up();
    }

    let record = InterviewAvailability {
        user_id: 7,
        availability: latest.expect("gesture committed"),
    };
    store.save(&record).unwrap();

    let loaded = store.load(7).unwrap().unwrap();
    assert_eq!(loaded.availability.selected_count(), 4);
    assert!(store.load(8).unwrap().is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn shaped_store_rejects_wrong_dimensions() {
    let mut store = MemoryStore::with_shape(7, 48);
    let record = InterviewAvailability {
        user_id: 3,
        availability: AvailabilityMatrix::new(5, 48),
    };
    let err = store.save(&record).unwrap_err();
    assert!(matches!(err, StoreError::Rejected { user_id: 3, .. }));
    assert!(store.is_empty());
}

#[test]
fn saving_twice_overwrites() {
    let mut store = MemoryStore::new();
    let mut availability = AvailabilityMatrix::new(1, 2);
    store
        .save(&InterviewAvailability {
            user_id: 1,
            availability: availability.clone(),
        })
        .unwrap();
    availability.set(Cell::new(0, 1), true).unwrap();
    store
        .save(&InterviewAvailability {
            user_id: 1,
            availability,
        })
        .unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.load(1).unwrap().unwrap().availability.selected_count(), 1);
}

#[test]
fn wire_form_uses_snake_case() {
    let record = InterviewAvailability {
        user_id: 11,
        availability: AvailabilityMatrix::new(1, 1),
    };
    let raw = RawInterviewAvailability::from(record);
    let json = serde_json::to_string(&raw).unwrap();
    assert_eq!(json, r#"{"user_id":11,"availability":[[false]]}"#);
}

#[test]
fn confirmation_week_matches_day_labels() {
    // Sat 2026-03-07 → week of Sun 2026-03-08.
    let today = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
    assert_eq!(week_of(today), "3/8/2026");
}
