//! Persistence boundary for submitted availability.
//!
//! The real service is remote; callers go through [`AvailabilityStore`] and
//! handle failures themselves. There is no retry or backoff here.

use std::collections::HashMap;

use tracing::info;

use crate::error::StoreError;
use crate::wire::InterviewAvailability;

pub trait AvailabilityStore {
    fn save(&mut self, availability: &InterviewAvailability) -> Result<(), StoreError>;

    fn load(&self, user_id: u64) -> Result<Option<InterviewAvailability>, StoreError>;
}

/// In-process store keyed by user id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<u64, InterviewAvailability>,
    /// Required shape, when the store enforces one.
    shape: Option<(usize, usize)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects matrices not shaped `days` × `slots`.
    pub fn with_shape(days: usize, slots: usize) -> Self {
        Self {
            records: HashMap::new(),
            shape: Some((days, slots)),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl AvailabilityStore for MemoryStore {
    fn save(&mut self, availability: &InterviewAvailability) -> Result<(), StoreError> {
        let matrix = &availability.availability;
        if let Some((days, slots)) = self.shape {
            if (matrix.days(), matrix.slots()) != (days, slots) {
                return Err(StoreError::Rejected {
                    user_id: availability.user_id,
                    reason: format!(
                        "expected {days}x{slots} matrix, got {}x{}",
                        matrix.days(),
                        matrix.slots()
                    ),
                });
            }
        }
        info!(
            user_id = availability.user_id,
            selected = matrix.selected_count(),
            "availability saved"
        );
        self.records
            .insert(availability.user_id, availability.clone());
        Ok(())
    }

    fn load(&self, user_id: u64) -> Result<Option<InterviewAvailability>, StoreError> {
        Ok(self.records.get(&user_id).cloned())
    }
}
