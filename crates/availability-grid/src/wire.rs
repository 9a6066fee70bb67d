//! Availability records as exchanged with the scheduling service.
//!
//! The service speaks snake_case (`user_id`), the client-side records use
//! camelCase (`userId`). Both directions validate the matrix shape.

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::matrix::AvailabilityMatrix;

/// A member's submitted availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewAvailability {
    pub user_id: u64,
    pub availability: AvailabilityMatrix,
}

/// Service wire form of [`InterviewAvailability`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInterviewAvailability {
    pub user_id: u64,
    pub availability: Vec<Vec<bool>>,
}

impl TryFrom<RawInterviewAvailability> for InterviewAvailability {
    type Error = GridError;

    fn try_from(raw: RawInterviewAvailability) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: raw.user_id,
            availability: AvailabilityMatrix::from_rows(raw.availability)?,
        })
    }
}

impl From<InterviewAvailability> for RawInterviewAvailability {
    fn from(value: InterviewAvailability) -> Self {
        Self {
            user_id: value.user_id,
            availability: value.availability.into_rows(),
        }
    }
}

/// How many members have signed up for the current interview pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewPoolStatus {
    pub number_sign_up: u32,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInterviewPoolStatus {
    pub number_sign_up: u32,
    pub members: Vec<String>,
}

impl From<RawInterviewPoolStatus> for InterviewPoolStatus {
    fn from(raw: RawInterviewPoolStatus) -> Self {
        Self {
            number_sign_up: raw.number_sign_up,
            members: raw.members,
        }
    }
}
