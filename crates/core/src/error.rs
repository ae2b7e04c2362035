// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clinic_schedule_domain::{DoctorId, DomainError, OverrideId};
use thiserror::Error;
use time::Date;

/// Failures reported by store implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store's uniqueness constraint on override dates rejected a write.
    DuplicateOverrideDate(Date),
    /// Any other backend failure.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateOverrideDate(date) => {
                write!(f, "An override is already stored for {date}")
            }
            Self::Backend(msg) => write!(f, "Store backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors returned by the schedule use cases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),

    /// Another override already covers the date.
    #[error("A schedule override already exists for {0}")]
    OverrideAlreadyExists(Date),

    /// No override has the given id.
    #[error("Schedule override {0} not found")]
    OverrideNotFound(OverrideId),

    /// No doctor has the given id.
    #[error("Doctor {0} not found")]
    DoctorNotFound(DoctorId),

    /// The doctor exists but cannot take new assignments.
    #[error("Doctor {0} is inactive")]
    DoctorInactive(DoctorId),

    /// A stored pattern expression no longer parses.
    #[error("Stored schedule pattern is corrupt: {0}")]
    CorruptSchedulePattern(String),

    /// The store failed.
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl From<StoreError> for ScheduleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateOverrideDate(date) => Self::OverrideAlreadyExists(date),
            StoreError::Backend(msg) => Self::Storage(msg),
        }
    }
}
