// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage seams used by the schedule use cases.
//!
//! Methods take `&mut self` because the SQLite implementation needs a
//! mutable connection. Callers hold exclusive access for the length of a
//! use case.

use crate::error::StoreError;
use clinic_schedule_domain::{Doctor, DoctorId, DoctorPattern, OverrideId, ScheduleOverride};
use time::Date;

/// Persistent record of schedule overrides, at most one per date.
pub trait OverrideStore {
    /// Returns the override for `date`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn get_override_by_date(&mut self, date: Date) -> Result<Option<ScheduleOverride>, StoreError>;

    /// Returns the override with the given id, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn get_override_by_id(
        &mut self,
        override_id: &OverrideId,
    ) -> Result<Option<ScheduleOverride>, StoreError>;

    /// Returns every override ordered by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_overrides(&mut self) -> Result<Vec<ScheduleOverride>, StoreError>;

    /// Stores a new override.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateOverrideDate` if the date is already
    /// taken, even when a concurrent writer got there first.
    fn insert_override(&mut self, record: &ScheduleOverride)
    -> Result<ScheduleOverride, StoreError>;

    /// Replaces the stored override with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn update_override(&mut self, record: &ScheduleOverride)
    -> Result<ScheduleOverride, StoreError>;

    /// Removes the override with the given id. Removing a missing id is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn delete_override(&mut self, override_id: &OverrideId) -> Result<(), StoreError>;
}

/// Persistent record of each doctor's recurring pattern.
pub trait PatternStore {
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn get_pattern(&mut self, doctor_id: &DoctorId) -> Result<Option<String>, StoreError>;

    /// Sets the doctor's pattern, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn set_pattern(&mut self, doctor_id: &DoctorId, expression: &str) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn remove_pattern(&mut self, doctor_id: &DoctorId) -> Result<(), StoreError>;

    /// Returns active doctors with no pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_doctors_missing_pattern(&mut self) -> Result<Vec<DoctorId>, StoreError>;

    /// Returns the patterns of active doctors, ordered by doctor creation
    /// time and then id. Resolution picks the first claimant in this order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_patterns(&mut self) -> Result<Vec<DoctorPattern>, StoreError>;
}

/// The clinic's doctors.
pub trait DoctorDirectory {
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn get_doctor(&mut self, doctor_id: &DoctorId) -> Result<Option<Doctor>, StoreError>;

    /// Returns every doctor in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_doctors(&mut self) -> Result<Vec<Doctor>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn insert_doctor(&mut self, doctor: &Doctor) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn set_doctor_active(&mut self, doctor_id: &DoctorId, active: bool) -> Result<(), StoreError>;
}
