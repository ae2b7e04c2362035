// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Override lifecycle: create, update, delete.

use crate::clock::Clock;
use crate::command::{CreateOverrideCommand, UpdateOverrideCommand};
use crate::error::ScheduleError;
use crate::ids::new_override_id;
use crate::store::{DoctorDirectory, OverrideStore};
use clinic_schedule_domain::{
    Doctor, DoctorId, DomainError, OverrideId, ScheduleOverride, validate_not_in_past,
};
use time::{Date, OffsetDateTime};
use tracing::{debug, info};

/// Confirms that `doctor_id` names an active doctor.
pub(crate) fn require_active_doctor<S: DoctorDirectory + ?Sized>(
    store: &mut S,
    doctor_id: &DoctorId,
) -> Result<Doctor, ScheduleError> {
    let doctor: Doctor = store
        .get_doctor(doctor_id)?
        .ok_or_else(|| ScheduleError::DoctorNotFound(doctor_id.clone()))?;

    if !doctor.is_active {
        return Err(ScheduleError::DoctorInactive(doctor_id.clone()));
    }

    Ok(doctor)
}

/// Override use cases bound to a store and a clock.
pub struct ScheduleOverrides<'a, S: ?Sized, C: ?Sized> {
    store: &'a mut S,
    clock: &'a C,
}

impl<'a, S, C> ScheduleOverrides<'a, S, C>
where
    S: OverrideStore + DoctorDirectory + ?Sized,
    C: Clock + ?Sized,
{
    pub const fn new(store: &'a mut S, clock: &'a C) -> Self {
        Self { store, clock }
    }

    /// Creates an override.
    ///
    /// The original doctor is stored as supplied; it is never derived from
    /// the current patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The date is before the clinic-local today
    /// - An override already exists for the date, including one written by a
    ///   concurrent caller between the check and the insert
    /// - The assigned doctor does not exist or is inactive
    /// - The assigned doctor is also the original doctor
    /// - The store fails
    pub fn create(
        &mut self,
        command: CreateOverrideCommand,
    ) -> Result<ScheduleOverride, ScheduleError> {
        let today: Date = self.clock.today()?;
        validate_not_in_past(command.date, today)?;

        if self.store.get_override_by_date(command.date)?.is_some() {
            return Err(ScheduleError::OverrideAlreadyExists(command.date));
        }

        require_active_doctor(&mut *self.store, &command.assigned_doctor_id)?;

        let now: OffsetDateTime = self.clock.now();
        let record: ScheduleOverride = ScheduleOverride::new(
            new_override_id(),
            command.date,
            command.original_doctor_id,
            command.assigned_doctor_id,
            command.reason,
            now,
            now,
        )?;

        let stored: ScheduleOverride = self.store.insert_override(&record)?;

        info!(
            override_id = %stored.override_id(),
            date = %stored.date(),
            assigned_doctor_id = %stored.assigned_doctor_id(),
            "Created schedule override"
        );

        Ok(stored)
    }

    /// Applies the supplied fields to an existing override.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The override does not exist
    /// - Neither field is supplied
    /// - A new assigned doctor does not exist or is inactive
    /// - The result would assign the original doctor
    /// - The store fails
    pub fn update(
        &mut self,
        command: UpdateOverrideCommand,
    ) -> Result<ScheduleOverride, ScheduleError> {
        let existing: ScheduleOverride = self
            .store
            .get_override_by_id(&command.override_id)?
            .ok_or_else(|| ScheduleError::OverrideNotFound(command.override_id.clone()))?;

        if command.reason.is_none() && command.assigned_doctor_id.is_none() {
            return Err(DomainError::EmptyOverrideUpdate.into());
        }

        if let Some(assigned) = command
            .assigned_doctor_id
            .as_ref()
            .filter(|assigned| *assigned != existing.assigned_doctor_id())
        {
            require_active_doctor(&mut *self.store, assigned)?;
        }

        let updated: ScheduleOverride = existing.apply_update(
            command.reason,
            command.assigned_doctor_id,
            self.clock.now(),
        )?;
        let stored: ScheduleOverride = self.store.update_override(&updated)?;

        info!(
            override_id = %stored.override_id(),
            date = %stored.date(),
            assigned_doctor_id = %stored.assigned_doctor_id(),
            "Updated schedule override"
        );

        Ok(stored)
    }

    /// Deletes an override, returning the removed record. The date falls
    /// back to pattern resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if the override does not exist or the store fails.
    pub fn delete(&mut self, override_id: &OverrideId) -> Result<ScheduleOverride, ScheduleError> {
        let existing: ScheduleOverride = self
            .store
            .get_override_by_id(override_id)?
            .ok_or_else(|| ScheduleError::OverrideNotFound(override_id.clone()))?;

        self.store.delete_override(override_id)?;

        info!(
            override_id = %override_id,
            date = %existing.date(),
            "Deleted schedule override"
        );

        Ok(existing)
    }

    /// Deletes the override for `date` if one exists. A date with no
    /// override is left alone and reported as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn delete_by_date(&mut self, date: Date) -> Result<Option<ScheduleOverride>, ScheduleError> {
        match self.store.get_override_by_date(date)? {
            Some(existing) => self.delete(existing.override_id()).map(Some),
            None => {
                debug!(%date, "No schedule override to delete");
                Ok(None)
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn find_by_date(&mut self, date: Date) -> Result<Option<ScheduleOverride>, ScheduleError> {
        debug!(%date, "Looking up schedule override");
        Ok(self.store.get_override_by_date(date)?)
    }

    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn list(&mut self) -> Result<Vec<ScheduleOverride>, ScheduleError> {
        Ok(self.store.list_overrides()?)
    }
}
