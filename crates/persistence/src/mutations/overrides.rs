// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule override mutations.

use clinic_schedule_domain::{DoctorId, OverrideId, ScheduleOverride};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, info};

use crate::columns::{encode_date, encode_timestamp};
use crate::diesel_schema::schedule_overrides;
use crate::error::PersistenceError;

/// Inserts an override.
///
/// The unique constraint on `override_date` is the final arbiter between
/// concurrent writers; its violation is reported as
/// `PersistenceError::DuplicateOverrideDate`.
///
/// # Errors
///
/// Returns an error if the date is taken, the assigned doctor does not
/// exist, or the insert fails.
pub fn insert_override(
    conn: &mut SqliteConnection,
    record: &ScheduleOverride,
) -> Result<(), PersistenceError> {
    let result: Result<usize, DieselError> = diesel::insert_into(schedule_overrides::table)
        .values((
            schedule_overrides::override_id.eq(record.override_id().as_str()),
            schedule_overrides::override_date.eq(encode_date(record.date())?),
            schedule_overrides::original_doctor_id
                .eq(record.original_doctor_id().map(DoctorId::as_str)),
            schedule_overrides::assigned_doctor_id.eq(record.assigned_doctor_id().as_str()),
            schedule_overrides::reason.eq(record.reason().value()),
            schedule_overrides::created_at.eq(encode_timestamp(record.created_at())?),
            schedule_overrides::updated_at.eq(encode_timestamp(record.updated_at())?),
        ))
        .execute(conn);

    match result {
        Ok(_) => {
            info!(
                override_id = %record.override_id(),
                date = %record.date(),
                "Inserted schedule override"
            );
            Ok(())
        }
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, details))
            if details.message().contains("override_date") =>
        {
            Err(PersistenceError::DuplicateOverrideDate(record.date()))
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Writes the mutable fields of an override: assigned doctor, reason and
/// `updated_at`.
///
/// # Errors
///
/// Returns an error if the override does not exist or the update fails.
pub fn update_override(
    conn: &mut SqliteConnection,
    record: &ScheduleOverride,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(schedule_overrides::table)
        .filter(schedule_overrides::override_id.eq(record.override_id().as_str()))
        .set((
            schedule_overrides::assigned_doctor_id.eq(record.assigned_doctor_id().as_str()),
            schedule_overrides::reason.eq(record.reason().value()),
            schedule_overrides::updated_at.eq(encode_timestamp(record.updated_at())?),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Schedule override {}",
            record.override_id()
        )));
    }

    info!(override_id = %record.override_id(), "Updated schedule override");
    Ok(())
}

/// Deletes an override. Deleting a missing id affects nothing.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_override(
    conn: &mut SqliteConnection,
    override_id: &OverrideId,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::delete(
        schedule_overrides::table.filter(schedule_overrides::override_id.eq(override_id.as_str())),
    )
    .execute(conn)?;

    debug!(%override_id, affected, "Deleted schedule override");
    Ok(())
}
