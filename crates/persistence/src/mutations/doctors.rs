// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Doctor and schedule pattern mutations.

use clinic_schedule_domain::{Doctor, DoctorId};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::columns::encode_timestamp;
use crate::diesel_schema::doctors;
use crate::error::PersistenceError;

/// Fails with `NotFound` when an update touched no doctor row.
fn require_doctor_row(affected: usize, doctor_id: &DoctorId) -> Result<(), PersistenceError> {
    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("Doctor {doctor_id}")));
    }
    Ok(())
}

/// Inserts a doctor.
///
/// # Errors
///
/// Returns an error if the id is already taken or the insert fails.
pub fn insert_doctor(conn: &mut SqliteConnection, doctor: &Doctor) -> Result<(), PersistenceError> {
    diesel::insert_into(doctors::table)
        .values((
            doctors::doctor_id.eq(doctor.doctor_id.as_str()),
            doctors::display_name.eq(&doctor.display_name),
            doctors::is_active.eq(i32::from(doctor.is_active)),
            doctors::schedule_pattern.eq(doctor.schedule_pattern.as_deref()),
            doctors::created_at.eq(encode_timestamp(doctor.created_at)?),
        ))
        .execute(conn)?;

    info!(doctor_id = %doctor.doctor_id, "Inserted doctor");
    Ok(())
}

/// Sets a doctor's active flag.
///
/// # Errors
///
/// Returns an error if the doctor does not exist or the update fails.
pub fn set_doctor_active(
    conn: &mut SqliteConnection,
    doctor_id: &DoctorId,
    active: bool,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(doctors::table)
        .filter(doctors::doctor_id.eq(doctor_id.as_str()))
        .set(doctors::is_active.eq(i32::from(active)))
        .execute(conn)?;
    require_doctor_row(affected, doctor_id)?;

    info!(%doctor_id, active, "Updated doctor status");
    Ok(())
}

/// Replaces a doctor's pattern.
///
/// # Errors
///
/// Returns an error if the doctor does not exist or the update fails.
pub fn set_pattern(
    conn: &mut SqliteConnection,
    doctor_id: &DoctorId,
    expression: &str,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(doctors::table)
        .filter(doctors::doctor_id.eq(doctor_id.as_str()))
        .set(doctors::schedule_pattern.eq(Some(expression)))
        .execute(conn)?;
    require_doctor_row(affected, doctor_id)?;

    debug!(%doctor_id, pattern = expression, "Stored schedule pattern");
    Ok(())
}

/// Clears a doctor's pattern.
///
/// # Errors
///
/// Returns an error if the doctor does not exist or the update fails.
pub fn remove_pattern(
    conn: &mut SqliteConnection,
    doctor_id: &DoctorId,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(doctors::table)
        .filter(doctors::doctor_id.eq(doctor_id.as_str()))
        .set(doctors::schedule_pattern.eq(None::<String>))
        .execute(conn)?;
    require_doctor_row(affected, doctor_id)?;

    debug!(%doctor_id, "Cleared schedule pattern");
    Ok(())
}
