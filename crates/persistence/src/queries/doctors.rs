// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Doctor and schedule pattern queries.

use clinic_schedule_domain::{Doctor, DoctorId, DoctorPattern};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::columns::{decode_doctor_id, decode_timestamp};
use crate::diesel_schema::doctors;
use crate::error::PersistenceError;

/// Diesel Queryable struct for doctor rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = doctors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct DoctorRow {
    doctor_id: String,
    display_name: String,
    is_active: i32,
    schedule_pattern: Option<String>,
    created_at: String,
}

impl DoctorRow {
    fn into_doctor(self) -> Result<Doctor, PersistenceError> {
        Ok(Doctor {
            doctor_id: decode_doctor_id(&self.doctor_id)?,
            display_name: self.display_name,
            is_active: self.is_active != 0,
            schedule_pattern: self.schedule_pattern,
            created_at: decode_timestamp(&self.created_at)?,
        })
    }
}

/// Retrieves a doctor by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row is malformed.
/// Returns `Ok(None)` if the doctor is not found.
pub fn get_doctor(
    conn: &mut SqliteConnection,
    doctor_id: &DoctorId,
) -> Result<Option<Doctor>, PersistenceError> {
    debug!(%doctor_id, "Looking up doctor");

    let result: Result<DoctorRow, diesel::result::Error> = doctors::table
        .filter(doctors::doctor_id.eq(doctor_id.as_str()))
        .select(DoctorRow::as_select())
        .first(conn);

    match result {
        Ok(row) => row.into_doctor().map(Some),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists every doctor in creation order.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_doctors(conn: &mut SqliteConnection) -> Result<Vec<Doctor>, PersistenceError> {
    let rows: Vec<DoctorRow> = doctors::table
        .order((doctors::created_at.asc(), doctors::doctor_id.asc()))
        .select(DoctorRow::as_select())
        .load(conn)?;

    rows.into_iter().map(DoctorRow::into_doctor).collect()
}

/// Reads one doctor's pattern.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the doctor has no pattern or does not exist.
pub fn get_pattern(
    conn: &mut SqliteConnection,
    doctor_id: &DoctorId,
) -> Result<Option<String>, PersistenceError> {
    let result: Result<Option<String>, diesel::result::Error> = doctors::table
        .filter(doctors::doctor_id.eq(doctor_id.as_str()))
        .select(doctors::schedule_pattern)
        .first(conn);

    match result {
        Ok(pattern) => Ok(pattern),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists active doctors that have no pattern, in creation order.
///
/// # Errors
///
/// Returns an error if the query fails or an id is malformed.
pub fn list_doctors_missing_pattern(
    conn: &mut SqliteConnection,
) -> Result<Vec<DoctorId>, PersistenceError> {
    let ids: Vec<String> = doctors::table
        .filter(doctors::is_active.eq(1))
        .filter(doctors::schedule_pattern.is_null())
        .order((doctors::created_at.asc(), doctors::doctor_id.asc()))
        .select(doctors::doctor_id)
        .load(conn)?;

    ids.iter().map(String::as_str).map(decode_doctor_id).collect()
}

/// Lists the patterns of active doctors in creation order, then id.
///
/// # Errors
///
/// Returns an error if the query fails or an id is malformed.
pub fn list_patterns(conn: &mut SqliteConnection) -> Result<Vec<DoctorPattern>, PersistenceError> {
    let rows: Vec<(String, Option<String>)> = doctors::table
        .filter(doctors::is_active.eq(1))
        .filter(doctors::schedule_pattern.is_not_null())
        .order((doctors::created_at.asc(), doctors::doctor_id.asc()))
        .select((doctors::doctor_id, doctors::schedule_pattern))
        .load(conn)?;

    rows.into_iter()
        .filter_map(|(id, pattern)| pattern.map(|expression| (id, expression)))
        .map(|(id, expression)| {
            Ok(DoctorPattern {
                doctor_id: decode_doctor_id(&id)?,
                expression,
            })
        })
        .collect()
}
