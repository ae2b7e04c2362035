// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule override queries.

use clinic_schedule_domain::{OverrideId, OverrideReason, ScheduleOverride};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Date;
use tracing::debug;

use crate::columns::{
    decode_date, decode_doctor_id, decode_override_id, decode_timestamp, encode_date,
};
use crate::diesel_schema::schedule_overrides;
use crate::error::PersistenceError;

/// Diesel Queryable struct for override rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = schedule_overrides)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct OverrideRow {
    override_id: String,
    override_date: String,
    original_doctor_id: Option<String>,
    assigned_doctor_id: String,
    reason: String,
    created_at: String,
    updated_at: String,
}

impl OverrideRow {
    fn into_override(self) -> Result<ScheduleOverride, PersistenceError> {
        let reconstruct = |e: clinic_schedule_domain::DomainError| {
            PersistenceError::ReconstructionError(format!(
                "Override {}: {e}",
                self.override_id
            ))
        };

        ScheduleOverride::new(
            decode_override_id(&self.override_id)?,
            decode_date(&self.override_date)?,
            self.original_doctor_id
                .as_deref()
                .map(decode_doctor_id)
                .transpose()?,
            decode_doctor_id(&self.assigned_doctor_id)?,
            OverrideReason::new(&self.reason).map_err(reconstruct)?,
            decode_timestamp(&self.created_at)?,
            decode_timestamp(&self.updated_at)?,
        )
        .map_err(reconstruct)
    }
}

fn first_override(
    result: Result<OverrideRow, diesel::result::Error>,
) -> Result<Option<ScheduleOverride>, PersistenceError> {
    match result {
        Ok(row) => row.into_override().map(Some),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves the override for a date.
///
/// # Errors
///
/// Returns an error if the query fails or the row is malformed.
/// Returns `Ok(None)` if no override exists for the date.
pub fn get_override_by_date(
    conn: &mut SqliteConnection,
    date: Date,
) -> Result<Option<ScheduleOverride>, PersistenceError> {
    debug!(%date, "Looking up schedule override by date");

    first_override(
        schedule_overrides::table
            .filter(schedule_overrides::override_date.eq(encode_date(date)?))
            .select(OverrideRow::as_select())
            .first(conn),
    )
}

/// Retrieves an override by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row is malformed.
/// Returns `Ok(None)` if the override is not found.
pub fn get_override_by_id(
    conn: &mut SqliteConnection,
    override_id: &OverrideId,
) -> Result<Option<ScheduleOverride>, PersistenceError> {
    debug!(%override_id, "Looking up schedule override by id");

    first_override(
        schedule_overrides::table
            .filter(schedule_overrides::override_id.eq(override_id.as_str()))
            .select(OverrideRow::as_select())
            .first(conn),
    )
}

/// Lists every override ordered by date.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_overrides(
    conn: &mut SqliteConnection,
) -> Result<Vec<ScheduleOverride>, PersistenceError> {
    let rows: Vec<OverrideRow> = schedule_overrides::table
        .order(schedule_overrides::override_date.asc())
        .select(OverrideRow::as_select())
        .load(conn)?;

    rows.into_iter().map(OverrideRow::into_override).collect()
}
