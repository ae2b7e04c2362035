// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Text encodings for date and timestamp columns.
//!
//! Timestamps are stored in UTC with a fixed six-digit fraction so that
//! lexical order in SQL matches chronological order.

use clinic_schedule_domain::{DoctorId, OverrideId};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::PersistenceError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
);

pub fn encode_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("date {date}: {e}")))
}

pub fn decode_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Failed to parse date '{value}': {e}"))
    })
}

pub fn encode_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .to_offset(UtcOffset::UTC)
        .format(TIMESTAMP_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("timestamp {value}: {e}")))
}

pub fn decode_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|e| {
            PersistenceError::ReconstructionError(format!(
                "Failed to parse timestamp '{value}': {e}"
            ))
        })
}

pub fn decode_doctor_id(value: &str) -> Result<DoctorId, PersistenceError> {
    DoctorId::parse(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

pub fn decode_override_id(value: &str) -> Result<OverrideId, PersistenceError> {
    OverrideId::parse(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}
