// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the clinic doctor schedule.
//!
//! Stores doctors, their recurring patterns and date overrides in `SQLite`
//! through Diesel, and implements the store traits the schedule use cases
//! are written against.
//!
//! ## Schema
//!
//! Migrations are embedded at compile time and applied when a connection
//! is opened. `schedule_overrides.override_date` carries a unique
//! constraint; concurrent creators racing for the same date are separated
//! by the database, not by the check the use case performs first.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives every caller its own shared-cache
//! in-memory database, so tests never see each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use clinic_schedule::{DoctorDirectory, OverrideStore, PatternStore, StoreError};
use clinic_schedule_domain::{Doctor, DoctorId, DoctorPattern, OverrideId, ScheduleOverride};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod columns;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Type alias used by the server and API layers.
pub type SqlitePersistence = Persistence;

/// `SQLite` persistence adapter.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        Self::verified(conn)
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        Self::verified(conn)
    }

    fn verified(mut conn: SqliteConnection) -> Result<Self, PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;
        backend::sqlite::verify_override_date_uniqueness(&mut conn)?;
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Verifies that override dates are protected by a unique index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is missing.
    pub fn verify_override_date_uniqueness(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_override_date_uniqueness(&mut self.conn)
    }
}

impl OverrideStore for Persistence {
    fn get_override_by_date(&mut self, date: Date) -> Result<Option<ScheduleOverride>, StoreError> {
        Ok(queries::overrides::get_override_by_date(&mut self.conn, date)?)
    }

    fn get_override_by_id(
        &mut self,
        override_id: &OverrideId,
    ) -> Result<Option<ScheduleOverride>, StoreError> {
        Ok(queries::overrides::get_override_by_id(&mut self.conn, override_id)?)
    }

    fn list_overrides(&mut self) -> Result<Vec<ScheduleOverride>, StoreError> {
        Ok(queries::overrides::list_overrides(&mut self.conn)?)
    }

    fn insert_override(
        &mut self,
        record: &ScheduleOverride,
    ) -> Result<ScheduleOverride, StoreError> {
        mutations::overrides::insert_override(&mut self.conn, record)?;
        Ok(record.clone())
    }

    fn update_override(
        &mut self,
        record: &ScheduleOverride,
    ) -> Result<ScheduleOverride, StoreError> {
        mutations::overrides::update_override(&mut self.conn, record)?;
        Ok(record.clone())
    }

    fn delete_override(&mut self, override_id: &OverrideId) -> Result<(), StoreError> {
        Ok(mutations::overrides::delete_override(
            &mut self.conn,
            override_id,
        )?)
    }
}

impl PatternStore for Persistence {
    fn get_pattern(&mut self, doctor_id: &DoctorId) -> Result<Option<String>, StoreError> {
        Ok(queries::doctors::get_pattern(&mut self.conn, doctor_id)?)
    }

    fn set_pattern(&mut self, doctor_id: &DoctorId, expression: &str) -> Result<(), StoreError> {
        Ok(mutations::doctors::set_pattern(
            &mut self.conn,
            doctor_id,
            expression,
        )?)
    }

    fn remove_pattern(&mut self, doctor_id: &DoctorId) -> Result<(), StoreError> {
        Ok(mutations::doctors::remove_pattern(&mut self.conn, doctor_id)?)
    }

    fn list_doctors_missing_pattern(&mut self) -> Result<Vec<DoctorId>, StoreError> {
        Ok(queries::doctors::list_doctors_missing_pattern(
            &mut self.conn,
        )?)
    }

    fn list_patterns(&mut self) -> Result<Vec<DoctorPattern>, StoreError> {
        Ok(queries::doctors::list_patterns(&mut self.conn)?)
    }
}

impl DoctorDirectory for Persistence {
    fn get_doctor(&mut self, doctor_id: &DoctorId) -> Result<Option<Doctor>, StoreError> {
        Ok(queries::doctors::get_doctor(&mut self.conn, doctor_id)?)
    }

    fn list_doctors(&mut self) -> Result<Vec<Doctor>, StoreError> {
        Ok(queries::doctors::list_doctors(&mut self.conn)?)
    }

    fn insert_doctor(&mut self, doctor: &Doctor) -> Result<(), StoreError> {
        Ok(mutations::doctors::insert_doctor(&mut self.conn, doctor)?)
    }

    fn set_doctor_active(&mut self, doctor_id: &DoctorId, active: bool) -> Result<(), StoreError> {
        Ok(mutations::doctors::set_doctor_active(
            &mut self.conn,
            doctor_id,
            active,
        )?)
    }
}
