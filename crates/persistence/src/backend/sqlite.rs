// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` backend utilities.
//!
//! Covers connection setup, embedded migrations and the PRAGMA checks
//! that Diesel has no DSL for.

use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::PersistenceError;

/// Schema migrations, embedded at compile time.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Row returned by `PRAGMA foreign_keys`.
#[derive(QueryableByName)]
struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Row returned by `PRAGMA journal_mode`.
#[derive(QueryableByName)]
struct JournalModeRow {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}

/// Row returned by `PRAGMA index_list`.
#[derive(QueryableByName)]
struct IndexListRow {
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Integer)]
    unique: i32,
}

/// Row returned by `PRAGMA index_info`.
#[derive(QueryableByName)]
struct IndexInfoRow {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Verifies that foreign key enforcement is enabled.
///
/// Overrides reference their assigned doctor, so the connection must
/// enforce foreign keys.
///
/// # Arguments
///
/// * `conn` - The database connection to check
///
/// # Errors
///
/// Returns an error if foreign key enforcement is not enabled.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let foreign_keys_enabled: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaRow>(conn)?
        .foreign_keys;

    if foreign_keys_enabled == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    info!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Verifies that a unique index covers exactly `schedule_overrides.override_date`.
///
/// One override per date depends on this constraint rather than on a
/// read before insert.
///
/// # Errors
///
/// Returns an error if no such index exists or the PRAGMA queries fail.
pub fn verify_override_date_uniqueness(
    conn: &mut SqliteConnection,
) -> Result<(), PersistenceError> {
    let indexes: Vec<IndexListRow> =
        diesel::sql_query("PRAGMA index_list('schedule_overrides')").load(conn)?;

    for index in indexes.iter().filter(|i| i.unique != 0) {
        let columns: Vec<IndexInfoRow> =
            diesel::sql_query(format!("PRAGMA index_info('{}')", index.name)).load(conn)?;
        if columns.len() == 1 && columns[0].name == "override_date" {
            info!(index = %index.name, "Override date uniqueness is enforced");
            return Ok(());
        }
    }

    Err(PersistenceError::InitializationError(String::from(
        "schedule_overrides.override_date has no unique index",
    )))
}

/// Applies pending migrations.
///
/// # Errors
///
/// Returns an error if migration execution fails.
pub fn run_migrations(
    conn: &mut SqliteConnection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Running SQLite database migrations");
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Initialize a `SQLite` database at the given URL and run migrations.
///
/// # Arguments
///
/// * `database_url` - The `SQLite` database URL (e.g., `":memory:"` or file path)
///
/// # Errors
///
/// Returns an error if connection or migration fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, "Initializing SQLite database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

    run_migrations(&mut conn).map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    Ok(conn)
}

/// Switches a file-based database to write-ahead logging.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // PRAGMA journal_mode returns the resulting mode as a row.
    let mode: String = diesel::sql_query("PRAGMA journal_mode = WAL")
        .get_result::<JournalModeRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?
        .journal_mode;

    info!(journal_mode = %mode, "SQLite journal mode set");
    Ok(())
}
