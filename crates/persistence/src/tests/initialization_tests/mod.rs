// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use crate::error::PersistenceError;
use crate::tests::{create_test_doctor, create_test_persistence, doctor_id};
use crate::{Persistence, SqlitePersistence};
use clinic_schedule::DoctorDirectory;
use clinic_schedule_domain::Doctor;

#[test]
fn test_persistence_initialization() {
    let result: Result<SqlitePersistence, PersistenceError> = SqlitePersistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_startup_checks_pass_on_migrated_schema() {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();

    assert!(persistence.verify_foreign_key_enforcement().is_ok());
    assert!(persistence.verify_override_date_uniqueness().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: SqlitePersistence = create_test_persistence();
    let mut db2: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();

    assert_eq!(db1.list_doctors().unwrap().len(), 3);
    assert!(db2.list_doctors().unwrap().is_empty());
}

#[test]
fn test_file_database_persists_between_connections() {
    let path = std::env::temp_dir().join(format!(
        "clinic_schedule_test_{}.db",
        rand_suffix()
    ));

    {
        let mut first: Persistence = Persistence::new_with_file(&path).unwrap();
        first
            .insert_doctor(&create_test_doctor('a', None, 0))
            .unwrap();
    }

    let mut second: Persistence = Persistence::new_with_file(&path).unwrap();
    let found: Option<Doctor> = second.get_doctor(&doctor_id('a')).unwrap();
    assert!(found.is_some());

    drop(second);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

fn rand_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}
