// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for schedule override storage.

use crate::SqlitePersistence;
use crate::tests::{create_test_override, create_test_persistence, date, doctor_id};
use clinic_schedule::{OverrideStore, StoreError};
use clinic_schedule_domain::{OverrideId, OverrideReason, ScheduleOverride};
use time::Month;
use time::macros::datetime;

#[test]
fn test_insert_and_read_back_by_date_and_id() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let record: ScheduleOverride = create_test_override(1, date(2025, Month::March, 10), 'b');

    persistence.insert_override(&record).unwrap();

    let by_date: Option<ScheduleOverride> = persistence
        .get_override_by_date(date(2025, Month::March, 10))
        .unwrap();
    let by_id: Option<ScheduleOverride> = persistence
        .get_override_by_id(record.override_id())
        .unwrap();

    assert_eq!(by_date.as_ref(), Some(&record));
    assert_eq!(by_id, Some(record));
}

#[test]
fn test_missing_override_reads_as_none() {
    let mut persistence: SqlitePersistence = create_test_persistence();

    assert_eq!(
        persistence
            .get_override_by_date(date(2025, Month::March, 10))
            .unwrap(),
        None
    );
    assert_eq!(
        persistence
            .get_override_by_id(&OverrideId::from_u128(9))
            .unwrap(),
        None
    );
}

#[test]
fn test_second_insert_for_same_date_is_rejected_by_constraint() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    persistence
        .insert_override(&create_test_override(1, date(2025, Month::March, 10), 'b'))
        .unwrap();

    let result: Result<ScheduleOverride, StoreError> = persistence
        .insert_override(&create_test_override(2, date(2025, Month::March, 10), 'c'));

    assert_eq!(
        result,
        Err(StoreError::DuplicateOverrideDate(date(2025, Month::March, 10)))
    );
    assert_eq!(persistence.list_overrides().unwrap().len(), 1);
}

#[test]
fn test_insert_requires_existing_assigned_doctor() {
    let mut persistence: SqlitePersistence = create_test_persistence();

    let result: Result<ScheduleOverride, StoreError> =
        persistence.insert_override(&create_test_override(1, date(2025, Month::March, 10), 'f'));

    assert!(matches!(result, Err(StoreError::Backend(_))));
}

#[test]
fn test_update_changes_mutable_fields_only() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let record: ScheduleOverride = create_test_override(1, date(2025, Month::March, 10), 'b');
    persistence.insert_override(&record).unwrap();

    let changed: ScheduleOverride = record
        .apply_update(
            Some(OverrideReason::new("Conference travel").unwrap()),
            Some(doctor_id('c')),
            datetime!(2025-03-02 10:00 UTC),
        )
        .unwrap();
    persistence.update_override(&changed).unwrap();

    let stored: ScheduleOverride = persistence
        .get_override_by_id(record.override_id())
        .unwrap()
        .unwrap();
    assert_eq!(stored, changed);
    assert_eq!(stored.created_at(), record.created_at());
    assert_eq!(stored.original_doctor_id(), Some(&doctor_id('a')));
}

#[test]
fn test_update_of_missing_override_fails() {
    let mut persistence: SqlitePersistence = create_test_persistence();

    let result: Result<ScheduleOverride, StoreError> =
        persistence.update_override(&create_test_override(1, date(2025, Month::March, 10), 'b'));

    assert!(matches!(result, Err(StoreError::Backend(_))));
}

#[test]
fn test_delete_is_idempotent() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let record: ScheduleOverride = create_test_override(1, date(2025, Month::March, 10), 'b');
    persistence.insert_override(&record).unwrap();

    persistence.delete_override(record.override_id()).unwrap();
    persistence.delete_override(record.override_id()).unwrap();

    assert!(persistence.list_overrides().unwrap().is_empty());
}

#[test]
fn test_list_is_ordered_by_date() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    for (id, day) in [(1, 20), (2, 3), (3, 11)] {
        persistence
            .insert_override(&create_test_override(id, date(2025, Month::April, day), 'b'))
            .unwrap();
    }

    let days: Vec<u8> = persistence
        .list_overrides()
        .unwrap()
        .iter()
        .map(|o| o.date().day())
        .collect();
    assert_eq!(days, vec![3, 11, 20]);
}

#[test]
fn test_timestamps_round_trip_with_subseconds() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let record: ScheduleOverride = create_test_override(1, date(2025, Month::March, 10), 'b');
    persistence.insert_override(&record).unwrap();

    let stored: ScheduleOverride = persistence
        .get_override_by_id(record.override_id())
        .unwrap()
        .unwrap();
    assert_eq!(stored.created_at(), datetime!(2025-03-01 08:15:30.25 UTC));
}
