// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;
mod override_tests;

use crate::SqlitePersistence;
use clinic_schedule::DoctorDirectory;
use clinic_schedule_domain::{Doctor, DoctorId, OverrideId, OverrideReason, ScheduleOverride};
use time::macros::datetime;
use time::{Date, Duration, Month, OffsetDateTime};

pub fn doctor_id(byte: char) -> DoctorId {
    DoctorId::parse(&byte.to_string().repeat(32)).unwrap()
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

pub fn create_test_timestamp() -> OffsetDateTime {
    datetime!(2025-03-01 08:15:30.25 UTC)
}

pub fn create_test_doctor(byte: char, pattern: Option<&str>, order: i64) -> Doctor {
    Doctor {
        doctor_id: doctor_id(byte),
        display_name: format!("Dr. {}", byte.to_ascii_uppercase()),
        is_active: true,
        schedule_pattern: pattern.map(String::from),
        created_at: datetime!(2025-01-01 00:00 UTC) + Duration::milliseconds(order * 250),
    }
}

/// In-memory database holding doctors A (Mondays), B and C (no pattern).
pub fn create_test_persistence() -> SqlitePersistence {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();
    for doctor in [
        create_test_doctor('a', Some("weekly:MON"), 0),
        create_test_doctor('b', None, 1),
        create_test_doctor('c', None, 2),
    ] {
        persistence.insert_doctor(&doctor).unwrap();
    }
    persistence
}

pub fn create_test_override(id: u128, on: Date, assigned: char) -> ScheduleOverride {
    ScheduleOverride::new(
        OverrideId::from_u128(id),
        on,
        Some(doctor_id('a')),
        doctor_id(assigned),
        OverrideReason::new("Annual leave cover").unwrap(),
        create_test_timestamp(),
        create_test_timestamp(),
    )
    .unwrap()
}
