// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use clinic_schedule::{DoctorDirectory, FixedClock};
use clinic_schedule_domain::{Doctor, DoctorId};
use clinic_schedule_persistence::SqlitePersistence;
use time::macros::{date, datetime};
use time::{Date, Duration};

use crate::{CreateOverrideRequest, UpdateOverrideRequest};

pub const DOCTOR_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const DOCTOR_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
pub const DOCTOR_C: &str = "cccccccccccccccccccccccccccccccc";
pub const DOCTOR_D: &str = "dddddddddddddddddddddddddddddddd";
pub const UNKNOWN_DOCTOR: &str = "eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

/// The Monday used by the override scenarios.
pub const SCENARIO_DATE: &str = "2025-03-10";

pub fn create_test_today() -> Date {
    date!(2025 - 03 - 01)
}

/// Frozen at 2025-03-01 08:00 UTC, a Saturday.
pub fn create_test_clock() -> FixedClock {
    FixedClock::new(datetime!(2025-03-01 08:00 UTC))
}

fn create_test_doctor(id: &str, pattern: Option<&str>, active: bool, order: i64) -> Doctor {
    Doctor {
        doctor_id: DoctorId::parse(id).unwrap(),
        display_name: format!("Dr. {}", &id[..1].to_ascii_uppercase()),
        is_active: active,
        schedule_pattern: pattern.map(String::from),
        created_at: datetime!(2025-01-01 00:00 UTC) + Duration::minutes(order),
    }
}

/// Doctors A (Mondays), B and C (no pattern) and D (inactive, every day).
pub fn create_test_persistence() -> SqlitePersistence {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();
    for doctor in [
        create_test_doctor(DOCTOR_A, Some("weekly:MON"), true, 0),
        create_test_doctor(DOCTOR_B, None, true, 1),
        create_test_doctor(DOCTOR_C, None, true, 2),
        create_test_doctor(DOCTOR_D, Some("daily"), false, 3),
    ] {
        persistence.insert_doctor(&doctor).unwrap();
    }
    persistence
}

/// B covers A on the scenario Monday.
pub fn create_valid_override_request() -> CreateOverrideRequest {
    CreateOverrideRequest {
        date: Some(String::from(SCENARIO_DATE)),
        assigned_doctor_id: Some(String::from(DOCTOR_B)),
        reason: Some(String::from("Annual leave cover")),
        original_doctor_id: Some(String::from(DOCTOR_A)),
    }
}

pub fn create_reassign_request(assigned: &str) -> UpdateOverrideRequest {
    UpdateOverrideRequest {
        reason: None,
        assigned_doctor_id: Some(String::from(assigned)),
    }
}
