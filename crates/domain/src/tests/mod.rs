// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod pattern;

use crate::{DoctorId, OverrideId, OverrideReason, ScheduleOverride};
use time::{Date, Month, OffsetDateTime};

pub fn doctor(byte: char) -> DoctorId {
    DoctorId::parse(&byte.to_string().repeat(32)).unwrap()
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

pub fn timestamp() -> OffsetDateTime {
    time::macros::datetime!(2025-03-01 09:30 UTC)
}

pub fn create_test_override(
    on: Date,
    original: Option<DoctorId>,
    assigned: DoctorId,
) -> ScheduleOverride {
    ScheduleOverride::new(
        OverrideId::from_u128(1),
        on,
        original,
        assigned,
        OverrideReason::new("Covering for annual leave").unwrap(),
        timestamp(),
        timestamp(),
    )
    .unwrap()
}
