// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clinic_schedule_domain::{ClinicTimezone, DomainError};
use time::{Date, OffsetDateTime};

/// Drops sub-microsecond digits, which timestamp columns do not keep.
fn truncate_to_micros(value: OffsetDateTime) -> OffsetDateTime {
    let micros: u32 = value.microsecond();
    value.replace_microsecond(micros).unwrap_or(value)
}

/// Source of the current instant and the clinic-local date.
pub trait Clock {
    /// The current instant in UTC, at microsecond precision.
    fn now(&self) -> OffsetDateTime;

    /// The clinic-local calendar date at [`Clock::now`].
    ///
    /// # Errors
    ///
    /// Returns an error if the instant cannot be converted to the clinic
    /// timezone.
    fn today(&self) -> Result<Date, DomainError>;
}

/// Wall clock in a configured clinic timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    timezone: ClinicTimezone,
}

impl SystemClock {
    #[must_use]
    pub const fn new(timezone: ClinicTimezone) -> Self {
        Self { timezone }
    }

    #[must_use]
    pub const fn timezone(&self) -> ClinicTimezone {
        self.timezone
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        truncate_to_micros(OffsetDateTime::now_utc())
    }

    fn today(&self) -> Result<Date, DomainError> {
        self.timezone.local_date(self.now())
    }
}

/// A clock frozen at one instant. Used for deterministic tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: OffsetDateTime,
    timezone: ClinicTimezone,
}

impl FixedClock {
    /// A clock frozen at `now`, reporting dates in UTC.
    #[must_use]
    pub const fn new(now: OffsetDateTime) -> Self {
        Self {
            now,
            timezone: ClinicTimezone::utc(),
        }
    }

    #[must_use]
    pub const fn with_timezone(now: OffsetDateTime, timezone: ClinicTimezone) -> Self {
        Self { now, timezone }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        truncate_to_micros(self.now)
    }

    fn today(&self) -> Result<Date, DomainError> {
        self.timezone.local_date(self.now)
    }
}
