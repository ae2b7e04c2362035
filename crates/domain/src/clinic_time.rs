// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Clinic-local calendar dates.
//!
//! "Today" for override validation is the wall-clock date in the clinic's
//! declared timezone, with the time of day discarded. Timestamps elsewhere
//! in the system are UTC.

use crate::error::DomainError;
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use time::{Date, Month, OffsetDateTime};

/// The IANA timezone the clinic operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClinicTimezone {
    tz: Tz,
}

impl ClinicTimezone {
    /// Parses an IANA timezone name such as `Europe/London`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the name is unknown.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let tz: Tz = name
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))?;
        Ok(Self { tz })
    }

    /// UTC.
    #[must_use]
    pub const fn utc() -> Self {
        Self { tz: Tz::UTC }
    }

    /// Returns the IANA name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    /// Returns the clinic-local calendar date at the instant `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if `now` is outside the range chrono can represent.
    pub fn local_date(&self, now: OffsetDateTime) -> Result<Date, DomainError> {
        let overflow = || DomainError::DateArithmeticOverflow {
            operation: format!("converting {now} to {}", self.tz.name()),
        };

        let instant = chrono::DateTime::from_timestamp(now.unix_timestamp(), now.nanosecond())
            .ok_or_else(overflow)?;
        let local: NaiveDate = instant.with_timezone(&self.tz).date_naive();

        let month: Month = u8::try_from(local.month())
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or_else(overflow)?;
        let day: u8 = u8::try_from(local.day()).map_err(|_| overflow())?;

        Date::from_calendar_date(local.year(), month, day).map_err(|_| overflow())
    }
}

impl Default for ClinicTimezone {
    fn default() -> Self {
        Self::utc()
    }
}
