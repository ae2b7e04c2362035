// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::DoctorId;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A date string is not in `YYYY-MM-DD` form.
    InvalidDateFormat {
        /// The rejected input.
        value: String,
    },
    /// A date string has the right shape but is not a real calendar date.
    InvalidCalendarDate {
        /// The rejected input.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// An identifier is not 32 hexadecimal characters.
    InvalidIdentifier(String),
    /// An override reason is empty, too short, or too long.
    InvalidReason(String),
    /// A doctor display name is empty or too long.
    InvalidDisplayName(String),
    /// A schedule pattern expression was blank.
    EmptySchedulePattern,
    /// A schedule pattern expression could not be parsed.
    InvalidSchedulePattern {
        /// The rejected expression.
        expression: String,
        /// What is wrong with it.
        reason: String,
    },
    /// An override was requested for a date before today.
    PastDateOverride {
        /// The requested override date.
        date: time::Date,
        /// The clinic-local date at the time of the request.
        today: time::Date,
    },
    /// An override would assign the doctor it replaces.
    SameDoctorOverride {
        /// The doctor named as both original and assigned.
        doctor_id: DoctorId,
    },
    /// An override update supplied neither a reason nor an assigned doctor.
    EmptyOverrideUpdate,
    /// The configured clinic timezone is not a known IANA name.
    InvalidTimezone(String),
    /// A date range is reversed or too long.
    InvalidDateRange {
        /// First date of the range.
        from: time::Date,
        /// Last date of the range.
        to: time::Date,
        /// What is wrong with it.
        reason: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateFormat { value } => {
                write!(f, "Invalid date '{value}': expected YYYY-MM-DD")
            }
            Self::InvalidCalendarDate { value, error } => {
                write!(f, "Invalid calendar date '{value}': {error}")
            }
            Self::InvalidIdentifier(value) => write!(
                f,
                "Invalid identifier '{value}': expected 32 hexadecimal characters"
            ),
            Self::InvalidReason(msg) => write!(f, "Invalid reason: {msg}"),
            Self::InvalidDisplayName(msg) => write!(f, "Invalid display name: {msg}"),
            Self::EmptySchedulePattern => write!(f, "Schedule pattern cannot be blank"),
            Self::InvalidSchedulePattern { expression, reason } => {
                write!(f, "Invalid schedule pattern '{expression}': {reason}")
            }
            Self::PastDateOverride { date, today } => write!(
                f,
                "Cannot create a schedule override for {date}: date is before today ({today})"
            ),
            Self::SameDoctorOverride { doctor_id } => write!(
                f,
                "Override assigns doctor {doctor_id}, who is already the original doctor for that date"
            ),
            Self::EmptyOverrideUpdate => write!(
                f,
                "An override update must change the reason or the assigned doctor"
            ),
            Self::InvalidTimezone(name) => write!(f, "Unknown timezone '{name}'"),
            Self::InvalidDateRange { from, to, reason } => {
                write!(f, "Invalid date range {from}..{to}: {reason}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
