// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::DoctorId;
use time::Date;
use time::macros::format_description;

/// Longest inclusive range, in days, that may be resolved in one call.
pub const MAX_RESOLUTION_RANGE_DAYS: i64 = 366;

/// Maximum doctor display name length, in characters.
const MAX_DISPLAY_NAME_CHARS: usize = 200;

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// The shape is checked before parsing so that inputs such as `2025-3-1`
/// or `+2025-03-01` are rejected even where the parser would be lenient.
///
/// # Arguments
///
/// * `value` - The date string to parse
///
/// # Errors
///
/// Returns an error if:
/// - The string is not exactly four digits, dash, two digits, dash, two digits
/// - The digits do not name a real calendar date (e.g. `2025-02-30`)
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    let bytes: &[u8] = value.as_bytes();
    let well_formed: bool = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(DomainError::InvalidDateFormat {
            value: value.to_string(),
        });
    }

    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::InvalidCalendarDate {
            value: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Validates that an override date is not before today.
///
/// `today` is the clinic-local date with the time of day discarded, so an
/// override for today itself is accepted.
///
/// # Errors
///
/// Returns `DomainError::PastDateOverride` if `date` is strictly before `today`.
pub fn validate_not_in_past(date: Date, today: Date) -> Result<(), DomainError> {
    if date < today {
        return Err(DomainError::PastDateOverride { date, today });
    }
    Ok(())
}

/// Validates that an override does not assign the doctor it replaces.
///
/// # Errors
///
/// Returns `DomainError::SameDoctorOverride` if `original` is present and
/// equal to `assigned`.
pub fn validate_distinct_doctors(
    assigned: &DoctorId,
    original: Option<&DoctorId>,
) -> Result<(), DomainError> {
    if original == Some(assigned) {
        return Err(DomainError::SameDoctorOverride {
            doctor_id: assigned.clone(),
        });
    }
    Ok(())
}

/// Validates and trims a doctor display name.
///
/// # Errors
///
/// Returns an error if the trimmed name is empty or longer than 200 characters.
pub fn validate_display_name(name: &str) -> Result<String, DomainError> {
    let trimmed: &str = name.trim();

    if trimmed.is_empty() {
        return Err(DomainError::InvalidDisplayName(String::from(
            "Display name cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME_CHARS {
        return Err(DomainError::InvalidDisplayName(format!(
            "Display name must be at most {MAX_DISPLAY_NAME_CHARS} characters"
        )));
    }

    Ok(trimmed.to_string())
}

/// Validates an inclusive date range for calendar resolution.
///
/// # Errors
///
/// Returns an error if `to` is before `from` or the range spans more than
/// [`MAX_RESOLUTION_RANGE_DAYS`] days.
pub fn validate_date_range(from: Date, to: Date) -> Result<(), DomainError> {
    if to < from {
        return Err(DomainError::InvalidDateRange {
            from,
            to,
            reason: String::from("end date is before start date"),
        });
    }

    let span_days: i64 = (to - from).whole_days() + 1;
    if span_days > MAX_RESOLUTION_RANGE_DAYS {
        return Err(DomainError::InvalidDateRange {
            from,
            to,
            reason: format!(
                "range covers {span_days} days, at most {MAX_RESOLUTION_RANGE_DAYS} allowed"
            ),
        });
    }

    Ok(())
}
