// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request validation.
//!
//! Each function turns a loosely typed request into a core command. Every
//! field is checked before anything is returned, so a single response can
//! list all of the problems with a body. Nothing here touches a store.

use crate::error::{ApiError, FieldError, translate_domain_error};
use crate::request_response::{
    CreateOverrideRequest, RegisterDoctorRequest, SetDoctorStatusRequest,
    SetSchedulePatternRequest, UpdateOverrideRequest,
};
use clinic_schedule::{CreateOverrideCommand, RegisterDoctorCommand, UpdateOverrideCommand};
use clinic_schedule_domain::{
    DoctorId, DomainError, OverrideId, OverrideReason, canonicalize_pattern, parse_iso_date,
    validate_date_range, validate_display_name, validate_not_in_past,
};
use time::Date;

/// Collects field errors across a request.
#[derive(Debug, Default)]
struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Records the error and yields `None`, or yields the value.
    fn check<T>(&mut self, field: &str, result: Result<T, DomainError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(field, e.to_string());
                None
            }
        }
    }

    /// Yields the trimmed value, recording an error when it is absent or blank.
    fn required<'a>(&mut self, field: &str, value: Option<&'a str>) -> Option<&'a str> {
        let found: Option<&str> = present(value);
        if found.is_none() {
            self.push(field, format!("{field} is required"));
        }
        found
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, ApiError> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(ApiError::ValidationFailed {
                errors: self.errors,
            }),
        }
    }
}

/// Treats a blank string the same as a missing one.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Validates a create-override body.
///
/// # Arguments
///
/// * `request` - The request body
/// * `today` - The clinic-local date; earlier dates are rejected
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` listing every invalid field.
pub fn validate_create_override(
    request: &CreateOverrideRequest,
    today: Date,
) -> Result<CreateOverrideCommand, ApiError> {
    let mut errors: FieldErrors = FieldErrors::default();

    let date: Option<Date> = errors
        .required("date", request.date.as_deref())
        .and_then(|raw| errors.check("date", parse_iso_date(raw)))
        .and_then(|date| {
            errors
                .check("date", validate_not_in_past(date, today))
                .map(|()| date)
        });

    let assigned: Option<DoctorId> = errors
        .required("assignedDoctorId", request.assigned_doctor_id.as_deref())
        .and_then(|raw| errors.check("assignedDoctorId", DoctorId::parse(raw)));

    let reason: Option<OverrideReason> = match request.reason.as_deref() {
        Some(raw) => errors.check("reason", OverrideReason::new(raw)),
        None => {
            errors.push("reason", "reason is required");
            None
        }
    };

    let original: Option<Option<DoctorId>> =
        match present(request.original_doctor_id.as_deref()) {
            Some(raw) => errors
                .check("originalDoctorId", DoctorId::parse(raw))
                .map(Some),
            None => Some(None),
        };

    if matches!((&assigned, &original), (Some(a), Some(Some(o))) if a == o) {
        errors.push(
            "assignedDoctorId",
            "assignedDoctorId must differ from originalDoctorId",
        );
    }

    let command: Option<CreateOverrideCommand> = match (date, assigned, reason, original) {
        (Some(date), Some(assigned_doctor_id), Some(reason), Some(original_doctor_id)) => {
            Some(CreateOverrideCommand {
                date,
                assigned_doctor_id,
                reason,
                original_doctor_id,
            })
        }
        _ => None,
    };

    errors.finish(command)
}

/// Validates an update-override body against the override id from the path.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` listing every invalid field,
/// including a `request` entry when neither field is supplied.
pub fn validate_update_override(
    override_id: &str,
    request: &UpdateOverrideRequest,
) -> Result<UpdateOverrideCommand, ApiError> {
    let mut errors: FieldErrors = FieldErrors::default();

    let override_id: Option<OverrideId> = errors.check("id", OverrideId::parse(override_id));

    let reason: Option<Option<OverrideReason>> = match request.reason.as_deref() {
        Some(raw) => errors.check("reason", OverrideReason::new(raw)).map(Some),
        None => Some(None),
    };

    let assigned: Option<Option<DoctorId>> = match request.assigned_doctor_id.as_deref() {
        Some(raw) => errors
            .check("assignedDoctorId", DoctorId::parse(raw))
            .map(Some),
        None => Some(None),
    };

    if request.reason.is_none() && request.assigned_doctor_id.is_none() {
        errors.push("request", DomainError::EmptyOverrideUpdate.to_string());
    }

    let command: Option<UpdateOverrideCommand> = match (override_id, reason, assigned) {
        (Some(override_id), Some(reason), Some(assigned_doctor_id)) => {
            Some(UpdateOverrideCommand {
                override_id,
                reason,
                assigned_doctor_id,
            })
        }
        _ => None,
    };

    errors.finish(command)
}

/// Validates a set-pattern body, returning the canonical expression.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` if the expression is missing,
/// blank or does not parse.
pub fn validate_set_pattern(request: &SetSchedulePatternRequest) -> Result<String, ApiError> {
    let mut errors: FieldErrors = FieldErrors::default();

    let expression: Option<String> = errors
        .required("schedulePattern", request.schedule_pattern.as_deref())
        .and_then(|raw| errors.check("schedulePattern", canonicalize_pattern(raw)));

    errors.finish(expression)
}

/// Validates a register-doctor body.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` listing every invalid field.
pub fn validate_register_doctor(
    request: &RegisterDoctorRequest,
) -> Result<RegisterDoctorCommand, ApiError> {
    let mut errors: FieldErrors = FieldErrors::default();

    let display_name: Option<String> = match request.display_name.as_deref() {
        Some(raw) => errors.check("displayName", validate_display_name(raw)),
        None => {
            errors.push("displayName", "displayName is required");
            None
        }
    };

    let schedule_pattern: Option<Option<String>> =
        match present(request.schedule_pattern.as_deref()) {
            Some(raw) => errors
                .check("schedulePattern", canonicalize_pattern(raw))
                .map(Some),
            None => Some(None),
        };

    let command: Option<RegisterDoctorCommand> = match (display_name, schedule_pattern) {
        (Some(display_name), Some(schedule_pattern)) => Some(RegisterDoctorCommand {
            display_name,
            schedule_pattern,
        }),
        _ => None,
    };

    errors.finish(command)
}

/// Validates a doctor status change.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` if `active` is missing.
pub fn validate_doctor_status(request: &SetDoctorStatusRequest) -> Result<bool, ApiError> {
    let mut errors: FieldErrors = FieldErrors::default();
    if request.active.is_none() {
        errors.push("active", "active is required");
    }
    errors.finish(request.active)
}

/// Validates the `from` and `to` query parameters of a calendar request.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` if either date is missing or
/// malformed, or the range is reversed or too long.
pub fn validate_calendar_range(
    from: Option<&str>,
    to: Option<&str>,
) -> Result<(Date, Date), ApiError> {
    let mut errors: FieldErrors = FieldErrors::default();

    let from: Option<Date> = errors
        .required("from", from)
        .and_then(|raw| errors.check("from", parse_iso_date(raw)));
    let to: Option<Date> = errors
        .required("to", to)
        .and_then(|raw| errors.check("to", parse_iso_date(raw)));

    let range: Option<(Date, Date)> = match (from, to) {
        (Some(from), Some(to)) => errors
            .check("to", validate_date_range(from, to))
            .map(|()| (from, to)),
        _ => None,
    };

    errors.finish(range)
}

/// Parses a date taken from a path or query parameter.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming `field` if the date is malformed.
pub fn parse_date_param(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_iso_date(value).map_err(|e| ApiError::InvalidInput {
        field: String::from(field),
        message: e.to_string(),
    })
}

/// Parses a doctor id taken from a path parameter.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the id is not 32 hex characters.
pub fn parse_doctor_id_param(value: &str) -> Result<DoctorId, ApiError> {
    DoctorId::parse(value).map_err(translate_domain_error)
}
