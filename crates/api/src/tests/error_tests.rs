// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clinic_schedule::ScheduleError;
use clinic_schedule_domain::{DoctorId, DomainError, OverrideId};
use time::macros::date;

use crate::{ApiError, FieldError, translate_domain_error, translate_schedule_error};

use super::helpers::DOCTOR_B;

#[test]
fn test_duplicate_date_translates_to_conflict() {
    let err: ApiError =
        translate_schedule_error(ScheduleError::OverrideAlreadyExists(date!(2025 - 03 - 10)));

    assert_eq!(
        err,
        ApiError::Conflict {
            message: String::from("A schedule override already exists for 2025-03-10"),
        }
    );
}

#[test]
fn test_missing_override_and_doctor_translate_to_not_found() {
    let override_err: ApiError =
        translate_schedule_error(ScheduleError::OverrideNotFound(OverrideId::from_u128(7)));
    let doctor_err: ApiError = translate_schedule_error(ScheduleError::DoctorNotFound(
        DoctorId::parse(DOCTOR_B).unwrap(),
    ));

    assert!(matches!(
        override_err,
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Schedule override"
    ));
    assert!(matches!(
        doctor_err,
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Doctor"
    ));
}

#[test]
fn test_past_date_translates_to_rule_violation() {
    let err: ApiError = translate_domain_error(DomainError::PastDateOverride {
        date: date!(2025 - 02 - 28),
        today: date!(2025 - 03 - 01),
    });

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "override_date_not_in_past"
    ));
}

#[test]
fn test_wrapped_domain_errors_keep_their_field() {
    let err: ApiError = translate_schedule_error(ScheduleError::DomainViolation(
        DomainError::InvalidReason(String::from("too short")),
    ));

    assert_eq!(err.field_errors(), vec![FieldError::new("reason", err_message(&err))]);
}

fn err_message(err: &ApiError) -> String {
    match err {
        ApiError::InvalidInput { message, .. } => message.clone(),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_storage_and_corrupt_pattern_are_internal() {
    assert!(matches!(
        translate_schedule_error(ScheduleError::Storage(String::from("disk full"))),
        ApiError::Internal { .. }
    ));
    assert!(matches!(
        translate_schedule_error(ScheduleError::CorruptSchedulePattern(String::from("bad"))),
        ApiError::Internal { .. }
    ));
}

#[test]
fn test_validation_failure_display_names_fields() {
    let err: ApiError = ApiError::ValidationFailed {
        errors: vec![
            FieldError::new("date", "date is required"),
            FieldError::new("reason", "reason is required"),
        ],
    };

    assert_eq!(err.to_string(), "Validation failed for: date, reason");
}
