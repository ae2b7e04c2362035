// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use clinic_schedule::ScheduleError;
use clinic_schedule_domain::DomainError;

/// One offending request field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldError {
    /// The request field, as named in the JSON body.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: String::from(field),
            message: message.into(),
        }
    }
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// One or more request fields failed validation.
    ValidationFailed {
        /// Every offending field.
        errors: Vec<FieldError>,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The request collides with existing state.
    Conflict {
        /// A human-readable description of the collision.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Field errors carried by this error, if any.
    #[must_use]
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::ValidationFailed { errors } => errors.clone(),
            Self::InvalidInput { field, message } => vec![FieldError::new(field, message.clone())],
            _ => Vec::new(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed { errors } => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                write!(f, "Validation failed for: {}", fields.join(", "))
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// Malformed values map to `InvalidInput` on the field that carries them;
/// business rules map to `DomainRuleViolation`.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidDateFormat { .. } | DomainError::InvalidCalendarDate { .. } => {
            ApiError::InvalidInput {
                field: String::from("date"),
                message,
            }
        }
        DomainError::InvalidIdentifier(_) => ApiError::InvalidInput {
            field: String::from("id"),
            message,
        },
        DomainError::InvalidReason(_) => ApiError::InvalidInput {
            field: String::from("reason"),
            message,
        },
        DomainError::InvalidDisplayName(_) => ApiError::InvalidInput {
            field: String::from("displayName"),
            message,
        },
        DomainError::EmptySchedulePattern | DomainError::InvalidSchedulePattern { .. } => {
            ApiError::InvalidInput {
                field: String::from("schedulePattern"),
                message,
            }
        }
        DomainError::EmptyOverrideUpdate => ApiError::InvalidInput {
            field: String::from("request"),
            message,
        },
        DomainError::InvalidDateRange { .. } => ApiError::InvalidInput {
            field: String::from("to"),
            message,
        },
        DomainError::PastDateOverride { .. } => ApiError::DomainRuleViolation {
            rule: String::from("override_date_not_in_past"),
            message,
        },
        DomainError::SameDoctorOverride { .. } => ApiError::DomainRuleViolation {
            rule: String::from("assigned_differs_from_original"),
            message,
        },
        DomainError::InvalidTimezone(_) | DomainError::DateArithmeticOverflow { .. } => {
            ApiError::Internal { message }
        }
    }
}

/// Translates a use-case error into an API error.
#[must_use]
pub fn translate_schedule_error(err: ScheduleError) -> ApiError {
    match err {
        ScheduleError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        ScheduleError::OverrideAlreadyExists(date) => ApiError::Conflict {
            message: format!("A schedule override already exists for {date}"),
        },
        ScheduleError::OverrideNotFound(override_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Schedule override"),
            message: format!("No schedule override with id {override_id}"),
        },
        ScheduleError::DoctorNotFound(doctor_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Doctor"),
            message: format!("No doctor with id {doctor_id}"),
        },
        ScheduleError::DoctorInactive(doctor_id) => ApiError::DomainRuleViolation {
            rule: String::from("assigned_doctor_active"),
            message: format!("Doctor {doctor_id} is inactive"),
        },
        ScheduleError::CorruptSchedulePattern(msg) => ApiError::Internal {
            message: format!("Stored schedule pattern is corrupt: {msg}"),
        },
        ScheduleError::Storage(msg) => ApiError::Internal {
            message: format!("Storage error: {msg}"),
        },
    }
}
