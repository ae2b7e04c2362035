// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Each handler validates its request, runs one use case against the
//! persistence adapter and converts the outcome into a response DTO.

use clinic_schedule::{
    AssignmentResolver, Clock, CreateOverrideCommand, InitializationSummary,
    RegisterDoctorCommand, ScheduleInitializer, ScheduleOverrides, UpdateOverrideCommand,
};
use clinic_schedule_domain::{
    Assignment, AssignmentSource, Doctor, DoctorId, ScheduleOverride,
};
use clinic_schedule_persistence::SqlitePersistence;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use crate::error::{ApiError, translate_domain_error, translate_schedule_error};
use crate::request_response::{
    AssignmentInfo, CreateOverrideRequest, DoctorInfo, InitializationResponse, OverrideInfo,
    RegisterDoctorRequest, SetDoctorStatusRequest, SetSchedulePatternRequest, StatusResponse,
    UpdateOverrideRequest,
};
use crate::validation::{
    parse_date_param, parse_doctor_id_param, validate_calendar_range, validate_create_override,
    validate_doctor_status, validate_register_doctor, validate_set_pattern,
    validate_update_override,
};

fn format_timestamp(value: OffsetDateTime) -> Result<String, ApiError> {
    value.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

/// Converts a stored override into its response form.
///
/// # Errors
///
/// Returns an error if a timestamp cannot be rendered as RFC 3339.
pub fn override_info(record: &ScheduleOverride) -> Result<OverrideInfo, ApiError> {
    Ok(OverrideInfo {
        id: record.override_id().to_string(),
        date: record.date().to_string(),
        original_doctor_id: record.original_doctor_id().map(ToString::to_string),
        assigned_doctor_id: record.assigned_doctor_id().to_string(),
        reason: record.reason().value().to_string(),
        created_at: format_timestamp(record.created_at())?,
        updated_at: format_timestamp(record.updated_at())?,
    })
}

/// Converts a resolved assignment into its response form.
#[must_use]
pub fn assignment_info(assignment: &Assignment) -> AssignmentInfo {
    let override_id: Option<String> = match &assignment.source {
        AssignmentSource::Override { override_id } => Some(override_id.to_string()),
        AssignmentSource::Pattern | AssignmentSource::Unassigned => None,
    };

    AssignmentInfo {
        date: assignment.date.to_string(),
        doctor_id: assignment.doctor_id.as_ref().map(ToString::to_string),
        source: assignment.source.as_str().to_string(),
        override_id,
        also_claimed_by: assignment
            .also_claimed_by
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

/// Converts a doctor into its response form.
///
/// # Errors
///
/// Returns an error if the creation timestamp cannot be rendered.
pub fn doctor_info(doctor: &Doctor) -> Result<DoctorInfo, ApiError> {
    Ok(DoctorInfo {
        id: doctor.doctor_id.to_string(),
        display_name: doctor.display_name.clone(),
        is_active: doctor.is_active,
        schedule_pattern: doctor.schedule_pattern.clone(),
        created_at: format_timestamp(doctor.created_at)?,
    })
}

/// Lists every override, ordered by date.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_overrides<C: Clock + ?Sized>(
    persistence: &mut SqlitePersistence,
    clock: &C,
) -> Result<Vec<OverrideInfo>, ApiError> {
    let overrides: Vec<ScheduleOverride> = ScheduleOverrides::new(persistence, clock)
        .list()
        .map_err(translate_schedule_error)?;

    overrides.iter().map(override_info).collect()
}

/// Looks up the override for one date.
///
/// # Returns
///
/// * `Ok(Some(OverrideInfo))` when the date is overridden
/// * `Ok(None)` when it is not
///
/// # Errors
///
/// Returns an error if the date is malformed or the store fails.
pub fn get_override_for_date<C: Clock + ?Sized>(
    persistence: &mut SqlitePersistence,
    clock: &C,
    date: &str,
) -> Result<Option<OverrideInfo>, ApiError> {
    let date: Date = parse_date_param("date", date)?;

    ScheduleOverrides::new(persistence, clock)
        .find_by_date(date)
        .map_err(translate_schedule_error)?
        .as_ref()
        .map(override_info)
        .transpose()
}

/// Creates an override.
///
/// # Errors
///
/// Returns an error if:
/// - Any request field is missing or invalid
/// - The date is already overridden
/// - The assigned doctor does not exist or is inactive
/// - The store fails
pub fn create_override<C: Clock + ?Sized>(
    persistence: &mut SqlitePersistence,
    clock: &C,
    request: &CreateOverrideRequest,
) -> Result<OverrideInfo, ApiError> {
    let today: Date = clock.today().map_err(translate_domain_error)?;
    let command: CreateOverrideCommand = validate_create_override(request, today)?;

    let created: ScheduleOverride = ScheduleOverrides::new(persistence, clock)
        .create(command)
        .map_err(translate_schedule_error)?;

    override_info(&created)
}

/// Updates an override.
///
/// # Errors
///
/// Returns an error if:
/// - The id or a supplied field is invalid, or no field is supplied
/// - The override does not exist
/// - A new assigned doctor does not exist or is inactive
/// - The result would assign the original doctor
/// - The store fails
pub fn update_override<C: Clock + ?Sized>(
    persistence: &mut SqlitePersistence,
    clock: &C,
    override_id: &str,
    request: &UpdateOverrideRequest,
) -> Result<OverrideInfo, ApiError> {
    let command: UpdateOverrideCommand = validate_update_override(override_id, request)?;

    let updated: ScheduleOverride = ScheduleOverrides::new(persistence, clock)
        .update(command)
        .map_err(translate_schedule_error)?;

    override_info(&updated)
}

/// Removes the override for a date. A date with no override succeeds
/// without changing anything.
///
/// # Errors
///
/// Returns an error if the date is malformed or the store fails.
pub fn delete_override_for_date<C: Clock + ?Sized>(
    persistence: &mut SqlitePersistence,
    clock: &C,
    date: &str,
) -> Result<StatusResponse, ApiError> {
    let date: Date = parse_date_param("date", date)?;

    let removed: Option<ScheduleOverride> = ScheduleOverrides::new(persistence, clock)
        .delete_by_date(date)
        .map_err(translate_schedule_error)?;

    Ok(match removed {
        Some(_) => StatusResponse::ok(format!("Schedule override for {date} deleted")),
        None => StatusResponse::ok(format!("No schedule override exists for {date}")),
    })
}

/// Sets a doctor's recurring pattern.
///
/// # Errors
///
/// Returns an error if the id or pattern is invalid, or the doctor does
/// not exist.
pub fn set_doctor_schedule(
    persistence: &mut SqlitePersistence,
    doctor_id: &str,
    request: &SetSchedulePatternRequest,
) -> Result<StatusResponse, ApiError> {
    let doctor_id: DoctorId = parse_doctor_id_param(doctor_id)?;
    let expression: String = validate_set_pattern(request)?;

    let stored: String = clinic_schedule::set_pattern(persistence, &doctor_id, &expression)
        .map_err(translate_schedule_error)?;

    Ok(StatusResponse::ok(format!(
        "Schedule pattern for doctor {doctor_id} set to {stored}"
    )))
}

/// Clears a doctor's recurring pattern.
///
/// # Errors
///
/// Returns an error if the id is invalid or the doctor does not exist.
pub fn remove_doctor_schedule(
    persistence: &mut SqlitePersistence,
    doctor_id: &str,
) -> Result<StatusResponse, ApiError> {
    let doctor_id: DoctorId = parse_doctor_id_param(doctor_id)?;

    clinic_schedule::remove_pattern(persistence, &doctor_id).map_err(translate_schedule_error)?;

    Ok(StatusResponse::ok(format!(
        "Schedule pattern for doctor {doctor_id} removed"
    )))
}

/// Gives every active doctor without a pattern the default one.
///
/// # Errors
///
/// Returns an error if the doctor lists cannot be read. Individual write
/// failures are reported in the response instead.
pub fn initialize_schedules(
    persistence: &mut SqlitePersistence,
    initializer: &ScheduleInitializer,
) -> Result<InitializationResponse, ApiError> {
    let summary: InitializationSummary = initializer
        .initialize_defaults(persistence)
        .map_err(translate_schedule_error)?;

    Ok(InitializationResponse {
        updated: summary.updated,
        skipped: summary.skipped,
        failed: summary.failed,
        doctors: summary.doctors.iter().map(ToString::to_string).collect(),
        skipped_doctors: summary
            .skipped_doctors
            .iter()
            .map(ToString::to_string)
            .collect(),
    })
}

/// Resolves the effective doctor for a date, or for the clinic-local
/// today when no date is given.
///
/// # Errors
///
/// Returns an error if the date is malformed, the store fails or a stored
/// pattern is corrupt.
pub fn get_assignment<C: Clock + ?Sized>(
    persistence: &mut SqlitePersistence,
    clock: &C,
    date: Option<&str>,
) -> Result<AssignmentInfo, ApiError> {
    let date: Date = match date {
        Some(raw) => parse_date_param("date", raw)?,
        None => clock.today().map_err(translate_domain_error)?,
    };

    let assignment: Assignment = AssignmentResolver::standard(persistence)
        .resolve(date)
        .map_err(translate_schedule_error)?;

    Ok(assignment_info(&assignment))
}

/// Resolves every date of an inclusive range.
///
/// # Errors
///
/// Returns an error if either date is missing or malformed, the range is
/// reversed or too long, the store fails or a stored pattern is corrupt.
pub fn get_calendar(
    persistence: &mut SqlitePersistence,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Vec<AssignmentInfo>, ApiError> {
    let (from, to): (Date, Date) = validate_calendar_range(from, to)?;

    let assignments: Vec<Assignment> = AssignmentResolver::standard(persistence)
        .resolve_range(from, to)
        .map_err(translate_schedule_error)?;

    Ok(assignments.iter().map(assignment_info).collect())
}

/// Registers a doctor.
///
/// # Errors
///
/// Returns an error if the name or pattern is invalid or the store fails.
pub fn register_doctor<C: Clock + ?Sized>(
    persistence: &mut SqlitePersistence,
    clock: &C,
    request: &RegisterDoctorRequest,
) -> Result<DoctorInfo, ApiError> {
    let command: RegisterDoctorCommand = validate_register_doctor(request)?;

    let doctor: Doctor = clinic_schedule::register_doctor(persistence, clock, command)
        .map_err(translate_schedule_error)?;

    doctor_info(&doctor)
}

/// Lists every doctor, active or not.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_doctors(persistence: &mut SqlitePersistence) -> Result<Vec<DoctorInfo>, ApiError> {
    let doctors: Vec<Doctor> =
        clinic_schedule::list_doctors(persistence).map_err(translate_schedule_error)?;

    doctors.iter().map(doctor_info).collect()
}

/// Activates or deactivates a doctor.
///
/// # Errors
///
/// Returns an error if the id is invalid, `active` is missing or the doctor
/// does not exist.
pub fn set_doctor_status(
    persistence: &mut SqlitePersistence,
    doctor_id: &str,
    request: &SetDoctorStatusRequest,
) -> Result<StatusResponse, ApiError> {
    let doctor_id: DoctorId = parse_doctor_id_param(doctor_id)?;
    let active: bool = validate_doctor_status(request)?;

    clinic_schedule::set_doctor_active(persistence, &doctor_id, active)
        .map_err(translate_schedule_error)?;

    let state: &str = if active { "activated" } else { "deactivated" };
    Ok(StatusResponse::ok(format!("Doctor {doctor_id} {state}")))
}
