// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! API boundary for the clinic doctor schedule.
//!
//! Requests arrive as loosely typed DTOs, are validated into core commands,
//! run against the persistence adapter and come back as response DTOs.
//! Every failure is an [`ApiError`]; mapping those to a transport is the
//! server's job.

mod error;
mod handlers;
mod request_response;
mod validation;

#[cfg(test)]
mod tests;

pub use error::{ApiError, FieldError, translate_domain_error, translate_schedule_error};
pub use handlers::{
    assignment_info, create_override, delete_override_for_date, doctor_info, get_assignment,
    get_calendar, get_override_for_date, initialize_schedules, list_doctors, list_overrides,
    override_info, register_doctor, remove_doctor_schedule, set_doctor_schedule,
    set_doctor_status, update_override,
};
pub use request_response::{
    AssignmentInfo, CreateOverrideRequest, DoctorInfo, InitializationResponse, OverrideInfo,
    RegisterDoctorRequest, SetDoctorStatusRequest, SetSchedulePatternRequest, StatusResponse,
    UpdateOverrideRequest,
};
pub use validation::{
    parse_date_param, parse_doctor_id_param, validate_calendar_range, validate_create_override,
    validate_doctor_status, validate_register_doctor, validate_set_pattern,
    validate_update_override,
};
