// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::clock::Clock;
use crate::command::RegisterDoctorCommand;
use crate::error::ScheduleError;
use crate::ids::new_doctor_id;
use crate::store::DoctorDirectory;
use clinic_schedule_domain::{Doctor, DoctorId, canonicalize_pattern, validate_display_name};
use tracing::info;

/// Provisions a new, active doctor with a generated identifier.
///
/// An initial pattern, when given, is validated and canonicalized the same
/// way as a later pattern change.
///
/// # Errors
///
/// Returns an error if the name or pattern is invalid or the store fails.
pub fn register_doctor<S, C>(
    store: &mut S,
    clock: &C,
    command: RegisterDoctorCommand,
) -> Result<Doctor, ScheduleError>
where
    S: DoctorDirectory + ?Sized,
    C: Clock + ?Sized,
{
    let display_name: String = validate_display_name(&command.display_name)?;
    let schedule_pattern: Option<String> = command
        .schedule_pattern
        .as_deref()
        .map(canonicalize_pattern)
        .transpose()?;

    let doctor: Doctor = Doctor {
        doctor_id: new_doctor_id(),
        display_name,
        is_active: true,
        schedule_pattern,
        created_at: clock.now(),
    };
    store.insert_doctor(&doctor)?;

    info!(
        doctor_id = %doctor.doctor_id,
        display_name = %doctor.display_name,
        "Registered doctor"
    );

    Ok(doctor)
}

/// # Errors
///
/// Returns an error if the store fails.
pub fn list_doctors<S: DoctorDirectory + ?Sized>(store: &mut S) -> Result<Vec<Doctor>, ScheduleError> {
    Ok(store.list_doctors()?)
}

/// Activates or deactivates a doctor.
///
/// Inactive doctors keep their pattern but take no part in resolution or
/// bulk initialization until reactivated. Existing overrides naming them
/// are left in place.
///
/// # Errors
///
/// Returns an error if the doctor does not exist or the store fails.
pub fn set_doctor_active<S: DoctorDirectory + ?Sized>(
    store: &mut S,
    doctor_id: &DoctorId,
    active: bool,
) -> Result<(), ScheduleError> {
    if store.get_doctor(doctor_id)?.is_none() {
        return Err(ScheduleError::DoctorNotFound(doctor_id.clone()));
    }

    store.set_doctor_active(doctor_id, active)?;
    info!(%doctor_id, active, "Changed doctor status");

    Ok(())
}
