// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ScheduleError;
use crate::store::{DoctorDirectory, PatternStore};
use clinic_schedule_domain::{DoctorId, canonicalize_pattern};
use tracing::info;

/// Sets a doctor's recurring pattern, replacing any previous one.
///
/// The expression is stored in canonical form.
///
/// # Arguments
///
/// * `store` - Pattern store and doctor directory
/// * `doctor_id` - The doctor whose pattern changes
/// * `expression` - The pattern expression as supplied by the caller
///
/// # Returns
///
/// The canonical expression that was stored.
///
/// # Errors
///
/// Returns an error if:
/// - The expression is blank or does not parse
/// - The doctor does not exist
/// - The store fails
pub fn set_pattern<S>(
    store: &mut S,
    doctor_id: &DoctorId,
    expression: &str,
) -> Result<String, ScheduleError>
where
    S: PatternStore + DoctorDirectory + ?Sized,
{
    let canonical: String = canonicalize_pattern(expression)?;

    if store.get_doctor(doctor_id)?.is_none() {
        return Err(ScheduleError::DoctorNotFound(doctor_id.clone()));
    }

    store.set_pattern(doctor_id, &canonical)?;
    info!(%doctor_id, pattern = %canonical, "Set schedule pattern");

    Ok(canonical)
}

/// Clears a doctor's recurring pattern.
///
/// # Errors
///
/// Returns an error if the doctor does not exist or the store fails.
pub fn remove_pattern<S>(store: &mut S, doctor_id: &DoctorId) -> Result<(), ScheduleError>
where
    S: PatternStore + DoctorDirectory + ?Sized,
{
    if store.get_doctor(doctor_id)?.is_none() {
        return Err(ScheduleError::DoctorNotFound(doctor_id.clone()));
    }

    store.remove_pattern(doctor_id)?;
    info!(%doctor_id, "Removed schedule pattern");

    Ok(())
}
