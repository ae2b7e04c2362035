// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clinic_schedule_domain::{DoctorId, OverrideId, OverrideReason};
use time::Date;

/// Request to create an override, already validated field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOverrideCommand {
    /// The date to override.
    pub date: Date,
    /// The covering doctor.
    pub assigned_doctor_id: DoctorId,
    /// Why the override exists.
    pub reason: OverrideReason,
    /// What the pattern said for this date, as reported by the caller.
    /// Stored verbatim.
    pub original_doctor_id: Option<DoctorId>,
}

/// Request to change an existing override. At least one field must be set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOverrideCommand {
    /// The override to change.
    pub override_id: OverrideId,
    /// New reason, if changing.
    pub reason: Option<OverrideReason>,
    /// New covering doctor, if changing.
    pub assigned_doctor_id: Option<DoctorId>,
}

/// Request to provision a doctor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterDoctorCommand {
    /// Trimmed display name.
    pub display_name: String,
    /// Optional initial pattern expression, not yet canonicalized.
    pub schedule_pattern: Option<String>,
}
