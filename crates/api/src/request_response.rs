// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs.
//!
//! Request fields are all optional so that a missing field is reported by
//! validation as a field error instead of failing deserialization.

/// Body of a create-override request.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOverrideRequest {
    /// The date to override, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// The covering doctor.
    pub assigned_doctor_id: Option<String>,
    /// Why the override exists.
    pub reason: Option<String>,
    /// The doctor the pattern would have picked, as seen by the caller.
    pub original_doctor_id: Option<String>,
}

/// Body of an update-override request.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOverrideRequest {
    /// New reason.
    pub reason: Option<String>,
    /// New covering doctor.
    pub assigned_doctor_id: Option<String>,
}

/// Body of a set-pattern request.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSchedulePatternRequest {
    /// The pattern expression.
    pub schedule_pattern: Option<String>,
}

/// Body of a register-doctor request.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDoctorRequest {
    /// The doctor's display name.
    pub display_name: Option<String>,
    /// Optional initial pattern expression.
    pub schedule_pattern: Option<String>,
}

/// Body of a doctor status change.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetDoctorStatusRequest {
    /// Whether the doctor takes part in scheduling.
    pub active: Option<bool>,
}

/// A stored schedule override.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideInfo {
    pub id: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub original_doctor_id: Option<String>,
    pub assigned_doctor_id: String,
    pub reason: String,
    /// RFC 3339.
    pub created_at: String,
    /// RFC 3339.
    pub updated_at: String,
}

/// The effective doctor for one date.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentInfo {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// The assigned doctor, or `null` when nobody is scheduled.
    pub doctor_id: Option<String>,
    /// `override`, `pattern` or `unassigned`.
    pub source: String,
    /// The deciding override, when `source` is `override`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub override_id: Option<String>,
    /// Other doctors whose patterns also claim the date.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub also_claimed_by: Vec<String>,
}

/// A doctor known to the schedule.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorInfo {
    pub id: String,
    pub display_name: String,
    pub is_active: bool,
    /// Canonical pattern expression, if any.
    pub schedule_pattern: Option<String>,
    /// RFC 3339.
    pub created_at: String,
}

/// Result of bulk schedule initialization.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializationResponse {
    /// Doctors given the default pattern.
    pub updated: usize,
    /// Active doctors that already had a pattern.
    pub skipped: usize,
    /// Doctors whose write failed.
    pub failed: usize,
    /// Ids of the updated doctors.
    pub doctors: Vec<String>,
    /// Ids of the skipped doctors.
    pub skipped_doctors: Vec<String>,
}

/// Plain outcome of a command with no resource to return.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StatusResponse {
    /// Always `true` for a successful command.
    pub success: bool,
    /// What happened.
    pub message: String,
}

impl StatusResponse {
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
