// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::validate_distinct_doctors;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Number of hexadecimal characters in a record identifier.
const IDENTIFIER_LENGTH: usize = 32;

/// Minimum override reason length, in characters, after trimming.
const MIN_REASON_CHARS: usize = 3;

/// Maximum override reason length, in characters, after trimming.
const MAX_REASON_CHARS: usize = 500;

/// Checks the fixed-length hex identifier format and lowercases the value.
fn normalize_identifier(value: &str) -> Result<String, DomainError> {
    if value.len() != IDENTIFIER_LENGTH || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(DomainError::InvalidIdentifier(value.to_string()));
    }
    Ok(value.to_ascii_lowercase())
}

/// Declares a 32-hex-character identifier newtype.
///
/// Identifiers are normalized to lowercase so that lookups are
/// case-insensitive.
macro_rules! hex_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parses and normalizes an identifier.
            ///
            /// # Errors
            ///
            /// Returns an error if the value is not exactly 32 hexadecimal
            /// characters.
            pub fn parse(value: &str) -> Result<Self, DomainError> {
                normalize_identifier(value).map(Self)
            }

            /// Builds an identifier from 128 bits, zero-padded to 32 characters.
            #[must_use]
            pub fn from_u128(value: u128) -> Self {
                Self(format!("{value:032x}"))
            }

            /// Returns the normalized identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

hex_identifier! {
    /// Identifies a doctor. Owned by the doctor directory, referenced here.
    DoctorId
}

hex_identifier! {
    /// Identifies a schedule override record.
    OverrideId
}

/// Free-text justification for an override.
///
/// Always trimmed and between 3 and 500 characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverrideReason {
    value: String,
}

impl OverrideReason {
    /// Creates a reason from user input, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed reason is shorter than 3 or longer
    /// than 500 characters.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        let chars: usize = trimmed.chars().count();

        if chars < MIN_REASON_CHARS {
            return Err(DomainError::InvalidReason(format!(
                "Reason must be at least {MIN_REASON_CHARS} characters"
            )));
        }
        if chars > MAX_REASON_CHARS {
            return Err(DomainError::InvalidReason(format!(
                "Reason must be at most {MAX_REASON_CHARS} characters, got {chars}"
            )));
        }

        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Returns the reason text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A doctor as seen by the schedule subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    /// The doctor's identifier.
    pub doctor_id: DoctorId,
    /// Human-readable name.
    pub display_name: String,
    /// Inactive doctors are never resolved from patterns and cannot be
    /// assigned by new overrides.
    pub is_active: bool,
    /// The doctor's recurring pattern expression, if any.
    pub schedule_pattern: Option<String>,
    /// When the doctor was provisioned.
    pub created_at: OffsetDateTime,
}

/// A date-specific exception to the pattern-derived assignment.
///
/// The only way to build one is through [`ScheduleOverride::new`] or
/// [`ScheduleOverride::apply_update`], both of which enforce that the
/// assigned doctor differs from the original doctor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOverride {
    override_id: OverrideId,
    date: Date,
    original_doctor_id: Option<DoctorId>,
    assigned_doctor_id: DoctorId,
    reason: OverrideReason,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl ScheduleOverride {
    /// Creates an override record.
    ///
    /// `original_doctor_id` is kept exactly as given; it records what the
    /// pattern said when the override was made and is never re-derived.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SameDoctorOverride` if the assigned doctor is
    /// also the original doctor.
    pub fn new(
        override_id: OverrideId,
        date: Date,
        original_doctor_id: Option<DoctorId>,
        assigned_doctor_id: DoctorId,
        reason: OverrideReason,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        let record: Self = Self {
            override_id,
            date,
            original_doctor_id,
            assigned_doctor_id,
            reason,
            created_at,
            updated_at,
        };
        record.validate_invariants()?;
        Ok(record)
    }

    /// Re-checks the entity-level invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if the assigned doctor equals the original doctor.
    pub fn validate_invariants(&self) -> Result<(), DomainError> {
        validate_distinct_doctors(&self.assigned_doctor_id, self.original_doctor_id.as_ref())
    }

    /// Returns a copy with the supplied fields replaced.
    ///
    /// Fields passed as `None` keep their previous values. The date and the
    /// original doctor never change.
    ///
    /// # Errors
    ///
    /// Returns an error if both fields are `None`, or if the result would
    /// assign the original doctor.
    pub fn apply_update(
        &self,
        reason: Option<OverrideReason>,
        assigned_doctor_id: Option<DoctorId>,
        updated_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        if reason.is_none() && assigned_doctor_id.is_none() {
            return Err(DomainError::EmptyOverrideUpdate);
        }

        let updated: Self = Self {
            override_id: self.override_id.clone(),
            date: self.date,
            original_doctor_id: self.original_doctor_id.clone(),
            assigned_doctor_id: assigned_doctor_id
                .unwrap_or_else(|| self.assigned_doctor_id.clone()),
            reason: reason.unwrap_or_else(|| self.reason.clone()),
            created_at: self.created_at,
            updated_at,
        };
        updated.validate_invariants()?;
        Ok(updated)
    }

    #[must_use]
    pub const fn override_id(&self) -> &OverrideId {
        &self.override_id
    }

    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }

    #[must_use]
    pub const fn original_doctor_id(&self) -> Option<&DoctorId> {
        self.original_doctor_id.as_ref()
    }

    #[must_use]
    pub const fn assigned_doctor_id(&self) -> &DoctorId {
        &self.assigned_doctor_id
    }

    #[must_use]
    pub const fn reason(&self) -> &OverrideReason {
        &self.reason
    }

    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }
}

/// Where an assignment came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentSource {
    /// An override exists for the date.
    Override {
        /// The override that decided the assignment.
        override_id: OverrideId,
    },
    /// A doctor's recurring pattern claims the date.
    Pattern,
    /// Nothing claims the date.
    Unassigned,
}

impl AssignmentSource {
    /// Returns the wire name of this source.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Override { .. } => "override",
            Self::Pattern => "pattern",
            Self::Unassigned => "unassigned",
        }
    }
}

/// The effective doctor for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The resolved date.
    pub date: Date,
    /// The assigned doctor, or `None` when no doctor is scheduled.
    pub doctor_id: Option<DoctorId>,
    /// How the doctor was determined.
    pub source: AssignmentSource,
    /// Other doctors whose patterns also claim this date.
    ///
    /// Always empty for override and unassigned resolutions. Non-empty means
    /// the patterns overlap and the first doctor in store order won.
    pub also_claimed_by: Vec<DoctorId>,
}
