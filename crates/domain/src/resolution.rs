// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::pattern::PatternEvaluator;
use crate::types::{Assignment, AssignmentSource, DoctorId, ScheduleOverride};
use time::Date;

/// A doctor's stored pattern expression, as read from the pattern store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorPattern {
    /// The doctor the pattern belongs to.
    pub doctor_id: DoctorId,
    /// The opaque pattern expression.
    pub expression: String,
}

/// Determines the effective doctor for a date.
///
/// Precedence, with no ties:
/// 1. An override for the date wins outright.
/// 2. Otherwise the first doctor in `patterns` whose expression claims the
///    date is assigned. Later claimants are reported in
///    `Assignment::also_claimed_by`.
/// 3. Otherwise nobody is assigned.
///
/// This function is pure: the same inputs always give the same result.
///
/// # Arguments
///
/// * `date` - The date to resolve
/// * `schedule_override` - The override stored for `date`, if any
/// * `patterns` - Every schedulable doctor's pattern, in store order
/// * `evaluator` - Interprets pattern expressions
///
/// # Errors
///
/// Returns an error if a stored pattern expression cannot be evaluated.
/// Patterns are only consulted when no override exists.
pub fn resolve_assignment<E: PatternEvaluator + ?Sized>(
    date: Date,
    schedule_override: Option<&ScheduleOverride>,
    patterns: &[DoctorPattern],
    evaluator: &E,
) -> Result<Assignment, DomainError> {
    if let Some(found) = schedule_override {
        return Ok(Assignment {
            date,
            doctor_id: Some(found.assigned_doctor_id().clone()),
            source: AssignmentSource::Override {
                override_id: found.override_id().clone(),
            },
            also_claimed_by: Vec::new(),
        });
    }

    let mut claimants: Vec<DoctorId> = Vec::new();
    for pattern in patterns {
        if evaluator.claims(&pattern.expression, date)? {
            claimants.push(pattern.doctor_id.clone());
        }
    }

    let mut claimants = claimants.into_iter();
    Ok(match claimants.next() {
        Some(doctor_id) => Assignment {
            date,
            doctor_id: Some(doctor_id),
            source: AssignmentSource::Pattern,
            also_claimed_by: claimants.collect(),
        },
        None => Assignment {
            date,
            doctor_id: None,
            source: AssignmentSource::Unassigned,
            also_claimed_by: Vec::new(),
        },
    })
}
