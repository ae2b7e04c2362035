// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment resolution against live stores.
//!
//! The precedence rules live in [`resolve_assignment`]; this module only
//! fetches the override and pattern snapshots it needs.

use crate::error::ScheduleError;
use crate::store::{OverrideStore, PatternStore};
use clinic_schedule_domain::{
    Assignment, DoctorPattern, DomainError, PatternEvaluator, ScheduleOverride,
    StandardPatternEvaluator, resolve_assignment, validate_date_range,
};
use std::collections::BTreeMap;
use time::Date;
use tracing::{debug, warn};

/// Resolves the effective doctor for dates.
pub struct AssignmentResolver<'a, S: ?Sized, E: ?Sized> {
    store: &'a mut S,
    evaluator: &'a E,
}

impl<'a, S> AssignmentResolver<'a, S, StandardPatternEvaluator>
where
    S: OverrideStore + PatternStore + ?Sized,
{
    /// A resolver using the built-in pattern syntax.
    pub const fn standard(store: &'a mut S) -> Self {
        Self {
            store,
            evaluator: &StandardPatternEvaluator,
        }
    }
}

impl<'a, S, E> AssignmentResolver<'a, S, E>
where
    S: OverrideStore + PatternStore + ?Sized,
    E: PatternEvaluator + ?Sized,
{
    pub const fn new(store: &'a mut S, evaluator: &'a E) -> Self {
        Self { store, evaluator }
    }

    /// Resolves one date.
    ///
    /// Patterns are only read when no override covers the date.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or a stored pattern is corrupt.
    pub fn resolve(&mut self, date: Date) -> Result<Assignment, ScheduleError> {
        let found: Option<ScheduleOverride> = self.store.get_override_by_date(date)?;
        let patterns: Vec<DoctorPattern> = if found.is_some() {
            Vec::new()
        } else {
            self.store.list_patterns()?
        };

        self.evaluate(date, found.as_ref(), &patterns)
    }

    /// Resolves every date from `from` to `to` inclusive.
    ///
    /// Both snapshots are read once, so the whole range reflects a single
    /// view of the stores.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is reversed or longer than 366 days,
    /// the store fails, or a stored pattern is corrupt.
    pub fn resolve_range(&mut self, from: Date, to: Date) -> Result<Vec<Assignment>, ScheduleError> {
        validate_date_range(from, to)?;

        let overrides: BTreeMap<Date, ScheduleOverride> = self
            .store
            .list_overrides()?
            .into_iter()
            .filter(|o| o.date() >= from && o.date() <= to)
            .map(|o| (o.date(), o))
            .collect();
        let patterns: Vec<DoctorPattern> = self.store.list_patterns()?;

        let mut assignments: Vec<Assignment> = Vec::new();
        let mut current: Date = from;
        loop {
            assignments.push(self.evaluate(current, overrides.get(&current), &patterns)?);
            if current == to {
                break;
            }
            current = current
                .next_day()
                .ok_or_else(|| DomainError::DateArithmeticOverflow {
                    operation: format!("advancing past {current}"),
                })?;
        }

        debug!(%from, %to, days = assignments.len(), "Resolved assignment range");
        Ok(assignments)
    }

    fn evaluate(
        &self,
        date: Date,
        found: Option<&ScheduleOverride>,
        patterns: &[DoctorPattern],
    ) -> Result<Assignment, ScheduleError> {
        let assignment: Assignment = resolve_assignment(date, found, patterns, self.evaluator)
            .map_err(|e| ScheduleError::CorruptSchedulePattern(e.to_string()))?;

        if !assignment.also_claimed_by.is_empty() {
            let others: Vec<String> = assignment
                .also_claimed_by
                .iter()
                .map(ToString::to_string)
                .collect();
            warn!(
                %date,
                assigned = ?assignment.doctor_id.as_ref().map(ToString::to_string),
                also_claimed_by = ?others,
                "Multiple doctor patterns claim the same date"
            );
        }

        Ok(assignment)
    }
}
