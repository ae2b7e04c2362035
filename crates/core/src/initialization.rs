// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ScheduleError;
use crate::store::PatternStore;
use clinic_schedule_domain::{DoctorId, DoctorPattern, canonicalize_pattern};
use tracing::{info, warn};

/// Pattern applied to doctors who have none.
pub const DEFAULT_SCHEDULE_PATTERN: &str = "weekly:MON,TUE,WED,THU,FRI";

/// Outcome of a bulk initialization run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InitializationSummary {
    /// Doctors given the default pattern in this run.
    pub updated: usize,
    /// Active doctors that already had a pattern.
    pub skipped: usize,
    /// Doctors whose write failed.
    pub failed: usize,
    /// Ids of the updated doctors.
    pub doctors: Vec<DoctorId>,
    /// Ids of the skipped doctors.
    pub skipped_doctors: Vec<DoctorId>,
}

/// Assigns a default pattern to every active doctor that lacks one.
pub struct ScheduleInitializer {
    default_pattern: String,
}

impl ScheduleInitializer {
    /// Creates an initializer with the given default pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is blank or does not parse.
    pub fn new(default_pattern: &str) -> Result<Self, ScheduleError> {
        Ok(Self {
            default_pattern: canonicalize_pattern(default_pattern)?,
        })
    }

    #[must_use]
    pub fn default_pattern(&self) -> &str {
        &self.default_pattern
    }

    /// Runs the initialization.
    ///
    /// A failed write for one doctor is logged and counted; the remaining
    /// doctors are still processed. Running again changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error only if the doctor lists cannot be read.
    pub fn initialize_defaults<S: PatternStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<InitializationSummary, ScheduleError> {
        let missing: Vec<DoctorId> = store.list_doctors_missing_pattern()?;
        let existing: Vec<DoctorPattern> = store.list_patterns()?;

        let mut summary: InitializationSummary = InitializationSummary {
            skipped: existing.len(),
            skipped_doctors: existing.into_iter().map(|p| p.doctor_id).collect(),
            ..InitializationSummary::default()
        };

        for doctor_id in missing {
            match store.set_pattern(&doctor_id, &self.default_pattern) {
                Ok(()) => {
                    summary.updated += 1;
                    summary.doctors.push(doctor_id);
                }
                Err(e) => {
                    warn!(%doctor_id, error = %e, "Failed to assign default schedule pattern");
                    summary.failed += 1;
                }
            }
        }

        info!(
            updated = summary.updated,
            skipped = summary.skipped,
            failed = summary.failed,
            pattern = %self.default_pattern,
            "Initialized default schedule patterns"
        );

        Ok(summary)
    }
}

impl Default for ScheduleInitializer {
    fn default() -> Self {
        Self {
            default_pattern: String::from(DEFAULT_SCHEDULE_PATTERN),
        }
    }
}
