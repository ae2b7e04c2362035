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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod clinic_time;
mod error;
mod pattern;
mod resolution;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use clinic_time::ClinicTimezone;
pub use error::DomainError;
pub use pattern::{
    PatternEvaluator, SchedulePattern, StandardPatternEvaluator, WeekdaySet,
    canonicalize_pattern,
};
pub use resolution::{DoctorPattern, resolve_assignment};
pub use types::{
    Assignment, AssignmentSource, Doctor, DoctorId, OverrideId, OverrideReason, ScheduleOverride,
};
pub use validation::{
    MAX_RESOLUTION_RANGE_DAYS, parse_iso_date, validate_date_range, validate_display_name,
    validate_distinct_doctors, validate_not_in_past,
};
