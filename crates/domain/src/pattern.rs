// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recurring schedule patterns.
//!
//! A pattern is stored as an expression string and evaluated against a
//! calendar date. Three forms are supported:
//!
//! - `daily`: every date
//! - `weekly:MON,WED,FRI`: fixed weekdays
//! - `rotation:2026-01-05:14:0,1,2,3,4`: an N-day cycle anchored on a date,
//!   listing the 0-based days of the cycle that are covered
//!
//! Keywords and weekday names are case-insensitive. [`SchedulePattern`]'s
//! `Display` output is the canonical form that gets persisted.
//!
//! Callers that only need a yes/no answer should go through
//! [`PatternEvaluator`] so the syntax can change without touching them.

use crate::error::DomainError;
use crate::validation::parse_iso_date;
use std::collections::BTreeSet;
use std::str::FromStr;
use time::{Date, Weekday};

/// Longest rotation cycle, in days.
const MAX_CYCLE_DAYS: u16 = 366;

const WEEKDAYS: [(Weekday, &str); 7] = [
    (Weekday::Monday, "MON"),
    (Weekday::Tuesday, "TUE"),
    (Weekday::Wednesday, "WED"),
    (Weekday::Thursday, "THU"),
    (Weekday::Friday, "FRI"),
    (Weekday::Saturday, "SAT"),
    (Weekday::Sunday, "SUN"),
];

/// A set of weekdays stored as a 7-bit mask (bit 0 = Monday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// Creates an empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns a copy of this set with `day` added.
    #[must_use]
    pub const fn with(self, day: Weekday) -> Self {
        Self(self.0 | (1 << day.number_days_from_monday()))
    }

    /// Checks whether `day` is in the set.
    #[must_use]
    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.number_days_from_monday()) != 0
    }

    /// Checks whether the set has no days.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A parsed recurring assignment rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulePattern {
    /// Every calendar date.
    Daily,
    /// Fixed days of the week.
    Weekly {
        /// The covered weekdays. Never empty.
        days: WeekdaySet,
    },
    /// An N-day cycle anchored on a date.
    Rotation {
        /// A date on which the cycle is at day 0.
        anchor: Date,
        /// Cycle length in days (1..=366).
        cycle_days: u16,
        /// Covered cycle days, each `< cycle_days`. Never empty.
        on_days: BTreeSet<u16>,
    },
}

impl SchedulePattern {
    /// Checks whether this pattern assigns its doctor to `date`.
    #[must_use]
    pub fn claims(&self, date: Date) -> bool {
        match self {
            Self::Daily => true,
            Self::Weekly { days } => days.contains(date.weekday()),
            Self::Rotation {
                anchor,
                cycle_days,
                on_days,
            } => {
                // Euclidean remainder keeps dates before the anchor in phase.
                let offset: i64 = (date - *anchor)
                    .whole_days()
                    .rem_euclid(i64::from(*cycle_days));
                u16::try_from(offset).is_ok_and(|day| on_days.contains(&day))
            }
        }
    }
}

fn invalid(expression: &str, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidSchedulePattern {
        expression: expression.to_string(),
        reason: reason.into(),
    }
}

fn parse_weekly(expression: &str, args: &str) -> Result<SchedulePattern, DomainError> {
    let mut days: WeekdaySet = WeekdaySet::empty();

    for token in args.split(',').map(str::trim) {
        let day: Weekday = WEEKDAYS
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(token))
            .map(|(day, _)| *day)
            .ok_or_else(|| invalid(expression, format!("unknown weekday '{token}'")))?;
        days = days.with(day);
    }

    if days.is_empty() {
        return Err(invalid(expression, "weekly pattern needs at least one day"));
    }

    Ok(SchedulePattern::Weekly { days })
}

fn parse_rotation(expression: &str, args: &str) -> Result<SchedulePattern, DomainError> {
    let parts: Vec<&str> = args.split(':').map(str::trim).collect();
    let [anchor, cycle, on] = parts.as_slice() else {
        return Err(invalid(
            expression,
            "rotation pattern must be rotation:<anchor>:<cycle days>:<on days>",
        ));
    };

    let anchor: Date = parse_iso_date(anchor)
        .map_err(|e| invalid(expression, format!("bad anchor date: {e}")))?;

    let cycle_days: u16 = cycle
        .parse()
        .ok()
        .filter(|days| (1..=MAX_CYCLE_DAYS).contains(days))
        .ok_or_else(|| {
            invalid(
                expression,
                format!("cycle length must be between 1 and {MAX_CYCLE_DAYS} days"),
            )
        })?;

    let mut on_days: BTreeSet<u16> = BTreeSet::new();
    for token in on.split(',').map(str::trim) {
        let day: u16 = token
            .parse()
            .ok()
            .filter(|day| *day < cycle_days)
            .ok_or_else(|| {
                invalid(
                    expression,
                    format!("cycle day '{token}' must be between 0 and {}", cycle_days - 1),
                )
            })?;
        on_days.insert(day);
    }

    Ok(SchedulePattern::Rotation {
        anchor,
        cycle_days,
        on_days,
    })
}

impl FromStr for SchedulePattern {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expression: &str = s.trim();
        if expression.is_empty() {
            return Err(DomainError::EmptySchedulePattern);
        }

        let (keyword, args): (&str, Option<&str>) = match expression.split_once(':') {
            Some((keyword, args)) => (keyword.trim(), Some(args)),
            None => (expression, None),
        };

        match (keyword.to_ascii_lowercase().as_str(), args) {
            ("daily", None) => Ok(Self::Daily),
            ("daily", Some(_)) => Err(invalid(expression, "daily takes no arguments")),
            ("weekly", Some(args)) => parse_weekly(expression, args),
            ("rotation", Some(args)) => parse_rotation(expression, args),
            ("weekly" | "rotation", None) => {
                Err(invalid(expression, format!("{keyword} needs arguments")))
            }
            _ => Err(invalid(
                expression,
                format!("unknown pattern kind '{keyword}', expected daily, weekly or rotation"),
            )),
        }
    }
}

impl std::fmt::Display for SchedulePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly { days } => {
                let names: Vec<&str> = WEEKDAYS
                    .iter()
                    .filter(|(day, _)| days.contains(*day))
                    .map(|(_, name)| *name)
                    .collect();
                write!(f, "weekly:{}", names.join(","))
            }
            Self::Rotation {
                anchor,
                cycle_days,
                on_days,
            } => {
                let days: Vec<String> = on_days.iter().map(u16::to_string).collect();
                write!(f, "rotation:{anchor}:{cycle_days}:{}", days.join(","))
            }
        }
    }
}

/// Parses an expression and returns its canonical form.
///
/// # Errors
///
/// Returns `DomainError::EmptySchedulePattern` for blank input, or
/// `DomainError::InvalidSchedulePattern` if the expression does not parse.
pub fn canonicalize_pattern(expression: &str) -> Result<String, DomainError> {
    expression
        .parse::<SchedulePattern>()
        .map(|pattern| pattern.to_string())
}

/// Evaluates stored pattern expressions against dates.
pub trait PatternEvaluator {
    /// Checks whether `expression` assigns its doctor to `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression cannot be evaluated.
    fn claims(&self, expression: &str, date: Date) -> Result<bool, DomainError>;
}

/// Evaluator for the `daily` / `weekly` / `rotation` syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPatternEvaluator;

impl PatternEvaluator for StandardPatternEvaluator {
    fn claims(&self, expression: &str, date: Date) -> Result<bool, DomainError> {
        Ok(expression.parse::<SchedulePattern>()?.claims(date))
    }
}
