// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::date;
use crate::{
    DomainError, PatternEvaluator, SchedulePattern, StandardPatternEvaluator,
    canonicalize_pattern,
};
use time::{Month, Weekday};

#[test]
fn test_daily_claims_every_date() {
    let pattern: SchedulePattern = "daily".parse().unwrap();
    assert!(pattern.claims(date(2025, Month::March, 10)));
    assert!(pattern.claims(date(2025, Month::March, 16)));
}

#[test]
fn test_weekly_claims_only_listed_days() {
    let pattern: SchedulePattern = "weekly:MON,WED".parse().unwrap();

    // 2025-03-10 is a Monday.
    let monday = date(2025, Month::March, 10);
    assert_eq!(monday.weekday(), Weekday::Monday);

    assert!(pattern.claims(monday));
    assert!(!pattern.claims(date(2025, Month::March, 11)));
    assert!(pattern.claims(date(2025, Month::March, 12)));
    assert!(!pattern.claims(date(2025, Month::March, 16)));
}

#[test]
fn test_weekly_is_case_insensitive_and_canonicalized() {
    assert_eq!(
        canonicalize_pattern(" Weekly: fri, mon ,MON ").unwrap(),
        "weekly:MON,FRI"
    );
}

#[test]
fn test_weekly_rejects_unknown_day() {
    let result = "weekly:MON,FUNDAY".parse::<SchedulePattern>();
    assert!(matches!(
        result,
        Err(DomainError::InvalidSchedulePattern { reason, .. }) if reason.contains("FUNDAY")
    ));
}

#[test]
fn test_weekly_requires_arguments() {
    assert!("weekly".parse::<SchedulePattern>().is_err());
    assert!("weekly:".parse::<SchedulePattern>().is_err());
}

#[test]
fn test_rotation_cycles_from_anchor() {
    // Two-week cycle, first week Monday..Friday covered.
    let pattern: SchedulePattern = "rotation:2025-03-10:14:0,1,2,3,4".parse().unwrap();

    assert!(pattern.claims(date(2025, Month::March, 10)));
    assert!(pattern.claims(date(2025, Month::March, 14)));
    assert!(!pattern.claims(date(2025, Month::March, 15)));
    assert!(!pattern.claims(date(2025, Month::March, 17)));
    assert!(pattern.claims(date(2025, Month::March, 24)));
}

#[test]
fn test_rotation_before_anchor_stays_in_phase() {
    let pattern: SchedulePattern = "rotation:2025-03-10:14:0".parse().unwrap();

    assert!(pattern.claims(date(2025, Month::February, 24)));
    assert!(!pattern.claims(date(2025, Month::March, 3)));
}

#[test]
fn test_rotation_rejects_day_outside_cycle() {
    let result = "rotation:2025-03-10:7:7".parse::<SchedulePattern>();
    assert!(matches!(
        result,
        Err(DomainError::InvalidSchedulePattern { .. })
    ));
}

#[test]
fn test_rotation_rejects_zero_cycle_and_bad_anchor() {
    assert!("rotation:2025-03-10:0:0".parse::<SchedulePattern>().is_err());
    assert!("rotation:2025-3-10:7:0".parse::<SchedulePattern>().is_err());
    assert!("rotation:2025-03-10:7".parse::<SchedulePattern>().is_err());
}

#[test]
fn test_rotation_canonical_form_sorts_days() {
    assert_eq!(
        canonicalize_pattern("ROTATION:2025-03-10:3:2,0,2").unwrap(),
        "rotation:2025-03-10:3:0,2"
    );
}

#[test]
fn test_blank_pattern_is_rejected() {
    assert_eq!(
        canonicalize_pattern("   "),
        Err(DomainError::EmptySchedulePattern)
    );
}

#[test]
fn test_unknown_kind_is_rejected() {
    assert!(matches!(
        canonicalize_pattern("fortnightly:MON"),
        Err(DomainError::InvalidSchedulePattern { .. })
    ));
    assert!(canonicalize_pattern("daily:MON").is_err());
}

#[test]
fn test_standard_evaluator_surfaces_corrupt_expressions() {
    let evaluator = StandardPatternEvaluator;
    assert!(
        evaluator
            .claims("weekly:MON", date(2025, Month::March, 10))
            .unwrap()
    );
    assert!(
        evaluator
            .claims("garbage", date(2025, Month::March, 10))
            .is_err()
    );
}
