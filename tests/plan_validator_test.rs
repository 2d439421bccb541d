// ABOUTME: Integration tests for plan validation and tolerance relaxation helpers
// ABOUTME: Covers restriction leaks, unknown ids, band misses and one-sided widening
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::BTreeSet;
use vitaplan::config::PlannerConfig;
use vitaplan::errors::SolveError;
use vitaplan::intelligence::{find_misses, widen_requirements, PlanValidator};
use vitaplan::models::{ActivityCategory, Nutrient, PlanResult, TargetKey, ValidationResult};
use vitaplan::Planner;

fn reference_plan() -> PlanResult {
    let catalog = common::reference_catalog();
    Planner::new(PlannerConfig::default())
        .unwrap()
        .solve(&common::reference_profile(), &catalog)
        .unwrap()
}

fn restrictions(tags: &[&str]) -> BTreeSet<String> {
    tags.iter().map(|t| (*t).to_owned()).collect()
}

// ============================================================================
// Restriction safety
// ============================================================================

#[test]
fn test_clean_plan_has_no_leak() {
    let catalog = common::reference_catalog();
    let plan = reference_plan();
    let none = BTreeSet::new();
    let validator = PlanValidator::new(&catalog, &none);

    assert!(validator
        .restriction_leak(&plan.diet_plan, &plan.exercise_plan)
        .is_none());
    assert_eq!(
        validator.validate(&plan.diet_plan, &plan.exercise_plan, &plan.requirements),
        ValidationResult::Ok
    );
}

#[test]
fn test_tagged_meal_is_reported_with_tags() {
    let catalog = common::reference_catalog();
    let mut plan = reference_plan();
    plan.diet_plan.assignments[0].item_id = "wholegrain_toast".to_owned();
    let no_gluten = restrictions(&["gluten"]);
    let validator = PlanValidator::new(&catalog, &no_gluten);

    let leak = validator
        .restriction_leak(&plan.diet_plan, &plan.exercise_plan)
        .unwrap();
    assert_eq!(leak.item_id, "wholegrain_toast");
    assert_eq!(leak.tags, vec!["gluten".to_owned()]);

    let err: SolveError = leak.into();
    assert!(matches!(err, SolveError::RestrictionViolation { .. }));

    let result = validator.validate(&plan.diet_plan, &plan.exercise_plan, &plan.requirements);
    assert!(matches!(result, ValidationResult::Infeasible { .. }));
}

#[test]
fn test_tagged_activity_is_reported() {
    let catalog = common::reference_catalog();
    let mut plan = reference_plan();
    let session = plan
        .exercise_plan
        .days
        .iter_mut()
        .flat_map(|d| d.sessions.iter_mut())
        .find(|s| s.category == ActivityCategory::Cardio)
        .unwrap();
    session.activity_id = "running".to_owned();
    let knee = restrictions(&["knee_injury"]);

    let leak = PlanValidator::new(&catalog, &knee)
        .restriction_leak(&plan.diet_plan, &plan.exercise_plan)
        .unwrap();
    assert_eq!(leak.item_id, "running");
}

#[test]
fn test_unknown_id_counts_as_leak() {
    let catalog = common::reference_catalog();
    let mut plan = reference_plan();
    plan.diet_plan.assignments[2].item_id = "mystery_stew".to_owned();
    let none = BTreeSet::new();

    let leak = PlanValidator::new(&catalog, &none)
        .diet_leak(&plan.diet_plan)
        .unwrap();
    assert_eq!(leak.item_id, "mystery_stew");
    assert!(leak.tags.is_empty());
}

// ============================================================================
// Band misses and widening
// ============================================================================

#[test]
fn test_misses_report_nutrients_outside_band() {
    let mut plan = reference_plan();
    let target = plan
        .requirements
        .nutrients
        .target(Nutrient::Calories)
        .unwrap()
        .target;
    plan.diet_plan.totals = plan
        .diet_plan
        .totals
        .clone()
        .with(Nutrient::Calories, target * 0.8);

    let misses = find_misses(&plan.diet_plan, &plan.exercise_plan, &plan.requirements);
    assert_eq!(misses.len(), 1);
    assert_eq!(misses[0].key, TargetKey::Nutrient(Nutrient::Calories));
    assert!(misses[0].is_below());
    assert!(misses[0].is_nutrient());
}

#[test]
fn test_missing_sessions_are_reported() {
    let mut plan = reference_plan();
    for day in &mut plan.exercise_plan.days {
        day.sessions.retain(|s| s.category != ActivityCategory::Strength);
    }

    let misses = find_misses(&plan.diet_plan, &plan.exercise_plan, &plan.requirements);
    let keys: Vec<TargetKey> = misses.iter().map(|m| m.key).collect();
    assert!(keys.contains(&TargetKey::ActivityMinutes(ActivityCategory::Strength)));
    assert!(keys.contains(&TargetKey::ActivitySessions(ActivityCategory::Strength)));
    assert!(misses.iter().all(|m| !m.is_nutrient()));
}

#[test]
fn test_widening_only_touches_missed_side() {
    let mut plan = reference_plan();
    let calories = *plan
        .requirements
        .nutrients
        .target(Nutrient::Calories)
        .unwrap();
    plan.diet_plan.totals = plan
        .diet_plan
        .totals
        .clone()
        .with(Nutrient::Calories, calories.target * 1.5);

    let misses = find_misses(&plan.diet_plan, &plan.exercise_plan, &plan.requirements);
    let widened = widen_requirements(&plan.requirements, &misses, 0.05);

    let band = widened.nutrients.target(Nutrient::Calories).unwrap();
    assert!((band.tolerance.above - (calories.tolerance.above + 0.05)).abs() < 1e-12);
    assert!((band.tolerance.below - calories.tolerance.below).abs() < f64::EPSILON);
    assert!((band.target - calories.target).abs() < f64::EPSILON);
    assert_eq!(
        widened.nutrients.target(Nutrient::Protein),
        plan.requirements.nutrients.target(Nutrient::Protein)
    );
}

#[test]
fn test_relaxed_result_reports_original_target_and_applied_tolerance() {
    let catalog = common::reference_catalog();
    let mut plan = reference_plan();
    let original = plan.requirements.clone();
    let target = original.nutrients.target(Nutrient::Calories).unwrap().target;
    plan.diet_plan.totals = plan
        .diet_plan
        .totals
        .clone()
        .with(Nutrient::Calories, target * 0.9);

    let misses = find_misses(&plan.diet_plan, &plan.exercise_plan, &original);
    let applied = widen_requirements(&original, &misses, 0.05);
    let none = BTreeSet::new();
    let result = PlanValidator::new(&catalog, &none).validate_relaxed(
        &plan.diet_plan,
        &plan.exercise_plan,
        &original,
        &applied,
    );

    let adjustments = result.adjustments();
    assert!(result.is_relaxed());
    assert_eq!(adjustments.len(), 1);
    let adjustment = &adjustments[0];
    assert!((adjustment.target - target).abs() < f64::EPSILON);
    assert!((adjustment.delta - (target * 0.9 - target)).abs() < 1e-9);
    assert!((adjustment.tolerance_applied.below - 0.10).abs() < 1e-12);
}
