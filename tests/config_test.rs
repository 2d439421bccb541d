// ABOUTME: Tests for planner and logging configuration defaults, validation and env overrides
// ABOUTME: Environment-mutating tests run serially to avoid cross-test interference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use vitaplan::config::{ConfigError, DietConfig, PlannerConfig};
use vitaplan::errors::SolveError;
use vitaplan::logging::{LogFormat, LoggingConfig};
use vitaplan::models::MealSlot;

// ============================================================================
// Planner configuration
// ============================================================================

#[test]
fn test_defaults_are_valid() {
    let config = PlannerConfig::default();
    config.validate().unwrap();

    assert!((config.requirements.tolerances.calories - 0.05).abs() < f64::EPSILON);
    assert_eq!(config.diet.variety_window_days, 2);
    assert_eq!(config.exercise.per_day_cap_minutes, 90);
    assert_eq!(config.relaxation.max_retries, 3);
    assert!(config.parallel_cores);
}

#[test]
fn test_slot_shares_accumulate_to_one() {
    let diet = DietConfig::default();
    assert!((diet.slot_shares.cumulative_share(MealSlot::Breakfast) - 0.25).abs() < 1e-12);
    assert!((diet.slot_shares.cumulative_share(MealSlot::Snack) - 1.0).abs() < 1e-12);
}

#[test]
fn test_slot_shares_must_sum_to_one() {
    let mut config = PlannerConfig::default();
    config.diet.slot_shares.snack = 0.40;

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidWeights(_)));
}

#[test]
fn test_zero_backtrack_breadth_rejected() {
    let mut config = PlannerConfig::default();
    config.diet.backtrack_breadth = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_error_maps_to_solve_error() {
    let err: SolveError = ConfigError::Parse("Invalid VITAPLAN_FOCUS_BOOST".into()).into();
    assert!(matches!(err, SolveError::Config(ref message) if message.contains("FOCUS_BOOST")));
}

#[test]
#[serial]
fn test_environment_overrides_apply() {
    std::env::set_var("VITAPLAN_PER_DAY_CAP_MINUTES", "60");
    std::env::set_var("VITAPLAN_VARIETY_WINDOW_DAYS", "3");
    std::env::set_var("VITAPLAN_PARALLEL_CORES", "false");

    let config = PlannerConfig::load().unwrap();

    assert_eq!(config.exercise.per_day_cap_minutes, 60);
    assert_eq!(config.diet.variety_window_days, 3);
    assert!(!config.parallel_cores);

    // Clean up
    std::env::remove_var("VITAPLAN_PER_DAY_CAP_MINUTES");
    std::env::remove_var("VITAPLAN_VARIETY_WINDOW_DAYS");
    std::env::remove_var("VITAPLAN_PARALLEL_CORES");
}

#[test]
#[serial]
fn test_unparseable_override_is_an_error() {
    std::env::set_var("VITAPLAN_CALORIE_TOLERANCE", "five percent");

    let err = PlannerConfig::load().unwrap_err();
    assert!(
        matches!(err, ConfigError::Parse(ref message) if message.contains("VITAPLAN_CALORIE_TOLERANCE"))
    );

    std::env::remove_var("VITAPLAN_CALORIE_TOLERANCE");
}

#[test]
#[serial]
fn test_out_of_range_override_fails_validation() {
    std::env::set_var("VITAPLAN_TOLERANCE_STEP", "0");

    assert!(PlannerConfig::load().is_err());

    std::env::remove_var("VITAPLAN_TOLERANCE_STEP");
}

// ============================================================================
// Logging configuration
// ============================================================================

#[test]
#[serial]
fn test_logging_config_from_env() {
    std::env::set_var("LOG_FORMAT", "json");
    std::env::set_var("LOG_INCLUDE_SPANS", "1");

    let config = LoggingConfig::from_env();
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_spans);
    assert!(!config.service_version.is_empty());

    std::env::remove_var("LOG_FORMAT");
    std::env::remove_var("LOG_INCLUDE_SPANS");
}

#[test]
#[serial]
fn test_logging_defaults_to_pretty() {
    std::env::remove_var("LOG_FORMAT");
    assert_eq!(LoggingConfig::from_env().format, LogFormat::Pretty);
    assert_eq!(LoggingConfig::default().service_name, "vitaplan");
}
