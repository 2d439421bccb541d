// ABOUTME: Integration tests for the weekly exercise allocation core
// ABOUTME: Covers session splitting, strength session counts, per-day caps and focus rotation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use vitaplan::config::{ExerciseConfig, RequirementsConfig};
use vitaplan::errors::SolveError;
use vitaplan::intelligence::{compute_requirements, ExerciseAllocator};
use vitaplan::models::{
    Activity, ActivityCategory, ActivityRequirements, CategoryTarget, TargetBand, TimeOfDay,
    Tolerance,
};

fn requirements(targets: &[(ActivityCategory, f64, Option<u32>)]) -> ActivityRequirements {
    common::init_test_logging();
    ActivityRequirements {
        body_weight_kg: 70.0,
        targets: targets
            .iter()
            .map(|(category, minutes, min_sessions)| {
                (
                    *category,
                    CategoryTarget {
                        minutes: TargetBand::new(*minutes, Tolerance::symmetric(0.10)),
                        min_sessions: *min_sessions,
                    },
                )
            })
            .collect(),
    }
}

fn pool() -> Vec<Activity> {
    vec![
        common::activity("walk", ActivityCategory::Cardio, 3.5),
        common::activity("cycle", ActivityCategory::Cardio, 6.8),
        common::activity("circuit", ActivityCategory::Strength, 3.8),
        common::activity("stretch", ActivityCategory::Flexibility, 2.3),
    ]
}

// ============================================================================
// Session splitting
// ============================================================================

#[test]
fn test_strength_minimum_forces_three_distinct_days() {
    let config = ExerciseConfig::default();
    let activities = pool();
    let requirements = requirements(&[(ActivityCategory::Strength, 90.0, Some(3))]);

    let plan = ExerciseAllocator::new(&config)
        .solve_week(&requirements, activities.iter(), &BTreeSet::new())
        .unwrap();

    assert_eq!(plan.sessions_by_category()[&ActivityCategory::Strength], 3);
    assert!(plan.days_with(ActivityCategory::Strength) >= 3);
    assert_eq!(plan.minutes_by_category()[&ActivityCategory::Strength], 90);
    assert!(plan
        .days
        .iter()
        .flat_map(|d| &d.sessions)
        .all(|s| s.duration_minutes == 30 && s.time_of_day == TimeOfDay::Evening));
}

#[test]
fn test_reference_week_meets_every_target() {
    let config = ExerciseConfig::default();
    let activities = pool()
        .into_iter()
        .chain([
            common::activity("yoga", ActivityCategory::MindBody, 2.5),
            common::activity("breathing", ActivityCategory::Breathing, 1.3),
        ])
        .collect::<Vec<_>>();
    let requirements = compute_requirements(
        &common::reference_profile(),
        &RequirementsConfig::default(),
    )
    .unwrap()
    .activity;

    let plan = ExerciseAllocator::new(&config)
        .solve_week(&requirements, activities.iter(), &BTreeSet::new())
        .unwrap();

    assert!(!plan.is_capped());
    assert_eq!(plan.days.len(), 7);
    let minutes = plan.minutes_by_category();
    for (category, target) in &requirements.targets {
        let achieved = f64::from(minutes.get(category).copied().unwrap_or(0));
        assert!(target.minutes.contains(achieved), "{category} missed");
    }
    assert!(plan
        .days
        .iter()
        .all(|day| day.total_minutes() <= config.per_day_cap_minutes));
}

#[test]
fn test_sessions_are_ordered_by_time_of_day() {
    let config = ExerciseConfig::default();
    let activities = pool();
    let requirements = requirements(&[
        (ActivityCategory::Cardio, 210.0, None),
        (ActivityCategory::Strength, 45.0, None),
    ]);

    let plan = ExerciseAllocator::new(&config)
        .solve_week(&requirements, activities.iter(), &BTreeSet::new())
        .unwrap();

    for day in &plan.days {
        let periods: Vec<TimeOfDay> = day.sessions.iter().map(|s| s.time_of_day).collect();
        let mut sorted = periods.clone();
        sorted.sort();
        assert_eq!(periods, sorted);
    }
    let monday = &plan.days[0];
    let categories: Vec<ActivityCategory> = monday.sessions.iter().map(|s| s.category).collect();
    assert_eq!(
        categories,
        vec![ActivityCategory::Cardio, ActivityCategory::Strength]
    );
    assert_eq!(monday.sessions[1].time_of_day, TimeOfDay::Evening);
}

#[test]
fn test_session_energy_uses_met_and_weight() {
    let config = ExerciseConfig::default();
    let activities = pool();
    let requirements = requirements(&[(ActivityCategory::Flexibility, 20.0, None)]);

    let plan = ExerciseAllocator::new(&config)
        .solve_week(&requirements, activities.iter(), &BTreeSet::new())
        .unwrap();

    let session = &plan.days[0].sessions[0];
    // 2.3 MET x 3.5 x 70 kg / 200 x 20 min
    assert!((session.estimated_kcal - 56.35).abs() < 1e-9);
}

// ============================================================================
// Capacity and feasibility
// ============================================================================

#[test]
fn test_overflow_is_reported_not_dropped() {
    let config = ExerciseConfig {
        per_day_cap_minutes: 30,
        ..ExerciseConfig::default()
    };
    let activities = pool();
    let requirements = requirements(&[(ActivityCategory::Cardio, 300.0, None)]);

    let plan = ExerciseAllocator::new(&config)
        .solve_week(&requirements, activities.iter(), &BTreeSet::new())
        .unwrap();

    let capped = plan.capped.as_ref().unwrap();
    assert_eq!(
        capped.unallocated,
        BTreeMap::from([(ActivityCategory::Cardio, 90)])
    );
    assert_eq!(plan.minutes_by_category()[&ActivityCategory::Cardio], 210);
    assert!(plan.days.iter().all(|day| day.total_minutes() == 30));
}

#[test]
fn test_category_without_activity_is_infeasible() {
    let config = ExerciseConfig::default();
    let activities = pool();
    let requirements = requirements(&[(ActivityCategory::Dance, 45.0, None)]);

    let err = ExerciseAllocator::new(&config)
        .solve_week(&requirements, activities.iter(), &BTreeSet::new())
        .unwrap_err();
    assert!(matches!(
        err,
        SolveError::NoFeasibleActivity {
            category: ActivityCategory::Dance
        }
    ));
}

#[test]
fn test_empty_requirements_give_empty_week() {
    let config = ExerciseConfig::default();
    let plan = ExerciseAllocator::new(&config)
        .solve_week(&requirements(&[]), pool().iter(), &BTreeSet::new())
        .unwrap();

    assert_eq!(plan.days.len(), 7);
    assert!(plan.days.iter().all(|day| day.sessions.is_empty()));
    assert!(!plan.is_capped());
}

#[test]
fn test_zero_minimum_session_length_is_rejected() {
    let requirements = requirements(&[(ActivityCategory::Cardio, 700.0, None)]);
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        let config = ExerciseConfig {
            min_session_minutes: 0,
            ..ExerciseConfig::default()
        };
        let activities = pool();
        let result = ExerciseAllocator::new(&config).solve_week(
            &requirements,
            activities.iter(),
            &BTreeSet::new(),
        );
        let _ = sender.send(result);
    });

    let result = receiver
        .recv_timeout(Duration::from_secs(5))
        .expect("allocation must terminate");
    assert!(matches!(result, Err(SolveError::Config(_))));
}

#[test]
fn test_invalid_cap_is_rejected() {
    let config = ExerciseConfig {
        per_day_cap_minutes: 0,
        ..ExerciseConfig::default()
    };
    let err = ExerciseAllocator::new(&config)
        .solve_week(
            &requirements(&[(ActivityCategory::Cardio, 150.0, None)]),
            pool().iter(),
            &BTreeSet::new(),
        )
        .unwrap_err();
    assert!(matches!(err, SolveError::Config(ref message) if message.contains("cap")));
}

// ============================================================================
// Activity choice
// ============================================================================

#[test]
fn test_focus_area_boosts_matching_activity() {
    let config = ExerciseConfig::default();
    let mut activities = pool();
    activities[1].focus_tags.insert("legs".to_owned());
    let requirements = requirements(&[(ActivityCategory::Cardio, 150.0, None)]);
    let focus = BTreeSet::from(["legs".to_owned()]);

    let plan = ExerciseAllocator::new(&config)
        .solve_week(&requirements, activities.iter(), &focus)
        .unwrap();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for session in plan.days.iter().flat_map(|d| &d.sessions) {
        *counts.entry(session.activity_id.as_str()).or_default() += 1;
    }
    assert_eq!(counts["cycle"], 3);
    assert_eq!(counts["walk"], 2);
}

#[test]
fn test_activities_rotate_without_focus() {
    let config = ExerciseConfig::default();
    let activities = pool();
    let requirements = requirements(&[(ActivityCategory::Cardio, 120.0, None)]);

    let plan = ExerciseAllocator::new(&config)
        .solve_week(&requirements, activities.iter(), &BTreeSet::new())
        .unwrap();

    let ids: Vec<&str> = plan
        .days
        .iter()
        .flat_map(|d| &d.sessions)
        .map(|s| s.activity_id.as_str())
        .collect();
    assert_eq!(ids, vec!["walk", "cycle", "walk", "cycle"]);
}
