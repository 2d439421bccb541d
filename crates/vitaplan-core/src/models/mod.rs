// ABOUTME: Domain models exchanged between the solver and its collaborators
// ABOUTME: Re-exports profile, nutrient, activity, catalog item, plan and validation types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Activity categories and weekly activity targets
pub mod activity;
/// Meals and activities offered by the catalog
pub mod catalog_item;
/// Nutrients, nutrient vectors and tolerance bands
pub mod nutrients;
/// Daily diet plans, weekly exercise plans and solve results
pub mod plan;
/// Health profile snapshot used as solver input
pub mod profile;
/// Derived nutrient and activity requirements
pub mod requirements;
/// Seasons and seasonal availability flags
pub mod season;
/// Validation outcomes and relaxation adjustments
pub mod validation;

pub use activity::{ActivityCategory, ActivityRequirements, CategoryTarget};
pub use catalog_item::{Activity, CatalogItem, ItemKind, Meal};
pub use nutrients::{MacroShares, Nutrient, NutrientVector, TargetBand, Tolerance};
pub use plan::{
    CappedAllocation, DailyDietPlan, DayPlan, ExerciseSession, MealAssignment, MealSlot,
    PlanResult, TimeOfDay, VarietyStatus, WeeklyExercisePlan,
};
pub use profile::{
    ActivityLevel, FitnessGoal, HealthCondition, HealthProfile, PreferenceWeights, Sex,
};
pub use requirements::{NutrientRequirements, Requirements};
pub use season::{Season, Seasons};
pub use validation::{Adjustment, TargetKey, ValidationResult};
