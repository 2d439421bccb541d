// ABOUTME: Solver components turning health profiles into diet and exercise plans
// ABOUTME: Requirements engine, adjustment rules, diet optimizer, exercise allocator and validator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! The solver pipeline, leaves first:
//!
//! - `nutrition_calculator` - BMR, TDEE and nutrient baselines
//! - `adjustment_rules` - Ordered condition and goal adjustments
//! - `requirements_engine` - Profile to nutrient and activity requirements
//! - `diet_optimizer` - Daily meal selection
//! - `exercise_allocator` - Weekly activity distribution
//! - `plan_validator` - Restriction safety, tolerance checks and band widening

/// Ordered table of requirement adjustment rules
pub mod adjustment_rules;
/// Daily meal selection with bounded backtracking
pub mod diet_optimizer;
/// Weekly activity allocation over day bins
pub mod exercise_allocator;
/// Evidence-based energy and nutrient baselines
pub mod nutrition_calculator;
/// Restriction and tolerance validation with band widening
pub mod plan_validator;
/// Profile to requirements derivation
pub mod requirements_engine;

pub use adjustment_rules::{apply_rules, AdjustmentRule, RequirementDraft, ADJUSTMENT_RULES};
pub use diet_optimizer::DietOptimizer;
pub use exercise_allocator::{preferred_time_of_day, split_evenly, ExerciseAllocator, WEEK};
pub use nutrition_calculator::{
    activity_factor, calculate_mifflin_st_jeor, calculate_tdee, macro_grams,
    micronutrient_baselines,
};
pub use plan_validator::{find_misses, widen_requirements, Miss, PlanValidator, RestrictionLeak};
pub use requirements_engine::{compute_requirements, nutrient_tolerance};
