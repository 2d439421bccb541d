// ABOUTME: Main library entry point for the Vitaplan personalized plan solver
// ABOUTME: Converts health profiles into daily diet plans and weekly exercise allocations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Vitaplan
//!
//! Personalized plan solver: a health profile goes in, a daily diet plan and
//! a weekly exercise allocation come out, each checked against tolerance
//! bands derived from the profile.
//!
//! ## Architecture
//!
//! - **Requirements Engine**: profile to nutrient and activity targets
//! - **Catalog**: meals and activities filtered by restriction and season
//! - **Diet Core**: per-day meal selection with bounded backtracking
//! - **Exercise Core**: weekly distribution over seven day bins
//! - **Validator & Relaxer**: restriction safety and bounded tolerance relaxation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use vitaplan::catalog::Catalog;
//! use vitaplan::models::{ActivityLevel, HealthProfile, Sex};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::from_json_str(&std::fs::read_to_string("data/catalog.json")?)?;
//! let profile = HealthProfile::new(70.0, 175.0, 30, Sex::Male, ActivityLevel::ModeratelyActive)
//!     .with_restriction("gluten");
//!
//! let plan = vitaplan::planner::solve(&profile, &catalog)?;
//! println!("{} kcal", plan.diet_plan.totals.get(vitaplan::models::Nutrient::Calories));
//! # Ok(())
//! # }
//! ```

/// Meal and activity catalog with candidate filtering
pub mod catalog;

/// Planner configuration with environment overrides
pub mod config;

/// Solver error types and codes
pub mod errors;

/// Solver components: requirements, diet, exercise and validation
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Domain models shared with collaborators
pub mod models;

/// Solve entry points
pub mod planner;

pub use catalog::{Catalog, CatalogFilter};
pub use config::PlannerConfig;
pub use errors::{SolveError, SolveResult};
pub use planner::{recompute_requirements, solve, Planner};
