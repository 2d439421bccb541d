// ABOUTME: Configuration management module for solver policy constants
// ABOUTME: Exposes planner configuration with environment overrides and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for Vitaplan
//!
//! - **Planner**: requirement derivation, diet optimization, exercise
//!   allocation and relaxation parameters

/// Planner configuration and policy tables
pub mod planner;

pub use planner::{
    ConfigError, DietConfig, ExerciseConfig, PlannerConfig, RelaxationConfig, RequirementsConfig,
};
