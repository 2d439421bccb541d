// ABOUTME: Planner configuration for requirements derivation, diet optimization and exercise allocation
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Planner Configuration Module
//!
//! Every numeric constant the solver uses lives here so deployments can tune
//! policy without touching algorithm code.
//!
//! # Module Structure
//!
//! - `requirements` - BMR, activity factors, baselines, adjustment deltas, tolerances
//! - `diet` - Slot shares, portion steps, scoring weights, variety window
//! - `exercise` - Per-day cap, focus boost, session lengths
//! - `relaxation` - Tolerance widening step and retry bound

pub mod diet;
pub mod error;
pub mod exercise;
pub mod relaxation;
pub mod requirements;

pub use diet::{DietConfig, NutrientWeightsConfig, SlotSharesConfig};
pub use error::ConfigError;
pub use exercise::{ExerciseConfig, SessionLengthConfig};
pub use relaxation::RelaxationConfig;
pub use requirements::{
    ActivityBaselineConfig, ActivityFactorsConfig, AdjustmentDeltas, BmrConfig, MacroShareConfig,
    MicronutrientConfig, RequirementsConfig, ToleranceConfig,
};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static PLANNER_CONFIG: OnceLock<PlannerConfig> = OnceLock::new();

/// Main planner configuration container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Configuration for requirement derivation
    pub requirements: RequirementsConfig,
    /// Configuration for daily meal selection
    pub diet: DietConfig,
    /// Configuration for weekly activity allocation
    pub exercise: ExerciseConfig,
    /// Configuration for tolerance relaxation
    pub relaxation: RelaxationConfig,
    /// Run the diet and exercise cores on the rayon pool
    pub parallel_cores: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            requirements: RequirementsConfig::default(),
            diet: DietConfig::default(),
            exercise: ExerciseConfig::default(),
            relaxation: RelaxationConfig::default(),
            parallel_cores: true,
        }
    }
}

impl PlannerConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        PLANNER_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load planner config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found in any subsystem
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.requirements.validate()?;
        self.diet.validate()?;
        self.exercise.validate()?;
        self.relaxation.validate()?;
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Requirements overrides
        Self::apply_env_var(
            "VITAPLAN_MIN_BMR_KCAL",
            &mut self.requirements.bmr.min_bmr_kcal,
        )?;
        Self::apply_env_var(
            "VITAPLAN_CALORIE_TOLERANCE",
            &mut self.requirements.tolerances.calories,
        )?;
        Self::apply_env_var(
            "VITAPLAN_PROTEIN_TOLERANCE",
            &mut self.requirements.tolerances.protein,
        )?;
        Self::apply_env_var(
            "VITAPLAN_ACTIVITY_TOLERANCE",
            &mut self.requirements.tolerances.activity_minutes,
        )?;
        Self::apply_env_var(
            "VITAPLAN_SODIUM_LIMIT_MG",
            &mut self.requirements.micronutrients.sodium_limit_mg,
        )?;
        Self::apply_env_var(
            "VITAPLAN_WEIGHT_LOSS_ENERGY_FACTOR",
            &mut self.requirements.adjustments.weight_loss_energy_factor,
        )?;

        // Diet overrides
        Self::apply_env_var(
            "VITAPLAN_VARIETY_WINDOW_DAYS",
            &mut self.diet.variety_window_days,
        )?;
        Self::apply_env_var(
            "VITAPLAN_BACKTRACK_BREADTH",
            &mut self.diet.backtrack_breadth,
        )?;
        Self::apply_env_var(
            "VITAPLAN_PREFERENCE_INFLUENCE",
            &mut self.diet.preference_influence,
        )?;

        // Exercise overrides
        Self::apply_env_var(
            "VITAPLAN_PER_DAY_CAP_MINUTES",
            &mut self.exercise.per_day_cap_minutes,
        )?;
        Self::apply_env_var("VITAPLAN_FOCUS_BOOST", &mut self.exercise.focus_boost)?;

        // Relaxation overrides
        Self::apply_env_var(
            "VITAPLAN_TOLERANCE_STEP",
            &mut self.relaxation.tolerance_step,
        )?;
        Self::apply_env_var("VITAPLAN_MAX_RETRIES", &mut self.relaxation.max_retries)?;

        Self::apply_env_var("VITAPLAN_PARALLEL_CORES", &mut self.parallel_cores)?;

        Ok(self)
    }
}
