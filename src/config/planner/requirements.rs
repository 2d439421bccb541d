// ABOUTME: Requirements engine configuration: BMR coefficients, activity factors, macro shares
// ABOUTME: Micronutrient baselines, activity baselines, adjustment-rule deltas and tolerance bands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Requirements Engine Configuration
//!
//! Product-policy constants used to derive targets from a health profile. All
//! values are defaults that deployments may override; none are medical advice.
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, Katch & Katch (2010) Exercise Physiology
//! - Micronutrients: Institute of Medicine Dietary Reference Intakes
//! - Activity minutes: WHO Guidelines on Physical Activity (2020)

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use vitaplan_core::models::{ActivityCategory, Tolerance};

/// Requirements Engine Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementsConfig {
    /// Basal Metabolic Rate (BMR) calculation settings
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE calculation
    pub activity_factors: ActivityFactorsConfig,
    /// Baseline energy share per macronutrient
    pub macro_shares: MacroShareConfig,
    /// Baseline micronutrient targets
    pub micronutrients: MicronutrientConfig,
    /// Baseline weekly activity minutes
    pub activity_baseline: ActivityBaselineConfig,
    /// Deltas applied by the adjustment rules
    pub adjustments: AdjustmentDeltas,
    /// Tolerance bands around each target
    pub tolerances: ToleranceConfig,
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
    /// Lower bound applied to the computed BMR (kcal/day)
    pub min_bmr_kcal: f64,
}

/// Activity factor multipliers for TDEE calculation
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-3 days/week): 1.375
    pub lightly_active: f64,
    /// Moderately active (3-5 days/week): 1.55
    pub moderately_active: f64,
    /// Very active (6-7 days/week): 1.725
    pub very_active: f64,
    /// Extra active (hard training 2x/day): 1.9
    pub extra_active: f64,
}

/// Baseline macronutrient energy shares
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroShareConfig {
    /// Protein share of energy: 0.24
    pub protein: f64,
    /// Fat share of energy: 0.28
    pub fat: f64,
    /// Carbohydrate share of energy: 0.48
    pub carbohydrate: f64,
    /// No macronutrient share may drop below this after adjustments: 0.10
    pub min_share: f64,
}

/// Baseline micronutrient targets (DRI)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicronutrientConfig {
    /// Fiber per 1000 kcal of energy target (g): 14
    pub fiber_g_per_1000_kcal: f64,
    /// Sodium upper limit (mg): 2300
    pub sodium_limit_mg: f64,
    /// Potassium adequate intake, male (mg): 3400
    pub potassium_male_mg: f64,
    /// Potassium adequate intake, female (mg): 2600
    pub potassium_female_mg: f64,
    /// Calcium RDA (mg): 1000
    pub calcium_mg: f64,
    /// Calcium RDA above the older-age threshold (mg): 1200
    pub calcium_older_mg: f64,
    /// Age above which the older calcium target applies: 50
    pub calcium_older_age: u32,
    /// Iron RDA, male and post-menopausal female (mg): 8
    pub iron_mg: f64,
    /// Iron RDA, female at or below the older-age threshold (mg): 18
    pub iron_female_mg: f64,
    /// Vitamin C RDA, male (mg): 90
    pub vitamin_c_male_mg: f64,
    /// Vitamin C RDA, female (mg): 75
    pub vitamin_c_female_mg: f64,
}

/// Baseline weekly activity minutes per category
///
/// Reference: WHO Guidelines on Physical Activity and Sedentary Behaviour (2020)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityBaselineConfig {
    /// Moderate-intensity aerobic minutes: 150
    pub cardio_minutes: f64,
    /// Muscle-strengthening minutes: 60
    pub strength_minutes: f64,
    /// Muscle-strengthening sessions: 2
    pub strength_sessions: u32,
    /// Stretching minutes: 40
    pub flexibility_minutes: f64,
    /// Yoga / tai chi minutes: 30
    pub mind_body_minutes: f64,
    /// Breathing exercise minutes: 20
    pub breathing_minutes: f64,
    /// Functional training minutes: 0
    pub functional_minutes: f64,
    /// Dance minutes: 0
    pub dance_minutes: f64,
    /// Martial arts minutes: 0
    pub martial_arts_minutes: f64,
}

impl ActivityBaselineConfig {
    /// Baseline minutes for a category
    #[must_use]
    pub const fn minutes(&self, category: ActivityCategory) -> f64 {
        match category {
            ActivityCategory::Cardio => self.cardio_minutes,
            ActivityCategory::Strength => self.strength_minutes,
            ActivityCategory::Flexibility => self.flexibility_minutes,
            ActivityCategory::MindBody => self.mind_body_minutes,
            ActivityCategory::Breathing => self.breathing_minutes,
            ActivityCategory::Functional => self.functional_minutes,
            ActivityCategory::Dance => self.dance_minutes,
            ActivityCategory::MartialArts => self.martial_arts_minutes,
        }
    }
}

/// Deltas used by the named adjustment rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentDeltas {
    /// Energy multiplier for weight loss: 0.85
    pub weight_loss_energy_factor: f64,
    /// Energy multiplier for muscle building: 1.10
    pub muscle_gain_energy_factor: f64,
    /// Carbohydrate share moved to protein and fat for metabolic conditions: 0.10
    pub metabolic_carb_shift: f64,
    /// Protein share taken from carbohydrate for muscle building: 0.06
    pub muscle_protein_shift: f64,
    /// Carbohydrate share taken from fat for endurance training: 0.05
    pub endurance_carb_shift: f64,
    /// Sodium limit with hypertension (mg): 1500
    pub hypertension_sodium_limit_mg: f64,
    /// Activity-minute multiplier with mobility constraints: 0.6
    pub mobility_minutes_factor: f64,
    /// Cardio multiplier with cardiac risk: 0.8
    pub cardiac_cardio_factor: f64,
    /// Strength multiplier for muscle building: 1.5
    pub muscle_strength_factor: f64,
    /// Extra strength sessions for muscle building: 1
    pub muscle_extra_sessions: u32,
    /// Cardio multiplier for endurance training: 1.5
    pub endurance_cardio_factor: f64,
    /// Cardio multiplier for weight loss: 1.3
    pub weight_loss_cardio_factor: f64,
    /// Functional minutes added for general fitness: 30
    pub general_fitness_functional_minutes: f64,
}

/// Tolerance band per target family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToleranceConfig {
    /// Calories (ε): 0.05
    pub calories: f64,
    /// Protein: 0.10
    pub protein: f64,
    /// Fat and carbohydrate: 0.15
    pub fat_carbohydrate: f64,
    /// Fiber: -30% / +100%
    pub fiber: Tolerance,
    /// Sodium is an upper limit: -100% / +10%
    pub sodium: Tolerance,
    /// Potassium, calcium, iron, vitamin C: -50% / +200%
    pub micronutrient: Tolerance,
    /// Weekly activity minutes: 0.10
    pub activity_minutes: f64,
}

impl RequirementsConfig {
    /// Validate requirements configuration
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if coefficients, shares or tolerances are out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bmr.msj_weight_coef <= 0.0 || self.bmr.msj_height_coef <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "BMR weight and height coefficients must be positive",
            ));
        }

        let factors = &self.activity_factors;
        if factors.sedentary < 1.0 || factors.extra_active > 2.5 {
            return Err(ConfigError::ValueOutOfRange(
                "Activity factors must be between 1.0 and 2.5",
            ));
        }
        if factors.sedentary >= factors.lightly_active
            || factors.lightly_active >= factors.moderately_active
            || factors.moderately_active >= factors.very_active
            || factors.very_active >= factors.extra_active
        {
            return Err(ConfigError::InvalidRange(
                "Activity factors must be in ascending order",
            ));
        }

        let shares = &self.macro_shares;
        if (shares.protein + shares.fat + shares.carbohydrate - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidWeights(
                "Macro shares must sum to 1.0",
            ));
        }
        if !(0.0..0.33).contains(&shares.min_share) {
            return Err(ConfigError::ValueOutOfRange(
                "Minimum macro share must be between 0.0 and 0.33",
            ));
        }

        let tol = &self.tolerances;
        let symmetric = [
            tol.calories,
            tol.protein,
            tol.fat_carbohydrate,
            tol.activity_minutes,
        ];
        if symmetric.iter().any(|eps| !(0.0..1.0).contains(eps)) {
            return Err(ConfigError::ValueOutOfRange(
                "Symmetric tolerances must be between 0.0 and 1.0",
            ));
        }
        let sided = [tol.fiber, tol.sodium, tol.micronutrient];
        if sided.iter().any(|t| t.below < 0.0 || t.above < 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "Tolerances must not be negative",
            ));
        }

        let deltas = &self.adjustments;
        if deltas.weight_loss_energy_factor <= 0.0 || deltas.weight_loss_energy_factor > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Weight loss energy factor must be in (0.0, 1.0]",
            ));
        }
        if deltas.muscle_gain_energy_factor < 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Muscle gain energy factor must be at least 1.0",
            ));
        }
        if deltas.mobility_minutes_factor <= 0.0 || deltas.mobility_minutes_factor > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Mobility minutes factor must be in (0.0, 1.0]",
            ));
        }

        Ok(())
    }
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
            min_bmr_kcal: 1000.0,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            very_active: 1.725,
            extra_active: 1.9,
        }
    }
}

impl Default for MacroShareConfig {
    fn default() -> Self {
        Self {
            protein: 0.24,
            fat: 0.28,
            carbohydrate: 0.48,
            min_share: 0.10,
        }
    }
}

impl Default for MicronutrientConfig {
    fn default() -> Self {
        Self {
            fiber_g_per_1000_kcal: 14.0,
            sodium_limit_mg: 2300.0,
            potassium_male_mg: 3400.0,
            potassium_female_mg: 2600.0,
            calcium_mg: 1000.0,
            calcium_older_mg: 1200.0,
            calcium_older_age: 50,
            iron_mg: 8.0,
            iron_female_mg: 18.0,
            vitamin_c_male_mg: 90.0,
            vitamin_c_female_mg: 75.0,
        }
    }
}

impl Default for ActivityBaselineConfig {
    fn default() -> Self {
        Self {
            cardio_minutes: 150.0,
            strength_minutes: 60.0,
            strength_sessions: 2,
            flexibility_minutes: 40.0,
            mind_body_minutes: 30.0,
            breathing_minutes: 20.0,
            functional_minutes: 0.0,
            dance_minutes: 0.0,
            martial_arts_minutes: 0.0,
        }
    }
}

impl Default for AdjustmentDeltas {
    fn default() -> Self {
        Self {
            weight_loss_energy_factor: 0.85,
            muscle_gain_energy_factor: 1.10,
            metabolic_carb_shift: 0.10,
            muscle_protein_shift: 0.06,
            endurance_carb_shift: 0.05,
            hypertension_sodium_limit_mg: 1500.0,
            mobility_minutes_factor: 0.6,
            cardiac_cardio_factor: 0.8,
            muscle_strength_factor: 1.5,
            muscle_extra_sessions: 1,
            endurance_cardio_factor: 1.5,
            weight_loss_cardio_factor: 1.3,
            general_fitness_functional_minutes: 30.0,
        }
    }
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            calories: 0.05,
            protein: 0.10,
            fat_carbohydrate: 0.15,
            fiber: Tolerance::asymmetric(0.30, 1.0),
            sodium: Tolerance::asymmetric(1.0, 0.10),
            micronutrient: Tolerance::asymmetric(0.50, 2.0),
            activity_minutes: 0.10,
        }
    }
}
