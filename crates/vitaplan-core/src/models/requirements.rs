// ABOUTME: Derived nutrient requirements and the combined requirement pair
// ABOUTME: Holds BMR/TDEE, macro shares, per-nutrient target bands and applied adjustment rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::activity::ActivityRequirements;
use super::nutrients::{MacroShares, Nutrient, TargetBand};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Daily nutrient targets derived from a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientRequirements {
    /// Basal Metabolic Rate (kcal/day)
    pub bmr_kcal: f64,
    /// Total Daily Energy Expenditure (kcal/day)
    pub tdee_kcal: f64,
    /// Energy share of each macronutrient after adjustments
    pub macro_shares: MacroShares,
    /// Target band per nutrient
    pub targets: BTreeMap<Nutrient, TargetBand>,
    /// Names of the adjustment rules applied, in order
    pub applied_rules: Vec<String>,
}

impl NutrientRequirements {
    /// Target band for a nutrient
    #[must_use]
    pub fn target(&self, nutrient: Nutrient) -> Option<&TargetBand> {
        self.targets.get(&nutrient)
    }

    /// Daily energy target (kcal)
    #[must_use]
    pub fn energy_kcal(&self) -> f64 {
        self.target(Nutrient::Calories).map_or(0.0, |band| band.target)
    }
}

/// Nutrient and activity requirements derived together from one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    /// Daily nutrient targets
    pub nutrients: NutrientRequirements,
    /// Weekly activity targets
    pub activity: ActivityRequirements,
}
