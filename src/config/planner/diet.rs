// ABOUTME: Diet optimization configuration: slot energy shares, portion steps and scoring weights
// ABOUTME: Also holds the variety window, backtracking breadth and preference influence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use vitaplan_core::models::{MealSlot, Nutrient};

/// Diet Optimization Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietConfig {
    /// Share of daily energy per slot
    pub slot_shares: SlotSharesConfig,
    /// Days within which a meal may not repeat
    pub variety_window_days: u32,
    /// Portion multipliers tried for every meal
    pub portion_steps: Vec<f64>,
    /// Scoring weight per nutrient
    pub nutrient_weights: NutrientWeightsConfig,
    /// Options explored per slot during backtracking
    pub backtrack_breadth: usize,
    /// How strongly preferences scale a score (0.0 disables them)
    pub preference_influence: f64,
}

/// Daily energy distribution across meal slots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotSharesConfig {
    /// Breakfast share: 0.25
    pub breakfast: f64,
    /// Lunch share: 0.30
    pub lunch: f64,
    /// Dinner share: 0.30
    pub dinner: f64,
    /// Snack share: 0.15
    pub snack: f64,
}

impl SlotSharesConfig {
    /// Energy share of a slot
    #[must_use]
    pub const fn share(&self, slot: MealSlot) -> f64 {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
            MealSlot::Snack => self.snack,
        }
    }

    /// Sum of the shares of `slot` and every slot filled before it
    #[must_use]
    pub fn cumulative_share(&self, slot: MealSlot) -> f64 {
        MealSlot::ALL
            .iter()
            .take_while(|s| **s <= slot)
            .map(|s| self.share(*s))
            .sum()
    }
}

/// Weight of each nutrient's squared deviation in the slot score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientWeightsConfig {
    /// Energy: 4.0
    pub calories: f64,
    /// Protein: 3.0
    pub protein: f64,
    /// Fat: 1.5
    pub fat: f64,
    /// Carbohydrate: 1.5
    pub carbohydrate: f64,
    /// Fiber: 0.5
    pub fiber: f64,
    /// Sodium: 0.5
    pub sodium: f64,
    /// Potassium, calcium, iron, vitamin C: 0.25
    pub other: f64,
}

impl NutrientWeightsConfig {
    /// Scoring weight for a nutrient
    #[must_use]
    pub const fn weight(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Carbohydrate => self.carbohydrate,
            Nutrient::Fiber => self.fiber,
            Nutrient::Sodium => self.sodium,
            Nutrient::Potassium | Nutrient::Calcium | Nutrient::Iron | Nutrient::VitaminC => {
                self.other
            }
        }
    }
}

impl DietConfig {
    /// Validate diet configuration
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if slot shares, portions or weights are invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        let shares = &self.slot_shares;
        let total = shares.breakfast + shares.lunch + shares.dinner + shares.snack;
        if (total - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidWeights("Slot shares must sum to 1.0"));
        }
        if MealSlot::ALL.iter().any(|slot| shares.share(*slot) <= 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "Every slot share must be positive",
            ));
        }

        if self.portion_steps.is_empty() {
            return Err(ConfigError::InvalidRange(
                "At least one portion step is required",
            ));
        }
        if self
            .portion_steps
            .iter()
            .any(|step| !step.is_finite() || *step <= 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "Portion steps must be positive",
            ));
        }

        if self.backtrack_breadth == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "Backtrack breadth must be at least 1",
            ));
        }

        if Nutrient::ALL
            .iter()
            .any(|n| self.nutrient_weights.weight(*n) < 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "Nutrient weights must not be negative",
            ));
        }

        if !(0.0..1.0).contains(&self.preference_influence) {
            return Err(ConfigError::ValueOutOfRange(
                "Preference influence must be between 0.0 and 1.0",
            ));
        }

        Ok(())
    }
}

impl Default for DietConfig {
    fn default() -> Self {
        Self {
            slot_shares: SlotSharesConfig::default(),
            variety_window_days: 2,
            portion_steps: vec![0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0],
            nutrient_weights: NutrientWeightsConfig::default(),
            backtrack_breadth: 3,
            preference_influence: 0.25,
        }
    }
}

impl Default for SlotSharesConfig {
    fn default() -> Self {
        Self {
            breakfast: 0.25,
            lunch: 0.30,
            dinner: 0.30,
            snack: 0.15,
        }
    }
}

impl Default for NutrientWeightsConfig {
    fn default() -> Self {
        Self {
            calories: 4.0,
            protein: 3.0,
            fat: 1.5,
            carbohydrate: 1.5,
            fiber: 0.5,
            sodium: 0.5,
            other: 0.25,
        }
    }
}
