// ABOUTME: Health profile snapshot handed to the solver by collaborators
// ABOUTME: Biometrics, medical conditions, fitness goals, restrictions and preference weights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::season::Season;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Biological sex for metabolic equations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male (higher BMR constant)
    Male,
    /// Female (lower BMR constant)
    Female,
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Sedentary (little/no exercise)
    Sedentary,
    /// Lightly active (1-3 days/week)
    LightlyActive,
    /// Moderately active (3-5 days/week)
    ModeratelyActive,
    /// Very active (6-7 days/week)
    VeryActive,
    /// Extra active (hard training 2x/day)
    ExtraActive,
}

/// Medical condition flags that adjust targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HealthCondition {
    /// Insulin resistance, prediabetes or diabetes
    MetabolicCondition,
    /// Elevated blood pressure
    Hypertension,
    /// Reduced mobility or joint limitations
    MobilityConstraint,
    /// Elevated cardiovascular risk
    CardiacRisk,
}

/// Fitness goal flags that adjust targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    /// Caloric deficit, more cardio
    WeightLoss,
    /// Caloric surplus, more protein and strength work
    MuscleBuilding,
    /// More carbohydrate and cardio volume
    EnduranceTraining,
    /// Broad functional fitness
    GeneralFitness,
}

/// Preference weights in `[-1.0, 1.0]`; positive values are liked
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceWeights {
    /// Weight per cuisine name
    #[serde(default)]
    pub cuisines: BTreeMap<String, f64>,
    /// Weight per taste tag (e.g. "spicy", "sweet")
    #[serde(default)]
    pub tastes: BTreeMap<String, f64>,
    /// Current season; `Some` enables seasonal availability filtering
    #[serde(default)]
    pub season: Option<Season>,
}

/// Immutable-per-solve snapshot of the user's health data
///
/// Biometric fields are optional at the type level so that a profile coming
/// from a partially filled form can be represented; the requirements engine
/// rejects missing values instead of defaulting them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    /// Body weight (kg)
    pub weight_kg: Option<f64>,
    /// Height (cm)
    pub height_cm: Option<f64>,
    /// Age (years)
    pub age_years: Option<u32>,
    /// Biological sex
    pub sex: Option<Sex>,
    /// Habitual activity level
    pub activity_level: Option<ActivityLevel>,
    /// Medical condition flags
    #[serde(default)]
    pub conditions: BTreeSet<HealthCondition>,
    /// Fitness goal flags
    #[serde(default)]
    pub goals: BTreeSet<FitnessGoal>,
    /// Hard restriction tags (allergens, intolerances, contraindications)
    #[serde(default)]
    pub restrictions: BTreeSet<String>,
    /// Activity focus tags (e.g. "core", "balance")
    #[serde(default)]
    pub focus_areas: BTreeSet<String>,
    /// Soft preferences
    #[serde(default)]
    pub preferences: PreferenceWeights,
}

impl HealthProfile {
    /// Profile with all biometric fields set and no flags
    #[must_use]
    pub fn new(
        weight_kg: f64,
        height_cm: f64,
        age_years: u32,
        sex: Sex,
        activity_level: ActivityLevel,
    ) -> Self {
        Self {
            weight_kg: Some(weight_kg),
            height_cm: Some(height_cm),
            age_years: Some(age_years),
            sex: Some(sex),
            activity_level: Some(activity_level),
            ..Self::default()
        }
    }

    /// Add a medical condition flag
    #[must_use]
    pub fn with_condition(mut self, condition: HealthCondition) -> Self {
        self.conditions.insert(condition);
        self
    }

    /// Add a fitness goal flag
    #[must_use]
    pub fn with_goal(mut self, goal: FitnessGoal) -> Self {
        self.goals.insert(goal);
        self
    }

    /// Add a hard restriction tag
    #[must_use]
    pub fn with_restriction(mut self, tag: impl Into<String>) -> Self {
        self.restrictions.insert(tag.into());
        self
    }

    /// Add an activity focus tag
    #[must_use]
    pub fn with_focus_area(mut self, tag: impl Into<String>) -> Self {
        self.focus_areas.insert(tag.into());
        self
    }

    /// Enable seasonal filtering for `season`
    #[must_use]
    pub fn in_season(mut self, season: Season) -> Self {
        self.preferences.season = Some(season);
        self
    }

    /// Whether a medical condition is flagged
    #[must_use]
    pub fn has_condition(&self, condition: HealthCondition) -> bool {
        self.conditions.contains(&condition)
    }

    /// Whether a fitness goal is flagged
    #[must_use]
    pub fn has_goal(&self, goal: FitnessGoal) -> bool {
        self.goals.contains(&goal)
    }
}
