// ABOUTME: Catalog item models: meals with nutrient vectors and activities with MET values
// ABOUTME: Both variants carry restriction tags and seasonal availability for filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::activity::ActivityCategory;
use super::nutrients::NutrientVector;
use super::plan::MealSlot;
use super::season::{Season, Seasons};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Oxygen cost of one MET (ml O2 per kg per minute)
const ML_O2_PER_KG_MIN_PER_MET: f64 = 3.5;

/// Divisor converting `MET x ml O2/kg/min x kg` to kcal/min
const KCAL_PER_MIN_DIVISOR: f64 = 200.0;

/// Kind of catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A meal
    Meal,
    /// A physical activity
    Activity,
}

/// A meal that can fill a diet slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Cuisine (matched against cuisine preferences)
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Descriptive tags (matched against taste preferences)
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Slots this meal may fill; empty means any slot
    #[serde(default)]
    pub slots: BTreeSet<MealSlot>,
    /// Nutrient content of one portion
    pub nutrients: NutrientVector,
    /// Restriction tags this meal violates (e.g. "gluten", "peanut")
    #[serde(default)]
    pub restriction_tags: BTreeSet<String>,
    /// Seasons in which the meal is available
    #[serde(default)]
    pub availability: Seasons,
}

impl Meal {
    /// Whether the meal may fill `slot`
    #[must_use]
    pub fn fits_slot(&self, slot: MealSlot) -> bool {
        self.slots.is_empty() || self.slots.contains(&slot)
    }
}

/// A physical activity that can fill exercise sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Activity category
    pub category: ActivityCategory,
    /// Metabolic equivalent of task
    pub met: f64,
    /// Focus tags (e.g. "core", "balance", "lower_body")
    #[serde(default)]
    pub focus_tags: BTreeSet<String>,
    /// Restriction tags this activity violates (e.g. "high_impact")
    #[serde(default)]
    pub restriction_tags: BTreeSet<String>,
    /// Seasons in which the activity is available
    #[serde(default)]
    pub availability: Seasons,
}

impl Activity {
    /// Energy expenditure per minute for a body weight
    ///
    /// Formula: kcal/min = MET x 3.5 x `weight_kg` / 200
    #[must_use]
    pub fn kcal_per_minute(&self, weight_kg: f64) -> f64 {
        self.met * ML_O2_PER_KG_MIN_PER_MET * weight_kg / KCAL_PER_MIN_DIVISOR
    }

    /// Whether any focus tag is in `focus_areas`
    #[must_use]
    pub fn matches_focus(&self, focus_areas: &BTreeSet<String>) -> bool {
        !self.focus_tags.is_disjoint(focus_areas)
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogItem {
    /// A meal
    Meal(Meal),
    /// An activity
    Activity(Activity),
}

impl CatalogItem {
    /// Item identifier
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Meal(meal) => &meal.id,
            Self::Activity(activity) => &activity.id,
        }
    }

    /// Item kind
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Meal(_) => ItemKind::Meal,
            Self::Activity(_) => ItemKind::Activity,
        }
    }

    /// Restriction tags the item violates
    #[must_use]
    pub const fn restriction_tags(&self) -> &BTreeSet<String> {
        match self {
            Self::Meal(meal) => &meal.restriction_tags,
            Self::Activity(activity) => &activity.restriction_tags,
        }
    }

    /// Seasonal availability
    #[must_use]
    pub const fn availability(&self) -> Seasons {
        match self {
            Self::Meal(meal) => meal.availability,
            Self::Activity(activity) => activity.availability,
        }
    }

    /// Restriction tags shared with `restrictions`, sorted
    #[must_use]
    pub fn violated(&self, restrictions: &BTreeSet<String>) -> Vec<String> {
        self.restriction_tags()
            .intersection(restrictions)
            .cloned()
            .collect()
    }

    /// Whether the item passes restriction and season filters
    #[must_use]
    pub fn is_eligible(&self, restrictions: &BTreeSet<String>, season: Option<Season>) -> bool {
        self.restriction_tags().is_disjoint(restrictions) && self.availability().available_in(season)
    }
}
