// ABOUTME: Nutrient identifiers, nutrient vectors and target tolerance bands
// ABOUTME: Canonical units are kcal, grams for macros and fiber, milligrams for minerals and vitamins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Slack applied when comparing a value against a band edge
const BAND_EDGE_EPSILON: f64 = 1e-9;

/// Smallest tolerance width used when normalizing a deviation
const MIN_BAND_WIDTH: f64 = 1e-6;

/// Nutrient tracked by the solver
///
/// Declaration order is the canonical iteration order everywhere (maps are
/// `BTreeMap`s keyed on this enum), which keeps solver output deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    /// Energy (kcal)
    Calories,
    /// Protein (g)
    Protein,
    /// Total fat (g)
    Fat,
    /// Carbohydrate (g)
    Carbohydrate,
    /// Dietary fiber (g)
    Fiber,
    /// Sodium (mg)
    Sodium,
    /// Potassium (mg)
    Potassium,
    /// Calcium (mg)
    Calcium,
    /// Iron (mg)
    Iron,
    /// Vitamin C (mg)
    VitaminC,
}

impl Nutrient {
    /// Every nutrient in canonical order
    pub const ALL: [Self; 10] = [
        Self::Calories,
        Self::Protein,
        Self::Fat,
        Self::Carbohydrate,
        Self::Fiber,
        Self::Sodium,
        Self::Potassium,
        Self::Calcium,
        Self::Iron,
        Self::VitaminC,
    ];

    /// Stable snake-case identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::Fat => "fat",
            Self::Carbohydrate => "carbohydrate",
            Self::Fiber => "fiber",
            Self::Sodium => "sodium",
            Self::Potassium => "potassium",
            Self::Calcium => "calcium",
            Self::Iron => "iron",
            Self::VitaminC => "vitamin_c",
        }
    }

    /// Canonical unit abbreviation
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Calories => "kcal",
            Self::Protein | Self::Fat | Self::Carbohydrate | Self::Fiber => "g",
            Self::Sodium | Self::Potassium | Self::Calcium | Self::Iron | Self::VitaminC => "mg",
        }
    }

    /// Whether this is energy or an energy-yielding macronutrient
    #[must_use]
    pub const fn is_macro(&self) -> bool {
        matches!(
            self,
            Self::Calories | Self::Protein | Self::Fat | Self::Carbohydrate
        )
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Amounts per nutrient; absent nutrients count as zero
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutrientVector(BTreeMap<Nutrient, f64>);

impl NutrientVector {
    /// Create an empty vector
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style setter
    #[must_use]
    pub fn with(mut self, nutrient: Nutrient, amount: f64) -> Self {
        self.0.insert(nutrient, amount);
        self
    }

    /// Amount of a nutrient (zero when absent)
    #[must_use]
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.0.get(&nutrient).copied().unwrap_or(0.0)
    }

    /// Add `other` scaled by `scale` into this vector
    pub fn accumulate(&mut self, other: &Self, scale: f64) {
        for (nutrient, amount) in &other.0 {
            *self.0.entry(*nutrient).or_insert(0.0) += amount * scale;
        }
    }

    /// New vector equal to `self + other * scale`
    #[must_use]
    pub fn plus_scaled(&self, other: &Self, scale: f64) -> Self {
        let mut sum = self.clone();
        sum.accumulate(other, scale);
        sum
    }

    /// Iterate over present nutrients in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        self.0.iter().map(|(nutrient, amount)| (*nutrient, *amount))
    }

    /// Whether any amount is negative or non-finite
    #[must_use]
    pub fn has_invalid_amounts(&self) -> bool {
        self.0.values().any(|amount| !amount.is_finite() || *amount < 0.0)
    }
}

impl FromIterator<(Nutrient, f64)> for NutrientVector {
    fn from_iter<I: IntoIterator<Item = (Nutrient, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Acceptable relative deviation below and above a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Fraction of the target allowed below it
    pub below: f64,
    /// Fraction of the target allowed above it
    pub above: f64,
}

impl Tolerance {
    /// Same fraction on both sides
    #[must_use]
    pub const fn symmetric(epsilon: f64) -> Self {
        Self {
            below: epsilon,
            above: epsilon,
        }
    }

    /// Different fractions below and above
    #[must_use]
    pub const fn asymmetric(below: f64, above: f64) -> Self {
        Self { below, above }
    }

    /// Tolerance widened by the given steps on each side
    #[must_use]
    pub fn widened(self, below_step: f64, above_step: f64) -> Self {
        Self {
            below: self.below + below_step,
            above: self.above + above_step,
        }
    }
}

/// A target value and its acceptable band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetBand {
    /// Desired value
    pub target: f64,
    /// Band around the target considered acceptable
    pub tolerance: Tolerance,
}

impl TargetBand {
    /// Create a band
    #[must_use]
    pub const fn new(target: f64, tolerance: Tolerance) -> Self {
        Self { target, tolerance }
    }

    /// Lower band edge
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.target * (1.0 - self.tolerance.below)
    }

    /// Upper band edge
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.target * (1.0 + self.tolerance.above)
    }

    /// Whether `value` lies inside the band
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower() - BAND_EDGE_EPSILON && value <= self.upper() + BAND_EDGE_EPSILON
    }

    /// Signed deviation from the target divided by the tolerance width on that side
    ///
    /// A value of `±1.0` sits exactly on a band edge.
    #[must_use]
    pub fn normalized_deviation(&self, value: f64) -> f64 {
        let deviation = value - self.target;
        if deviation == 0.0 {
            return 0.0;
        }
        let fraction = if deviation < 0.0 {
            self.tolerance.below
        } else {
            self.tolerance.above
        };
        deviation / (self.target.abs() * fraction).max(MIN_BAND_WIDTH)
    }

    /// Same tolerance around a proportionally scaled target
    #[must_use]
    pub fn scaled(&self, share: f64) -> Self {
        Self {
            target: self.target * share,
            tolerance: self.tolerance,
        }
    }
}

/// Share of daily energy carried by each macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroShares {
    /// Protein share (0.0-1.0)
    pub protein: f64,
    /// Fat share (0.0-1.0)
    pub fat: f64,
    /// Carbohydrate share (0.0-1.0)
    pub carbohydrate: f64,
}

impl MacroShares {
    /// Clamp each share to `min_share` and rescale so the shares sum to 1.0
    #[must_use]
    pub fn normalized(self, min_share: f64) -> Self {
        let protein = self.protein.max(min_share);
        let fat = self.fat.max(min_share);
        let carbohydrate = self.carbohydrate.max(min_share);
        let total = protein + fat + carbohydrate;
        Self {
            protein: protein / total,
            fat: fat / total,
            carbohydrate: carbohydrate / total,
        }
    }
}
