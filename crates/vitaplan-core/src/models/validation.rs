// ABOUTME: Validation outcomes for produced plans and the adjustments attached to relaxed plans
// ABOUTME: Each adjustment records target, achieved value and their exact difference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::activity::ActivityCategory;
use super::nutrients::{Nutrient, Tolerance};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the requirement an adjustment refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "key", rename_all = "snake_case")]
pub enum TargetKey {
    /// Daily nutrient total
    Nutrient(Nutrient),
    /// Weekly minutes of a category
    ActivityMinutes(ActivityCategory),
    /// Weekly session count of a category
    ActivitySessions(ActivityCategory),
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nutrient(nutrient) => write!(f, "{nutrient}"),
            Self::ActivityMinutes(category) => write!(f, "{category}_minutes"),
            Self::ActivitySessions(category) => write!(f, "{category}_sessions"),
        }
    }
}

/// Actual versus target for a requirement left outside its original band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    /// Requirement concerned
    pub key: TargetKey,
    /// Original target
    pub target: f64,
    /// Achieved value
    pub achieved: f64,
    /// `achieved - target`
    pub delta: f64,
    /// Tolerance in force after relaxation
    pub tolerance_applied: Tolerance,
}

impl Adjustment {
    /// Create an adjustment; `delta` is computed as `achieved - target`
    #[must_use]
    pub fn new(key: TargetKey, target: f64, achieved: f64, tolerance_applied: Tolerance) -> Self {
        Self {
            key,
            target,
            achieved,
            delta: achieved - target,
            tolerance_applied,
        }
    }
}

/// Outcome of validating a plan against its requirements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationResult {
    /// Every requirement inside its original band
    Ok,
    /// Returned with actual-versus-target deltas attached
    Relaxed {
        /// One entry per requirement outside its original band
        adjustments: Vec<Adjustment>,
    },
    /// A hard restriction was violated; never returned to callers of `solve`
    Infeasible {
        /// Description of the violation
        reason: String,
    },
}

impl ValidationResult {
    /// Whether the plan met every original tolerance
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Whether the plan was returned with relaxed tolerances
    #[must_use]
    pub const fn is_relaxed(&self) -> bool {
        matches!(self, Self::Relaxed { .. })
    }

    /// Adjustments carried by a relaxed result
    #[must_use]
    pub fn adjustments(&self) -> &[Adjustment] {
        match self {
            Self::Relaxed { adjustments } => adjustments,
            Self::Ok | Self::Infeasible { .. } => &[],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_adjustment_delta_is_exact_difference() {
        let adjustment = Adjustment::new(
            TargetKey::Nutrient(Nutrient::Fiber),
            35.7,
            22.3,
            Tolerance::asymmetric(0.35, 1.0),
        );
        assert_eq!(adjustment.delta, 22.3 - 35.7);
    }

    #[test]
    fn test_validation_result_serializes_with_status_tag() {
        let result = ValidationResult::Relaxed {
            adjustments: vec![Adjustment::new(
                TargetKey::ActivityMinutes(ActivityCategory::Cardio),
                150.0,
                120.0,
                Tolerance::symmetric(0.1),
            )],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "relaxed");
        assert_eq!(json["adjustments"][0]["key"]["type"], "activity_minutes");
        assert_eq!(json["adjustments"][0]["delta"], -30.0);
    }
}
