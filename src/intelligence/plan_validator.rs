// ABOUTME: Plan validator checking restriction safety and tolerance bands of produced plans
// ABOUTME: Reports misses against target bands and widens bands for bounded relaxation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan Validator & Relaxer
//!
//! Restriction checks run against the catalog, not against the plan's own
//! copy of item data, so an unknown id is treated as a violation.

use crate::catalog::Catalog;
use std::collections::BTreeSet;
use tracing::debug;
use vitaplan_core::errors::SolveError;
use vitaplan_core::models::{
    ActivityCategory, Adjustment, DailyDietPlan, Nutrient, Requirements, TargetBand, TargetKey,
    Tolerance, ValidationResult, WeeklyExercisePlan,
};

/// A requirement whose achieved value lies outside its band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Miss {
    /// Requirement concerned
    pub key: TargetKey,
    /// Band the value was checked against
    pub band: TargetBand,
    /// Achieved value
    pub achieved: f64,
}

impl Miss {
    /// Whether the value fell short of the band
    #[must_use]
    pub fn is_below(&self) -> bool {
        self.achieved < self.band.target
    }

    /// Whether the miss concerns the diet plan
    #[must_use]
    pub const fn is_nutrient(&self) -> bool {
        matches!(self.key, TargetKey::Nutrient(_))
    }
}

/// A chosen item that violates a hard restriction or is unknown to the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictionLeak {
    /// Offending item id
    pub item_id: String,
    /// Restriction tags hit; empty for an unknown id
    pub tags: Vec<String>,
}

impl From<RestrictionLeak> for SolveError {
    fn from(leak: RestrictionLeak) -> Self {
        Self::RestrictionViolation {
            item_id: leak.item_id,
            tags: leak.tags,
        }
    }
}

/// Validator bound to a catalog and the user's hard restrictions
#[derive(Debug, Clone, Copy)]
pub struct PlanValidator<'a> {
    catalog: &'a Catalog,
    restrictions: &'a BTreeSet<String>,
}

impl<'a> PlanValidator<'a> {
    /// Create a validator
    #[must_use]
    pub const fn new(catalog: &'a Catalog, restrictions: &'a BTreeSet<String>) -> Self {
        Self {
            catalog,
            restrictions,
        }
    }

    /// First chosen item that leaks a restriction, in plan order
    #[must_use]
    pub fn restriction_leak(
        &self,
        diet: &DailyDietPlan,
        exercise: &WeeklyExercisePlan,
    ) -> Option<RestrictionLeak> {
        let activity_ids = exercise
            .days
            .iter()
            .flat_map(|d| &d.sessions)
            .map(|s| s.activity_id.as_str());
        self.first_leak(diet.item_ids().chain(activity_ids))
    }

    /// First meal of a diet plan that leaks a restriction
    #[must_use]
    pub fn diet_leak(&self, diet: &DailyDietPlan) -> Option<RestrictionLeak> {
        self.first_leak(diet.item_ids())
    }

    fn first_leak<'i>(&self, mut ids: impl Iterator<Item = &'i str>) -> Option<RestrictionLeak> {
        ids.find_map(|id| {
            let Some(item) = self.catalog.item(id) else {
                return Some(RestrictionLeak {
                    item_id: id.to_owned(),
                    tags: Vec::new(),
                });
            };
            let tags = item.violated(self.restrictions);
            (!tags.is_empty()).then(|| RestrictionLeak {
                item_id: id.to_owned(),
                tags,
            })
        })
    }

    /// Validate against one set of requirements
    #[must_use]
    pub fn validate(
        &self,
        diet: &DailyDietPlan,
        exercise: &WeeklyExercisePlan,
        requirements: &Requirements,
    ) -> ValidationResult {
        self.validate_relaxed(diet, exercise, requirements, requirements)
    }

    /// Validate against the original bands, reporting the widened tolerances in force
    #[must_use]
    pub fn validate_relaxed(
        &self,
        diet: &DailyDietPlan,
        exercise: &WeeklyExercisePlan,
        original: &Requirements,
        applied: &Requirements,
    ) -> ValidationResult {
        if let Some(leak) = self.restriction_leak(diet, exercise) {
            let reason = if leak.tags.is_empty() {
                format!("item `{}` is not in the catalog", leak.item_id)
            } else {
                format!("item `{}` violates {:?}", leak.item_id, leak.tags)
            };
            return ValidationResult::Infeasible { reason };
        }

        let misses = find_misses(diet, exercise, original);
        if misses.is_empty() {
            return ValidationResult::Ok;
        }

        let adjustments = misses
            .iter()
            .map(|miss| {
                let tolerance_applied =
                    band_for(applied, miss.key).map_or(miss.band.tolerance, |band| band.tolerance);
                Adjustment::new(miss.key, miss.band.target, miss.achieved, tolerance_applied)
            })
            .collect();
        ValidationResult::Relaxed { adjustments }
    }
}

/// Band for a key; session minimums are reported as a zero-width band
fn band_for(requirements: &Requirements, key: TargetKey) -> Option<TargetBand> {
    match key {
        TargetKey::Nutrient(nutrient) => requirements.nutrients.target(nutrient).copied(),
        TargetKey::ActivityMinutes(category) => requirements
            .activity
            .target(category)
            .map(|target| target.minutes),
        TargetKey::ActivitySessions(category) => requirements
            .activity
            .target(category)
            .and_then(|target| target.min_sessions)
            .map(|sessions| TargetBand::new(f64::from(sessions), Tolerance::symmetric(0.0))),
    }
}

/// Every nutrient and activity requirement outside its band
#[must_use]
pub fn find_misses(
    diet: &DailyDietPlan,
    exercise: &WeeklyExercisePlan,
    requirements: &Requirements,
) -> Vec<Miss> {
    let mut misses: Vec<Miss> = requirements
        .nutrients
        .targets
        .iter()
        .filter_map(|(nutrient, band)| {
            let achieved = diet.totals.get(*nutrient);
            (!band.contains(achieved)).then_some(Miss {
                key: TargetKey::Nutrient(*nutrient),
                band: *band,
                achieved,
            })
        })
        .collect();

    let minutes = exercise.minutes_by_category();
    let sessions = exercise.sessions_by_category();
    for (category, target) in &requirements.activity.targets {
        let achieved = f64::from(minutes.get(category).copied().unwrap_or(0));
        if !target.minutes.contains(achieved) {
            misses.push(Miss {
                key: TargetKey::ActivityMinutes(*category),
                band: target.minutes,
                achieved,
            });
        }
        if let Some(min_sessions) = target.min_sessions {
            let achieved = sessions.get(category).copied().unwrap_or(0);
            if achieved < min_sessions {
                misses.push(Miss {
                    key: TargetKey::ActivitySessions(*category),
                    band: TargetBand::new(f64::from(min_sessions), Tolerance::symmetric(0.0)),
                    achieved: f64::from(achieved),
                });
            }
        }
    }

    debug!(misses = misses.len(), "Checked plan against bands");
    misses
}

/// Copy of `requirements` with each missed band widened by `step` on the missed side
///
/// Session minimums are hard counts and are never widened.
#[must_use]
pub fn widen_requirements(requirements: &Requirements, misses: &[Miss], step: f64) -> Requirements {
    let mut widened = requirements.clone();
    for miss in misses {
        let (below_step, above_step) = if miss.is_below() {
            (step, 0.0)
        } else {
            (0.0, step)
        };
        match miss.key {
            TargetKey::Nutrient(nutrient) => {
                widen_nutrient(&mut widened, nutrient, below_step, above_step);
            }
            TargetKey::ActivityMinutes(category) => {
                widen_minutes(&mut widened, category, below_step, above_step);
            }
            TargetKey::ActivitySessions(_) => {}
        }
    }
    widened
}

fn widen_nutrient(requirements: &mut Requirements, nutrient: Nutrient, below: f64, above: f64) {
    if let Some(band) = requirements.nutrients.targets.get_mut(&nutrient) {
        band.tolerance = band.tolerance.widened(below, above);
    }
}

fn widen_minutes(
    requirements: &mut Requirements,
    category: ActivityCategory,
    below: f64,
    above: f64,
) {
    if let Some(target) = requirements.activity.targets.get_mut(&category) {
        target.minutes.tolerance = target.minutes.tolerance.widened(below, above);
    }
}
