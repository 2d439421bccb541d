// ABOUTME: Ordered table of named requirement adjustment rules gated by profile flags
// ABOUTME: Each rule is a pure transformation of a requirement draft using configured deltas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Requirement adjustment rules
//!
//! Conditions and goals modify the baseline targets through a fixed, ordered
//! table. Rules run in table order; macro shares are clamped and renormalized
//! after each one so that later rules always see a valid distribution.

use crate::config::planner::AdjustmentDeltas;
use std::collections::BTreeMap;
use tracing::debug;
use vitaplan_core::models::{
    ActivityCategory, FitnessGoal, HealthCondition, HealthProfile, MacroShares,
};

/// Mutable intermediate state the rules operate on
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementDraft {
    /// Daily energy target (kcal)
    pub energy_kcal: f64,
    /// Macronutrient energy shares
    pub macro_shares: MacroShares,
    /// Daily sodium upper limit (mg)
    pub sodium_limit_mg: f64,
    /// Weekly minutes per category
    pub activity_minutes: BTreeMap<ActivityCategory, f64>,
    /// Weekly strength sessions
    pub strength_sessions: u32,
}

impl RequirementDraft {
    fn scale_minutes(&mut self, category: ActivityCategory, factor: f64) {
        if let Some(minutes) = self.activity_minutes.get_mut(&category) {
            *minutes *= factor;
        }
    }

    fn add_minutes(&mut self, category: ActivityCategory, minutes: f64) {
        *self.activity_minutes.entry(category).or_insert(0.0) += minutes;
    }
}

/// A named requirement adjustment
#[derive(Debug, Clone, Copy)]
pub struct AdjustmentRule {
    /// Stable rule name reported in `applied_rules`
    pub name: &'static str,
    /// Whether the rule applies to a profile
    pub applies: fn(&HealthProfile) -> bool,
    /// Transformation applied to the draft
    pub apply: fn(RequirementDraft, &AdjustmentDeltas) -> RequirementDraft,
}

/// Rules in application order
pub const ADJUSTMENT_RULES: [AdjustmentRule; 12] = [
    AdjustmentRule {
        name: "weight_loss_deficit",
        applies: |p| p.has_goal(FitnessGoal::WeightLoss),
        apply: weight_loss_deficit,
    },
    AdjustmentRule {
        name: "muscle_gain_surplus",
        applies: |p| p.has_goal(FitnessGoal::MuscleBuilding),
        apply: muscle_gain_surplus,
    },
    AdjustmentRule {
        name: "metabolic_carb_shift",
        applies: |p| p.has_condition(HealthCondition::MetabolicCondition),
        apply: metabolic_carb_shift,
    },
    AdjustmentRule {
        name: "muscle_protein_shift",
        applies: |p| p.has_goal(FitnessGoal::MuscleBuilding),
        apply: muscle_protein_shift,
    },
    AdjustmentRule {
        name: "endurance_carb_shift",
        applies: |p| p.has_goal(FitnessGoal::EnduranceTraining),
        apply: endurance_carb_shift,
    },
    AdjustmentRule {
        name: "hypertension_sodium_cap",
        applies: |p| p.has_condition(HealthCondition::Hypertension),
        apply: hypertension_sodium_cap,
    },
    AdjustmentRule {
        name: "mobility_activity_scale",
        applies: |p| p.has_condition(HealthCondition::MobilityConstraint),
        apply: mobility_activity_scale,
    },
    AdjustmentRule {
        name: "cardiac_intensity_scale",
        applies: |p| p.has_condition(HealthCondition::CardiacRisk),
        apply: cardiac_intensity_scale,
    },
    AdjustmentRule {
        name: "muscle_strength_scale",
        applies: |p| p.has_goal(FitnessGoal::MuscleBuilding),
        apply: muscle_strength_scale,
    },
    AdjustmentRule {
        name: "endurance_cardio_scale",
        applies: |p| p.has_goal(FitnessGoal::EnduranceTraining),
        apply: endurance_cardio_scale,
    },
    AdjustmentRule {
        name: "weight_loss_cardio_scale",
        applies: |p| p.has_goal(FitnessGoal::WeightLoss),
        apply: weight_loss_cardio_scale,
    },
    AdjustmentRule {
        name: "general_fitness_functional",
        applies: |p| p.has_goal(FitnessGoal::GeneralFitness),
        apply: general_fitness_functional,
    },
];

/// Apply every matching rule in order
///
/// Returns the final draft and the names of the rules that fired.
#[must_use]
pub fn apply_rules(
    mut draft: RequirementDraft,
    profile: &HealthProfile,
    deltas: &AdjustmentDeltas,
    min_macro_share: f64,
) -> (RequirementDraft, Vec<String>) {
    let mut applied = Vec::new();
    for rule in &ADJUSTMENT_RULES {
        if !(rule.applies)(profile) {
            continue;
        }
        draft = (rule.apply)(draft, deltas);
        draft.macro_shares = draft.macro_shares.normalized(min_macro_share);
        debug!(
            rule = rule.name,
            energy_kcal = draft.energy_kcal,
            protein_share = draft.macro_shares.protein,
            fat_share = draft.macro_shares.fat,
            carbohydrate_share = draft.macro_shares.carbohydrate,
            "Applied adjustment rule"
        );
        applied.push(rule.name.to_owned());
    }
    (draft, applied)
}

fn weight_loss_deficit(
    mut draft: RequirementDraft,
    deltas: &AdjustmentDeltas,
) -> RequirementDraft {
    draft.energy_kcal *= deltas.weight_loss_energy_factor;
    draft
}

fn muscle_gain_surplus(
    mut draft: RequirementDraft,
    deltas: &AdjustmentDeltas,
) -> RequirementDraft {
    draft.energy_kcal *= deltas.muscle_gain_energy_factor;
    draft
}

fn metabolic_carb_shift(
    mut draft: RequirementDraft,
    deltas: &AdjustmentDeltas,
) -> RequirementDraft {
    let shift = deltas.metabolic_carb_shift;
    draft.macro_shares.carbohydrate -= shift;
    draft.macro_shares.protein += shift / 2.0;
    draft.macro_shares.fat += shift / 2.0;
    draft
}

fn muscle_protein_shift(
    mut draft: RequirementDraft,
    deltas: &AdjustmentDeltas,
) -> RequirementDraft {
    draft.macro_shares.protein += deltas.muscle_protein_shift;
    draft.macro_shares.carbohydrate -= deltas.muscle_protein_shift;
    draft
}

fn endurance_carb_shift(
    mut draft: RequirementDraft,
    deltas: &AdjustmentDeltas,
) -> RequirementDraft {
    draft.macro_shares.carbohydrate += deltas.endurance_carb_shift;
    draft.macro_shares.fat -= deltas.endurance_carb_shift;
    draft
}

fn hypertension_sodium_cap(
    mut draft: RequirementDraft,
    deltas: &AdjustmentDeltas,
) -> RequirementDraft {
    draft.sodium_limit_mg = draft
        .sodium_limit_mg
        .min(deltas.hypertension_sodium_limit_mg);
    draft
}

fn mobility_activity_scale(
    mut draft: RequirementDraft,
    deltas: &AdjustmentDeltas,
) -> RequirementDraft {
    for minutes in draft.activity_minutes.values_mut() {
        *minutes *= deltas.mobility_minutes_factor;
    }
    draft
}

fn cardiac_intensity_scale(
    mut draft: RequirementDraft,
    deltas: &AdjustmentDeltas,
) -> RequirementDraft {
    draft.scale_minutes(ActivityCategory::Cardio, deltas.cardiac_cardio_factor);
    draft
        .activity_minutes
        .insert(ActivityCategory::MartialArts, 0.0);
    draft
}

fn muscle_strength_scale(
    mut draft: RequirementDraft,
    deltas: &AdjustmentDeltas,
) -> RequirementDraft {
    draft.scale_minutes(ActivityCategory::Strength, deltas.muscle_strength_factor);
    draft.strength_sessions += deltas.muscle_extra_sessions;
    draft
}

fn endurance_cardio_scale(
    mut draft: RequirementDraft,
    deltas: &AdjustmentDeltas,
) -> RequirementDraft {
    draft.scale_minutes(ActivityCategory::Cardio, deltas.endurance_cardio_factor);
    draft
}

fn weight_loss_cardio_scale(
    mut draft: RequirementDraft,
    deltas: &AdjustmentDeltas,
) -> RequirementDraft {
    draft.scale_minutes(ActivityCategory::Cardio, deltas.weight_loss_cardio_factor);
    draft
}

fn general_fitness_functional(
    mut draft: RequirementDraft,
    deltas: &AdjustmentDeltas,
) -> RequirementDraft {
    draft.add_minutes(
        ActivityCategory::Functional,
        deltas.general_fitness_functional_minutes,
    );
    draft
}
