// ABOUTME: Requirements engine deriving nutrient and activity targets from a health profile
// ABOUTME: Combines BMR/TDEE baselines, micronutrient DRIs, activity baselines and adjustment rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Requirements Engine
//!
//! Pure function of `(profile, configuration)`. Missing or out-of-range
//! biometrics are rejected with the offending field named; nothing is
//! defaulted.

use super::adjustment_rules::{apply_rules, RequirementDraft};
use super::nutrition_calculator::{
    calculate_mifflin_st_jeor, calculate_tdee, macro_grams, micronutrient_baselines,
};
use crate::config::planner::{RequirementsConfig, ToleranceConfig};
use std::collections::BTreeMap;
use tracing::info;
use vitaplan_core::errors::{SolveError, SolveResult};
use vitaplan_core::models::{
    ActivityCategory, ActivityLevel, ActivityRequirements, CategoryTarget, HealthProfile,
    MacroShares, Nutrient, NutrientRequirements, Requirements, Sex, TargetBand, Tolerance,
};

/// Biometric fields the engine requires, validated and unwrapped
struct Biometrics {
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: Sex,
    activity_level: ActivityLevel,
}

fn required<T: Copy>(value: Option<T>, field: &'static str) -> SolveResult<T> {
    value.ok_or_else(|| SolveError::invalid_profile(field, "is required"))
}

fn biometrics(profile: &HealthProfile) -> SolveResult<Biometrics> {
    Ok(Biometrics {
        weight_kg: required(profile.weight_kg, "weight_kg")?,
        height_cm: required(profile.height_cm, "height_cm")?,
        age_years: required(profile.age_years, "age_years")?,
        sex: required(profile.sex, "sex")?,
        activity_level: required(profile.activity_level, "activity_level")?,
    })
}

/// Tolerance applied to a nutrient's target
#[must_use]
pub const fn nutrient_tolerance(nutrient: Nutrient, config: &ToleranceConfig) -> Tolerance {
    match nutrient {
        Nutrient::Calories => Tolerance::symmetric(config.calories),
        Nutrient::Protein => Tolerance::symmetric(config.protein),
        Nutrient::Fat | Nutrient::Carbohydrate => Tolerance::symmetric(config.fat_carbohydrate),
        Nutrient::Fiber => config.fiber,
        Nutrient::Sodium => config.sodium,
        Nutrient::Potassium | Nutrient::Calcium | Nutrient::Iron | Nutrient::VitaminC => {
            config.micronutrient
        }
    }
}

/// Derive daily nutrient and weekly activity requirements for a profile
///
/// # Errors
///
/// Returns `InvalidProfile` if a biometric field is missing or out of range
pub fn compute_requirements(
    profile: &HealthProfile,
    config: &RequirementsConfig,
) -> SolveResult<Requirements> {
    let bio = biometrics(profile)?;

    let bmr = calculate_mifflin_st_jeor(
        bio.weight_kg,
        bio.height_cm,
        bio.age_years,
        bio.sex,
        &config.bmr,
    )?;
    let tdee = calculate_tdee(bmr, bio.activity_level, &config.activity_factors)?;

    let baseline = RequirementDraft {
        energy_kcal: tdee,
        macro_shares: MacroShares {
            protein: config.macro_shares.protein,
            fat: config.macro_shares.fat,
            carbohydrate: config.macro_shares.carbohydrate,
        }
        .normalized(config.macro_shares.min_share),
        sodium_limit_mg: config.micronutrients.sodium_limit_mg,
        activity_minutes: ActivityCategory::ALL
            .iter()
            .map(|category| (*category, config.activity_baseline.minutes(*category)))
            .collect(),
        strength_sessions: config.activity_baseline.strength_sessions,
    };

    let (draft, applied_rules) = apply_rules(
        baseline,
        profile,
        &config.adjustments,
        config.macro_shares.min_share,
    );

    let nutrients = nutrient_targets(&draft, &bio, bmr, tdee, applied_rules, config);
    let activity = activity_targets(&draft, bio.weight_kg, &config.tolerances);

    info!(
        bmr_kcal = nutrients.bmr_kcal,
        tdee_kcal = nutrients.tdee_kcal,
        energy_kcal = nutrients.energy_kcal(),
        weekly_minutes = activity.total_minutes(),
        rules = ?nutrients.applied_rules,
        "Computed requirements"
    );

    Ok(Requirements {
        nutrients,
        activity,
    })
}

fn nutrient_targets(
    draft: &RequirementDraft,
    bio: &Biometrics,
    bmr: f64,
    tdee: f64,
    applied_rules: Vec<String>,
    config: &RequirementsConfig,
) -> NutrientRequirements {
    let energy = draft.energy_kcal;
    let (protein_g, fat_g, carbohydrate_g) = macro_grams(&draft.macro_shares, energy);
    let micros = micronutrient_baselines(bio.sex, bio.age_years, energy, &config.micronutrients);

    let amount = |nutrient: Nutrient| match nutrient {
        Nutrient::Calories => energy,
        Nutrient::Protein => protein_g,
        Nutrient::Fat => fat_g,
        Nutrient::Carbohydrate => carbohydrate_g,
        Nutrient::Sodium => draft.sodium_limit_mg,
        Nutrient::Fiber
        | Nutrient::Potassium
        | Nutrient::Calcium
        | Nutrient::Iron
        | Nutrient::VitaminC => micros.get(nutrient),
    };

    let targets: BTreeMap<Nutrient, TargetBand> = Nutrient::ALL
        .iter()
        .map(|nutrient| {
            (
                *nutrient,
                TargetBand::new(
                    amount(*nutrient),
                    nutrient_tolerance(*nutrient, &config.tolerances),
                ),
            )
        })
        .collect();

    NutrientRequirements {
        bmr_kcal: bmr,
        tdee_kcal: tdee,
        macro_shares: draft.macro_shares,
        targets,
        applied_rules,
    }
}

fn activity_targets(
    draft: &RequirementDraft,
    body_weight_kg: f64,
    tolerances: &ToleranceConfig,
) -> ActivityRequirements {
    let tolerance = Tolerance::symmetric(tolerances.activity_minutes);
    let targets = draft
        .activity_minutes
        .iter()
        .filter(|(_, minutes)| **minutes > 0.0)
        .map(|(category, minutes)| {
            let min_sessions =
                (*category == ActivityCategory::Strength).then_some(draft.strength_sessions);
            (
                *category,
                CategoryTarget {
                    minutes: TargetBand::new(*minutes, tolerance),
                    min_sessions,
                },
            )
        })
        .collect();

    ActivityRequirements {
        body_weight_kg,
        targets,
    }
}
