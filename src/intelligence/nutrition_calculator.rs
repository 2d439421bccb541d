// ABOUTME: Nutrition calculation algorithms using peer-reviewed scientific formulas
// ABOUTME: BMR, TDEE, macronutrient grams and micronutrient baselines from biometrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Calculator Module
//!
//! Evidence-based energy and nutrient baselines. All formulas take their
//! coefficients from [`RequirementsConfig`](crate::config::RequirementsConfig).
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - Institute of Medicine (2005). Dietary Reference Intakes for Energy, Carbohydrate,
//!   Fiber, Fat, Fatty Acids, Cholesterol, Protein, and Amino Acids.

use crate::config::planner::{ActivityFactorsConfig, BmrConfig, MicronutrientConfig};
use vitaplan_core::errors::{SolveError, SolveResult};
use vitaplan_core::models::{ActivityLevel, MacroShares, Nutrient, NutrientVector, Sex};

/// Energy per gram of protein (kcal)
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// Energy per gram of carbohydrate (kcal)
pub const KCAL_PER_G_CARBOHYDRATE: f64 = 4.0;
/// Energy per gram of fat (kcal)
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `sex_offset`
/// - Men: +5
/// - Women: -161
///
/// The result is floored at `config.min_bmr_kcal`.
///
/// # Reference
/// Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
///
/// # Errors
///
/// Returns `InvalidProfile` naming the field if an input is out of its valid range
pub fn calculate_mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    sex: Sex,
    config: &BmrConfig,
) -> SolveResult<f64> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 || weight_kg > 300.0 {
        return Err(SolveError::invalid_profile(
            "weight_kg",
            "must be between 0 and 300 kg",
        ));
    }
    if !height_cm.is_finite() || height_cm <= 0.0 || height_cm > 300.0 {
        return Err(SolveError::invalid_profile(
            "height_cm",
            "must be between 0 and 300 cm",
        ));
    }
    if !(10..=120).contains(&age) {
        return Err(SolveError::invalid_profile(
            "age_years",
            "must be between 10 and 120 years (Mifflin-St Jeor formula validated for ages 10+)",
        ));
    }

    let weight_component = config.msj_weight_coef * weight_kg;
    let height_component = config.msj_height_coef * height_cm;
    let age_component = config.msj_age_coef * f64::from(age);

    let sex_constant = match sex {
        Sex::Male => config.msj_male_constant,
        Sex::Female => config.msj_female_constant,
    };

    let bmr = weight_component + height_component + age_component + sex_constant;

    Ok(bmr.max(config.min_bmr_kcal))
}

/// Activity factor for an activity level
#[must_use]
pub const fn activity_factor(activity_level: ActivityLevel, config: &ActivityFactorsConfig) -> f64 {
    match activity_level {
        ActivityLevel::Sedentary => config.sedentary,
        ActivityLevel::LightlyActive => config.lightly_active,
        ActivityLevel::ModeratelyActive => config.moderately_active,
        ActivityLevel::VeryActive => config.very_active,
        ActivityLevel::ExtraActive => config.extra_active,
    }
}

/// Calculate Total Daily Energy Expenditure (TDEE)
///
/// Formula: TDEE = BMR x Activity Factor
///
/// Activity factors based on `McArdle` et al. (2010):
/// - Sedentary: 1.2 (little/no exercise)
/// - Lightly active: 1.375 (1-3 days/week)
/// - Moderately active: 1.55 (3-5 days/week)
/// - Very active: 1.725 (6-7 days/week)
/// - Extra active: 1.9 (hard training 2x/day)
///
/// # Errors
///
/// Returns `InvalidProfile` if BMR is not positive
pub fn calculate_tdee(
    bmr: f64,
    activity_level: ActivityLevel,
    config: &ActivityFactorsConfig,
) -> SolveResult<f64> {
    if bmr <= 0.0 || !bmr.is_finite() {
        return Err(SolveError::invalid_profile("bmr", "must be positive"));
    }

    Ok(bmr * activity_factor(activity_level, config))
}

/// Convert energy shares into gram targets for each macronutrient
///
/// Returns `(protein_g, fat_g, carbohydrate_g)`.
#[must_use]
pub fn macro_grams(shares: &MacroShares, energy_kcal: f64) -> (f64, f64, f64) {
    (
        shares.protein * energy_kcal / KCAL_PER_G_PROTEIN,
        shares.fat * energy_kcal / KCAL_PER_G_FAT,
        shares.carbohydrate * energy_kcal / KCAL_PER_G_CARBOHYDRATE,
    )
}

/// Baseline fiber, mineral and vitamin targets
///
/// Fiber scales with energy (14 g per 1000 kcal by default); the rest depend
/// on sex and age per the Dietary Reference Intakes.
#[must_use]
pub fn micronutrient_baselines(
    sex: Sex,
    age: u32,
    energy_kcal: f64,
    config: &MicronutrientConfig,
) -> NutrientVector {
    let older = age > config.calcium_older_age;

    let potassium = match sex {
        Sex::Male => config.potassium_male_mg,
        Sex::Female => config.potassium_female_mg,
    };
    let calcium = if older {
        config.calcium_older_mg
    } else {
        config.calcium_mg
    };
    let iron = match sex {
        Sex::Female if !older => config.iron_female_mg,
        Sex::Male | Sex::Female => config.iron_mg,
    };
    let vitamin_c = match sex {
        Sex::Male => config.vitamin_c_male_mg,
        Sex::Female => config.vitamin_c_female_mg,
    };

    NutrientVector::new()
        .with(
            Nutrient::Fiber,
            config.fiber_g_per_1000_kcal * energy_kcal / 1000.0,
        )
        .with(Nutrient::Sodium, config.sodium_limit_mg)
        .with(Nutrient::Potassium, potassium)
        .with(Nutrient::Calcium, calcium)
        .with(Nutrient::Iron, iron)
        .with(Nutrient::VitaminC, vitamin_c)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mifflin_st_jeor_male() {
        // 10*70 + 6.25*175 - 5*30 + 5 = 1648.75
        let bmr = calculate_mifflin_st_jeor(70.0, 175.0, 30, Sex::Male, &BmrConfig::default())
            .unwrap();
        assert!((bmr - 1648.75).abs() < 1e-9);
    }

    #[test]
    fn test_mifflin_st_jeor_floor() {
        let bmr = calculate_mifflin_st_jeor(30.0, 120.0, 90, Sex::Female, &BmrConfig::default())
            .unwrap();
        assert!((bmr - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mifflin_st_jeor_rejects_out_of_range_age() {
        let err = calculate_mifflin_st_jeor(70.0, 175.0, 9, Sex::Male, &BmrConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SolveError::InvalidProfile {
                field: "age_years",
                ..
            }
        ));
    }

    #[test]
    fn test_tdee_moderate() {
        let tdee = calculate_tdee(
            1648.75,
            ActivityLevel::ModeratelyActive,
            &ActivityFactorsConfig::default(),
        )
        .unwrap();
        assert!((tdee - 2555.5625).abs() < 1e-9);
    }

    #[test]
    fn test_micronutrients_depend_on_sex_and_age() {
        let config = MicronutrientConfig::default();
        let young_female = micronutrient_baselines(Sex::Female, 30, 2000.0, &config);
        let older_female = micronutrient_baselines(Sex::Female, 60, 2000.0, &config);
        let male = micronutrient_baselines(Sex::Male, 30, 2500.0, &config);

        assert!((young_female.get(Nutrient::Iron) - 18.0).abs() < f64::EPSILON);
        assert!((older_female.get(Nutrient::Iron) - 8.0).abs() < f64::EPSILON);
        assert!((older_female.get(Nutrient::Calcium) - 1200.0).abs() < f64::EPSILON);
        assert!((male.get(Nutrient::Fiber) - 35.0).abs() < 1e-9);
        assert!((male.get(Nutrient::VitaminC) - 90.0).abs() < f64::EPSILON);
    }
}
