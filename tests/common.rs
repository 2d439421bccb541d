// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides logging setup, reference profiles and catalog builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `vitaplan`

use std::collections::BTreeSet;
use std::sync::Once;
use vitaplan::models::{
    Activity, ActivityCategory, ActivityLevel, CatalogItem, HealthProfile, Meal, MealSlot,
    Nutrient, NutrientVector, Seasons, Sex,
};
use vitaplan::Catalog;

static INIT_LOGGER: Once = Once::new();

/// Reference catalog shipped with the repository
pub const CATALOG_JSON: &str = include_str!("../data/catalog.json");

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// 70 kg, 175 cm, 30 year old moderately active male
pub fn reference_profile() -> HealthProfile {
    HealthProfile::new(70.0, 175.0, 30, Sex::Male, ActivityLevel::ModeratelyActive)
}

/// The repository's reference catalog
pub fn reference_catalog() -> Catalog {
    init_test_logging();
    Catalog::from_json_str(CATALOG_JSON).unwrap()
}

/// Reference catalog items, for tests that reorder or extend them
pub fn reference_items() -> Vec<CatalogItem> {
    serde_json::from_str(CATALOG_JSON).unwrap()
}

/// Meal whose energy splits 24/28/48 across protein, fat and carbohydrate
pub fn balanced_meal(id: &str, kcal: f64, slot: MealSlot) -> Meal {
    Meal {
        id: id.to_owned(),
        name: id.replace('_', " "),
        cuisine: None,
        tags: BTreeSet::new(),
        slots: BTreeSet::from([slot]),
        nutrients: NutrientVector::new()
            .with(Nutrient::Calories, kcal)
            .with(Nutrient::Protein, kcal * 0.24 / 4.0)
            .with(Nutrient::Fat, kcal * 0.28 / 9.0)
            .with(Nutrient::Carbohydrate, kcal * 0.48 / 4.0)
            .with(Nutrient::Fiber, kcal * 0.015)
            .with(Nutrient::Sodium, kcal * 0.8)
            .with(Nutrient::Potassium, kcal * 1.5)
            .with(Nutrient::Calcium, kcal * 0.45)
            .with(Nutrient::Iron, kcal * 0.0037)
            .with(Nutrient::VitaminC, kcal * 0.045),
        restriction_tags: BTreeSet::new(),
        availability: Seasons::default(),
    }
}

/// Activity without focus or restriction tags
pub fn activity(id: &str, category: ActivityCategory, met: f64) -> Activity {
    Activity {
        id: id.to_owned(),
        name: id.replace('_', " "),
        category,
        met,
        focus_tags: BTreeSet::new(),
        restriction_tags: BTreeSet::new(),
        availability: Seasons::default(),
    }
}

/// Add restriction tags to a meal
pub fn tagged(mut meal: Meal, tags: &[&str]) -> Meal {
    meal.restriction_tags
        .extend(tags.iter().map(|tag| (*tag).to_owned()));
    meal
}

/// One activity for each of the default baseline categories
pub fn baseline_activities() -> Vec<CatalogItem> {
    [
        ("walk", ActivityCategory::Cardio, 3.5),
        ("circuit", ActivityCategory::Strength, 3.8),
        ("stretch", ActivityCategory::Flexibility, 2.3),
        ("yoga", ActivityCategory::MindBody, 2.5),
        ("breathing", ActivityCategory::Breathing, 1.3),
    ]
    .into_iter()
    .map(|(id, category, met)| CatalogItem::Activity(activity(id, category, met)))
    .collect()
}
