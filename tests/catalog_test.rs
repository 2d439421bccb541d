// ABOUTME: Integration tests for catalog construction and candidate filtering
// ABOUTME: Covers validation errors, declaration order, restriction and season filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::BTreeSet;
use vitaplan::errors::SolveError;
use vitaplan::models::{ActivityCategory, CatalogItem, ItemKind, MealSlot, Nutrient, Season};
use vitaplan::{Catalog, CatalogFilter};

fn filter(restrictions: &[&str], season: Option<Season>) -> CatalogFilter {
    CatalogFilter {
        restrictions: restrictions.iter().map(|t| (*t).to_owned()).collect(),
        season,
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_reference_catalog_loads() {
    let catalog = common::reference_catalog();
    assert!(!catalog.is_empty());
    assert_eq!(catalog.len(), common::reference_items().len());
    assert!(catalog.item("oat_porridge").is_some());
    assert!(catalog.item("missing").is_none());
}

#[test]
fn test_duplicate_ids_rejected() {
    let items = vec![
        CatalogItem::Meal(common::balanced_meal("soup", 400.0, MealSlot::Lunch)),
        CatalogItem::Meal(common::balanced_meal("soup", 500.0, MealSlot::Dinner)),
    ];
    let err = Catalog::new(items).unwrap_err();
    assert!(matches!(err, SolveError::InvalidCatalog { .. }));
    assert!(err.to_string().contains("soup"));
}

#[test]
fn test_negative_nutrients_rejected() {
    let mut meal = common::balanced_meal("odd", 400.0, MealSlot::Snack);
    meal.nutrients = meal.nutrients.with(Nutrient::Sodium, -10.0);

    let err = Catalog::new(vec![CatalogItem::Meal(meal)]).unwrap_err();
    assert!(matches!(err, SolveError::InvalidCatalog { .. }));
}

#[test]
fn test_non_positive_met_rejected() {
    let activity = common::activity("rest", ActivityCategory::Breathing, 0.0);
    let err = Catalog::new(vec![CatalogItem::Activity(activity)]).unwrap_err();
    assert!(matches!(err, SolveError::InvalidCatalog { .. }));
}

#[test]
fn test_malformed_json_rejected() {
    let err = Catalog::from_json_str("[{\"kind\": \"meal\"").unwrap_err();
    assert!(matches!(err, SolveError::InvalidCatalog { .. }));
}

// ============================================================================
// Candidates
// ============================================================================

#[test]
fn test_candidates_keep_declaration_order() {
    let catalog = common::reference_catalog();
    let open = CatalogFilter::default();

    let declared: Vec<&str> = catalog
        .items()
        .iter()
        .filter(|item| item.kind() == ItemKind::Meal)
        .map(CatalogItem::id)
        .collect();
    let candidates: Vec<&str> = catalog
        .candidates(ItemKind::Meal, &open)
        .map(CatalogItem::id)
        .collect();
    assert_eq!(candidates, declared);
}

#[test]
fn test_restriction_filter_excludes_tagged_items() {
    let catalog = common::reference_catalog();
    let no_gluten = filter(&["gluten"], None);

    let ids: BTreeSet<&str> = catalog.meals(&no_gluten).map(|m| m.id.as_str()).collect();
    assert!(!ids.contains("wholegrain_toast"));
    assert!(!ids.contains("pasta_primavera"));
    assert!(!ids.contains("peanut_energy_bar"));
    assert!(ids.contains("oat_porridge"));
    assert!(catalog
        .meals(&no_gluten)
        .all(|meal| !meal.restriction_tags.contains("gluten")));
}

#[test]
fn test_season_filter_uses_availability() {
    let catalog = common::reference_catalog();

    let spring_filter = filter(&[], Some(Season::Spring));
    let spring: BTreeSet<&str> = catalog
        .meals(&spring_filter)
        .map(|m| m.id.as_str())
        .collect();
    let winter_filter = filter(&[], Some(Season::Winter));
    let winter: BTreeSet<&str> = catalog
        .meals(&winter_filter)
        .map(|m| m.id.as_str())
        .collect();
    assert!(!spring.contains("pumpkin_risotto"));
    assert!(winter.contains("pumpkin_risotto"));

    let summer_filter = filter(&[], Some(Season::Summer));
    let summer_activities: Vec<&str> = catalog
        .activities(&summer_filter)
        .map(|a| a.id.as_str())
        .collect();
    assert!(!summer_activities.contains(&"cross_country_ski"));
}

#[test]
fn test_candidate_iterators_restart_from_clone() {
    let catalog = common::reference_catalog();
    let open = CatalogFilter::default();
    let activities = catalog.activities(&open);

    let first: Vec<&str> = activities.clone().map(|a| a.id.as_str()).collect();
    let second: Vec<&str> = activities.map(|a| a.id.as_str()).collect();
    assert_eq!(first, second);
    assert!(first.iter().all(|id| catalog
        .item(id)
        .is_some_and(|item| item.kind() == ItemKind::Activity)));
}

#[test]
fn test_filter_from_profile() {
    let profile = common::reference_profile()
        .with_restriction("dairy")
        .in_season(Season::Autumn);
    let filter = CatalogFilter::from_profile(&profile);

    assert!(filter.restrictions.contains("dairy"));
    assert_eq!(filter.season, Some(Season::Autumn));

    let catalog = common::reference_catalog();
    let risotto = catalog.item("pumpkin_risotto").unwrap();
    assert!(!filter.admits(risotto));
    assert!(filter.admits(catalog.item("bean_chili").unwrap()));
}
