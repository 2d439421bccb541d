// ABOUTME: Criterion benchmarks for the plan solver cores and full solves
// ABOUTME: Measures requirement derivation, diet search and exercise allocation across catalog sizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the plan solver.
//!
//! Catalogs are generated deterministically so runs are comparable.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::BTreeSet;
use vitaplan::config::PlannerConfig;
use vitaplan::intelligence::{compute_requirements, DietOptimizer, ExerciseAllocator};
use vitaplan::models::{
    Activity, ActivityCategory, ActivityLevel, CatalogItem, HealthProfile, Meal, MealSlot,
    Nutrient, NutrientVector, Seasons, Sex,
};
use vitaplan::{Catalog, CatalogFilter, Planner};

/// Catalog sizes in meals; activities are added on top
const CATALOG_SIZES: [usize; 3] = [20, 100, 400];

fn profile() -> HealthProfile {
    HealthProfile::new(70.0, 175.0, 30, Sex::Male, ActivityLevel::ModeratelyActive)
        .with_restriction("gluten")
}

/// Generate `meals` meals spread over the four slots plus two activities per category
#[allow(clippy::cast_precision_loss)]
fn generate_catalog(meals: usize) -> Catalog {
    let slot_kcal = [
        (MealSlot::Breakfast, 640.0),
        (MealSlot::Lunch, 770.0),
        (MealSlot::Dinner, 770.0),
        (MealSlot::Snack, 380.0),
    ];

    let mut items: Vec<CatalogItem> = (0..meals)
        .map(|index| {
            let (slot, base) = slot_kcal[index % slot_kcal.len()];
            let kcal = base * (0.8 + ((index * 37) % 40) as f64 / 100.0);
            let protein_share = 0.18 + ((index * 13) % 12) as f64 / 100.0;
            let fat_share = 0.22 + ((index * 7) % 12) as f64 / 100.0;
            let carbohydrate_share = 1.0 - protein_share - fat_share;
            let restriction_tags = if index % 5 == 0 {
                BTreeSet::from(["gluten".to_owned()])
            } else {
                BTreeSet::new()
            };

            CatalogItem::Meal(Meal {
                id: format!("bench_meal_{index}"),
                name: format!("Benchmark Meal {index}"),
                cuisine: None,
                tags: BTreeSet::new(),
                slots: BTreeSet::from([slot]),
                nutrients: NutrientVector::new()
                    .with(Nutrient::Calories, kcal)
                    .with(Nutrient::Protein, kcal * protein_share / 4.0)
                    .with(Nutrient::Fat, kcal * fat_share / 9.0)
                    .with(Nutrient::Carbohydrate, kcal * carbohydrate_share / 4.0)
                    .with(Nutrient::Fiber, kcal * 0.015)
                    .with(Nutrient::Sodium, kcal * 0.8)
                    .with(Nutrient::Potassium, kcal * 1.4)
                    .with(Nutrient::Calcium, kcal * 0.4)
                    .with(Nutrient::Iron, kcal * 0.004)
                    .with(Nutrient::VitaminC, kcal * 0.04),
                restriction_tags,
                availability: Seasons::default(),
            })
        })
        .collect();

    items.extend(ActivityCategory::ALL.iter().flat_map(|category| {
        (0..2).map(move |variant| {
            CatalogItem::Activity(Activity {
                id: format!("bench_{category}_{variant}"),
                name: format!("Benchmark {category} {variant}"),
                category: *category,
                met: 3.0 + f64::from(variant),
                focus_tags: BTreeSet::new(),
                restriction_tags: BTreeSet::new(),
                availability: Seasons::default(),
            })
        })
    }));

    Catalog::new(items).unwrap_or_default()
}

fn bench_requirements(c: &mut Criterion) {
    let Ok(planner) = Planner::new(PlannerConfig::default()) else {
        return;
    };
    let profile = profile();

    c.bench_function("recompute_requirements", |b| {
        b.iter(|| planner.recompute_requirements(black_box(&profile)));
    });
}

fn bench_diet_core(c: &mut Criterion) {
    let mut group = c.benchmark_group("diet_core");
    let config = PlannerConfig::default();
    let profile = profile();
    let filter = CatalogFilter::from_profile(&profile);
    let Ok(requirements) = compute_requirements(&profile, &config.requirements) else {
        return;
    };

    for size in CATALOG_SIZES {
        let catalog = generate_catalog(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("solve_diet", size), &catalog, |b, catalog| {
            let optimizer = DietOptimizer::new(&config.diet, &profile.preferences);
            b.iter(|| {
                optimizer.solve_diet(
                    black_box(&requirements.nutrients),
                    catalog.meals(&filter),
                    &[],
                )
            });
        });
    }

    group.finish();
}

fn bench_exercise_core(c: &mut Criterion) {
    let config = PlannerConfig::default();
    let profile = profile();
    let filter = CatalogFilter::from_profile(&profile);
    let catalog = generate_catalog(CATALOG_SIZES[0]);
    let Ok(requirements) = compute_requirements(&profile, &config.requirements) else {
        return;
    };

    c.bench_function("solve_week", |b| {
        let allocator = ExerciseAllocator::new(&config.exercise);
        b.iter(|| {
            allocator.solve_week(
                black_box(&requirements.activity),
                catalog.activities(&filter),
                &profile.focus_areas,
            )
        });
    });
}

fn bench_full_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_solve");
    let profile = profile();

    for parallel_cores in [false, true] {
        let Ok(planner) = Planner::new(PlannerConfig {
            parallel_cores,
            ..PlannerConfig::default()
        }) else {
            continue;
        };
        let catalog = generate_catalog(CATALOG_SIZES[1]);
        let label = if parallel_cores { "parallel" } else { "sequential" };

        group.bench_function(label, |b| {
            b.iter(|| planner.solve(black_box(&profile), &catalog));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_requirements,
    bench_diet_core,
    bench_exercise_core,
    bench_full_solve,
);
criterion_main!(benches);
