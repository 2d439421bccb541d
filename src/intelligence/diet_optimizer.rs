// ABOUTME: Diet optimization core selecting one meal and portion per slot to meet daily targets
// ABOUTME: Greedy slot scoring with bounded depth-first backtracking and variety-window relaxation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Diet Optimization Core
//!
//! Slots are filled in the fixed order breakfast, lunch, dinner, snack. After
//! slot `k` the running totals are scored against the day target scaled by
//! the cumulative energy share of slots `0..=k`, so the snack is scored
//! against the full-day target.
//!
//! Each slot explores at most `backtrack_breadth` options depth-first in
//! score order. The first complete day inside every band wins; if none is,
//! the complete day with the lowest full-day score is returned.

use crate::config::planner::DietConfig;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};
use vitaplan_core::errors::{SolveError, SolveResult};
use vitaplan_core::models::{
    DailyDietPlan, Meal, MealAssignment, MealSlot, Nutrient, NutrientRequirements,
    NutrientVector, PreferenceWeights, TargetBand, VarietyStatus,
};

/// Diet optimizer bound to a configuration and a user's preferences
#[derive(Debug, Clone, Copy)]
pub struct DietOptimizer<'a> {
    config: &'a DietConfig,
    preferences: &'a PreferenceWeights,
}

/// Scored option for one slot
#[derive(Debug, Clone)]
struct SlotOption {
    meal_index: usize,
    portion: f64,
    score: f64,
}

/// Partially filled day carried through the search
#[derive(Debug, Clone)]
struct PartialDay {
    picks: Vec<(usize, f64)>,
    totals: NutrientVector,
    applied_window: u32,
    intra_day_repeats: bool,
}

/// Best complete day found so far
#[derive(Debug, Clone)]
struct CompleteDay {
    day: PartialDay,
    score: f64,
    in_tolerance: bool,
}

impl<'a> DietOptimizer<'a> {
    /// Create an optimizer
    #[must_use]
    pub const fn new(config: &'a DietConfig, preferences: &'a PreferenceWeights) -> Self {
        Self {
            config,
            preferences,
        }
    }

    /// Select meals for one day
    ///
    /// `prior_days` holds earlier days, most recent last; meals used in the
    /// last `variety_window_days` of them are avoided until relaxation.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the diet configuration is invalid, or
    /// `NoFeasibleMeal` if no candidate may fill a slot at all
    pub fn solve_diet<'m, I>(
        &self,
        requirements: &NutrientRequirements,
        candidates: I,
        prior_days: &[DailyDietPlan],
    ) -> SolveResult<DailyDietPlan>
    where
        I: Iterator<Item = &'m Meal> + Clone,
    {
        self.config.validate()?;
        let meals: Vec<&Meal> = candidates.collect();

        for slot in MealSlot::ALL {
            if !meals.iter().any(|meal| meal.fits_slot(slot)) {
                return Err(SolveError::NoFeasibleMeal { slot });
            }
        }

        let recent: Vec<BTreeSet<&str>> = prior_days
            .iter()
            .rev()
            .map(|day| day.item_ids().collect())
            .collect();

        let search = DaySearch {
            optimizer: self,
            meals: &meals,
            targets: &requirements.targets,
            recent: &recent,
        };
        let start = PartialDay {
            picks: Vec::with_capacity(MealSlot::ALL.len()),
            totals: NutrientVector::new(),
            applied_window: self.config.variety_window_days,
            intra_day_repeats: false,
        };

        let mut best = None;
        search.explore(start, &mut best);

        let Some(best) = best else {
            return Err(SolveError::Config(
                "Diet search explored no complete day".to_owned(),
            ));
        };

        Ok(self.build_plan(&meals, requirements, best))
    }

    /// Build a multi-day menu
    ///
    /// Each day sees the previously produced days as its prior days.
    ///
    /// # Errors
    ///
    /// Returns `Config` for an invalid configuration, or `NoFeasibleMeal` if
    /// any day cannot be filled
    pub fn solve_diet_days<'m, I>(
        &self,
        requirements: &NutrientRequirements,
        candidates: I,
        days: usize,
    ) -> SolveResult<Vec<DailyDietPlan>>
    where
        I: Iterator<Item = &'m Meal> + Clone,
    {
        let mut plans: Vec<DailyDietPlan> = Vec::with_capacity(days);
        for day in 0..days {
            let plan = self.solve_diet(requirements, candidates.clone(), &plans)?;
            debug!(day, meals = ?plan.item_ids().collect::<Vec<_>>(), "Planned menu day");
            plans.push(plan);
        }
        Ok(plans)
    }

    /// Preference in `[-1.0, 1.0]` for a meal: mean of matching cuisine and taste weights
    fn preference(&self, meal: &Meal) -> f64 {
        let cuisine = meal
            .cuisine
            .as_ref()
            .and_then(|c| self.preferences.cuisines.get(c))
            .copied();
        let tastes = meal
            .tags
            .iter()
            .filter_map(|tag| self.preferences.tastes.get(tag).copied());

        let matched: Vec<f64> = cuisine.into_iter().chain(tastes).collect();
        if matched.is_empty() {
            return 0.0;
        }
        (matched.iter().sum::<f64>() / matched.len() as f64).clamp(-1.0, 1.0)
    }

    fn build_plan(
        &self,
        meals: &[&Meal],
        requirements: &NutrientRequirements,
        best: CompleteDay,
    ) -> DailyDietPlan {
        let assignments: Vec<MealAssignment> = MealSlot::ALL
            .iter()
            .zip(&best.day.picks)
            .filter_map(|(slot, (meal_index, portion))| {
                meals.get(*meal_index).map(|meal| MealAssignment {
                    slot: *slot,
                    item_id: meal.id.clone(),
                    portion_scale: *portion,
                })
            })
            .collect();

        let deviations: BTreeMap<Nutrient, f64> = requirements
            .targets
            .iter()
            .map(|(nutrient, band)| (*nutrient, best.day.totals.get(*nutrient) - band.target))
            .collect();

        let variety = VarietyStatus {
            requested_window: self.config.variety_window_days,
            applied_window: best.day.applied_window,
            intra_day_repeats: best.day.intra_day_repeats,
        };
        if variety.is_relaxed() {
            warn!(
                requested_window = variety.requested_window,
                applied_window = variety.applied_window,
                intra_day_repeats = variety.intra_day_repeats,
                "Variety constraints relaxed to fill the day"
            );
        }

        debug!(
            in_tolerance = best.in_tolerance,
            score = best.score,
            calories = best.day.totals.get(Nutrient::Calories),
            "Selected daily diet plan"
        );

        DailyDietPlan {
            assignments,
            totals: best.day.totals,
            deviations,
            variety,
            relaxed: false,
        }
    }
}

/// Weighted sum of squared normalized deviations of `totals` from `targets`
fn deviation_score<'t>(
    totals: &NutrientVector,
    targets: impl Iterator<Item = (&'t Nutrient, TargetBand)>,
    config: &DietConfig,
) -> f64 {
    targets
        .map(|(nutrient, band)| {
            let deviation = band.normalized_deviation(totals.get(*nutrient));
            config.nutrient_weights.weight(*nutrient) * deviation * deviation
        })
        .sum()
}

/// Depth-first search over slot options for a single day
struct DaySearch<'s, 'm> {
    optimizer: &'s DietOptimizer<'s>,
    meals: &'s [&'m Meal],
    targets: &'s BTreeMap<Nutrient, TargetBand>,
    recent: &'s [BTreeSet<&'s str>],
}

impl DaySearch<'_, '_> {
    /// Explore completions of `day`; returns true once an in-tolerance day is found
    fn explore(&self, day: PartialDay, best: &mut Option<CompleteDay>) -> bool {
        let Some(slot) = MealSlot::ALL.get(day.picks.len()).copied() else {
            return self.record_complete(day, best);
        };

        let (options, applied_window, intra_day_repeats) = self.relaxed_options(slot, &day);

        for option in options
            .into_iter()
            .take(self.optimizer.config.backtrack_breadth)
        {
            let Some(meal) = self.meals.get(option.meal_index) else {
                continue;
            };
            debug!(
                slot = %slot,
                meal = %meal.id,
                portion = option.portion,
                score = option.score,
                "Trying slot option"
            );

            let mut next = day.clone();
            next.totals.accumulate(&meal.nutrients, option.portion);
            next.picks.push((option.meal_index, option.portion));
            next.applied_window = next.applied_window.min(applied_window);
            next.intra_day_repeats |= intra_day_repeats;

            if self.explore(next, best) {
                return true;
            }
        }
        false
    }

    /// Options for `slot`, shrinking the variety window until some exist
    ///
    /// Returns the options, the window that produced them and whether
    /// intra-day repeats had to be allowed.
    fn relaxed_options(&self, slot: MealSlot, day: &PartialDay) -> (Vec<SlotOption>, u32, bool) {
        let requested = self.optimizer.config.variety_window_days;
        for window in (0..=requested).rev() {
            let options = self.slot_options(slot, day, window, false);
            if !options.is_empty() {
                if window < requested {
                    debug!(slot = %slot, window, "Variety window relaxed");
                }
                return (options, window, false);
            }
        }
        debug!(slot = %slot, "Allowing intra-day repeats");
        (self.slot_options(slot, day, 0, true), 0, true)
    }

    /// Scored and sorted options for `slot`
    fn slot_options(
        &self,
        slot: MealSlot,
        day: &PartialDay,
        window: u32,
        allow_repeats: bool,
    ) -> Vec<SlotOption> {
        let config = self.optimizer.config;
        let share = config.slot_shares.cumulative_share(slot);
        let used_today: BTreeSet<usize> = day.picks.iter().map(|(index, _)| *index).collect();
        let recent: BTreeSet<&str> = self
            .recent
            .iter()
            .take(window as usize)
            .flatten()
            .copied()
            .collect();

        let mut options = Vec::new();
        for (meal_index, meal) in self.meals.iter().enumerate() {
            if !meal.fits_slot(slot)
                || (!allow_repeats && used_today.contains(&meal_index))
                || recent.contains(meal.id.as_str())
            {
                continue;
            }

            let preference_factor =
                config.preference_influence.mul_add(-self.optimizer.preference(meal), 1.0);

            for portion in &config.portion_steps {
                let totals = day.totals.plus_scaled(&meal.nutrients, *portion);
                let running = self
                    .targets
                    .iter()
                    .map(|(nutrient, band)| (nutrient, band.scaled(share)));
                let score = deviation_score(&totals, running, config) * preference_factor;
                options.push(SlotOption {
                    meal_index,
                    portion: *portion,
                    score,
                });
            }
        }

        options.sort_by(compare_options);
        options
    }

    fn record_complete(&self, day: PartialDay, best: &mut Option<CompleteDay>) -> bool {
        let in_tolerance = self
            .targets
            .iter()
            .all(|(nutrient, band)| band.contains(day.totals.get(*nutrient)));
        let score = deviation_score(
            &day.totals,
            self.targets.iter().map(|(nutrient, band)| (nutrient, *band)),
            self.optimizer.config,
        );

        let improves = best
            .as_ref()
            .is_none_or(|current| in_tolerance || score < current.score);
        if improves {
            *best = Some(CompleteDay {
                day,
                score,
                in_tolerance,
            });
        }
        in_tolerance
    }
}

/// Lower score first, then declaration order, then portion closest to 1.0
fn compare_options(a: &SlotOption, b: &SlotOption) -> Ordering {
    a.score
        .total_cmp(&b.score)
        .then(a.meal_index.cmp(&b.meal_index))
        .then((a.portion - 1.0).abs().total_cmp(&(b.portion - 1.0).abs()))
}
