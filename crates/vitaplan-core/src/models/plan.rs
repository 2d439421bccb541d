// ABOUTME: Plan models: daily diet plans with slot assignments and weekly exercise plans
// ABOUTME: Includes variety status, capped allocation reports and the combined solve result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::activity::ActivityCategory;
use super::nutrients::{Nutrient, NutrientVector};
use super::requirements::Requirements;
use super::validation::ValidationResult;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Meal-time position filled exactly once per day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealSlot {
    /// Slots in fill order
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    /// Stable snake-case identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One filled slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealAssignment {
    /// Slot filled
    pub slot: MealSlot,
    /// Catalog identifier of the meal
    pub item_id: String,
    /// Portion multiplier applied to the meal's nutrient vector
    pub portion_scale: f64,
}

/// How far the variety rules had to be relaxed to fill the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarietyStatus {
    /// Configured variety window (days)
    pub requested_window: u32,
    /// Smallest window actually applied to any slot
    pub applied_window: u32,
    /// Whether an item was allowed to repeat within the day
    pub intra_day_repeats: bool,
}

impl VarietyStatus {
    /// Whether any variety constraint was relaxed
    #[must_use]
    pub const fn is_relaxed(&self) -> bool {
        self.applied_window < self.requested_window || self.intra_day_repeats
    }
}

/// Meal assignments for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDietPlan {
    /// Assignments in slot order
    pub assignments: Vec<MealAssignment>,
    /// Achieved nutrient totals
    pub totals: NutrientVector,
    /// Achieved minus target per targeted nutrient
    pub deviations: BTreeMap<Nutrient, f64>,
    /// Variety relaxation applied while filling the day
    pub variety: VarietyStatus,
    /// Whether the plan was returned outside its original tolerances
    pub relaxed: bool,
}

impl DailyDietPlan {
    /// Identifiers of the meals used, in slot order
    pub fn item_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.assignments.iter().map(|a| a.item_id.as_str())
    }

    /// Assignment for a slot
    #[must_use]
    pub fn assignment(&self, slot: MealSlot) -> Option<&MealAssignment> {
        self.assignments.iter().find(|a| a.slot == slot)
    }

    /// Copy of the plan carrying the relaxed flag
    #[must_use]
    pub fn with_relaxed(mut self, relaxed: bool) -> Self {
        self.relaxed = relaxed;
        self
    }
}

/// Period of the day for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// Before noon
    Morning,
    /// Around noon
    Midday,
    /// After work
    Evening,
}

impl TimeOfDay {
    /// Periods in chronological order
    pub const ALL: [Self; 3] = [Self::Morning, Self::Midday, Self::Evening];
}

/// One scheduled activity session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSession {
    /// Catalog identifier of the activity
    pub activity_id: String,
    /// Activity category
    pub category: ActivityCategory,
    /// Duration (minutes)
    pub duration_minutes: u32,
    /// Period of the day
    pub time_of_day: TimeOfDay,
    /// Estimated energy expenditure (kcal)
    pub estimated_kcal: f64,
}

/// Sessions for one weekday, ordered by time of day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Weekday
    pub day: Weekday,
    /// Sessions ordered by time of day
    pub sessions: Vec<ExerciseSession>,
}

impl DayPlan {
    /// Total scheduled minutes
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        self.sessions.iter().map(|s| s.duration_minutes).sum()
    }
}

/// Minutes the allocator could not place within the per-day cap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CappedAllocation {
    /// Unallocated minutes per category
    pub unallocated: BTreeMap<ActivityCategory, u32>,
}

impl CappedAllocation {
    /// Total unallocated minutes
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        self.unallocated.values().sum()
    }
}

/// Seven day bins of scheduled sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyExercisePlan {
    /// Monday through Sunday
    pub days: Vec<DayPlan>,
    /// Per-day duration cap used for allocation (minutes)
    pub per_day_cap_minutes: u32,
    /// Overflow report when targets did not fit under the cap
    pub capped: Option<CappedAllocation>,
    /// Whether the plan was returned outside its original tolerances
    pub relaxed: bool,
}

impl WeeklyExercisePlan {
    /// Allocated minutes per category
    #[must_use]
    pub fn minutes_by_category(&self) -> BTreeMap<ActivityCategory, u32> {
        let mut minutes = BTreeMap::new();
        for session in self.days.iter().flat_map(|d| &d.sessions) {
            *minutes.entry(session.category).or_insert(0) += session.duration_minutes;
        }
        minutes
    }

    /// Number of sessions per category
    #[must_use]
    pub fn sessions_by_category(&self) -> BTreeMap<ActivityCategory, u32> {
        let mut sessions = BTreeMap::new();
        for session in self.days.iter().flat_map(|d| &d.sessions) {
            *sessions.entry(session.category).or_insert(0) += 1;
        }
        sessions
    }

    /// Number of distinct days holding a session of `category`
    #[must_use]
    pub fn days_with(&self, category: ActivityCategory) -> usize {
        self.days
            .iter()
            .filter(|d| d.sessions.iter().any(|s| s.category == category))
            .count()
    }

    /// Identifiers of all scheduled activities
    #[must_use]
    pub fn activity_ids(&self) -> BTreeSet<&str> {
        self.days
            .iter()
            .flat_map(|d| &d.sessions)
            .map(|s| s.activity_id.as_str())
            .collect()
    }

    /// Whether the allocation overflowed the cap
    #[must_use]
    pub const fn is_capped(&self) -> bool {
        self.capped.is_some()
    }

    /// Copy of the plan carrying the relaxed flag
    #[must_use]
    pub fn with_relaxed(mut self, relaxed: bool) -> Self {
        self.relaxed = relaxed;
        self
    }
}

/// Everything a solve returns to collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    /// Targets derived from the profile
    pub requirements: Requirements,
    /// Meals for the day
    pub diet_plan: DailyDietPlan,
    /// Activities for the week
    pub exercise_plan: WeeklyExercisePlan,
    /// Validation outcome
    pub validation: ValidationResult,
}
