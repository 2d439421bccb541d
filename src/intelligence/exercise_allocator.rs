// ABOUTME: Exercise allocation core distributing weekly activity minutes over seven day bins
// ABOUTME: Chunks category targets into sessions, balances day load and rotates activity choice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Exercise Allocation Core
//!
//! Categories are allocated in declaration order. Each category's weekly
//! minutes are split into near-equal chunks, one per session, and each chunk
//! lands on the least-loaded day with room, preferring days without a
//! session of the same category. Minutes that cannot be placed under the
//! per-day cap are reported, never dropped.

use crate::config::planner::ExerciseConfig;
use chrono::Weekday;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};
use vitaplan_core::errors::{SolveError, SolveResult};
use vitaplan_core::models::{
    Activity, ActivityCategory, ActivityRequirements, CappedAllocation, DayPlan, ExerciseSession,
    TimeOfDay, WeeklyExercisePlan,
};

/// Weekdays in bin order
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Preferred period of the day for a category
#[must_use]
pub const fn preferred_time_of_day(category: ActivityCategory) -> TimeOfDay {
    match category {
        ActivityCategory::Cardio | ActivityCategory::MindBody | ActivityCategory::Breathing => {
            TimeOfDay::Morning
        }
        ActivityCategory::Strength | ActivityCategory::Flexibility => TimeOfDay::Evening,
        ActivityCategory::Functional | ActivityCategory::Dance | ActivityCategory::MartialArts => {
            TimeOfDay::Midday
        }
    }
}

/// Split `minutes` into `count` chunks differing by at most one minute
#[must_use]
pub fn split_evenly(minutes: u32, count: u32) -> Vec<u32> {
    if count == 0 {
        return Vec::new();
    }
    let base = minutes / count;
    let remainder = minutes % count;
    (0..count)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// One day's accumulated sessions
#[derive(Debug, Default)]
struct DayBin {
    load: u32,
    sessions: Vec<ExerciseSession>,
}

impl DayBin {
    fn has_category(&self, category: ActivityCategory) -> bool {
        self.sessions.iter().any(|s| s.category == category)
    }

    fn has_period(&self, period: TimeOfDay) -> bool {
        self.sessions.iter().any(|s| s.time_of_day == period)
    }

    /// Preferred period, or the next free one after it
    fn free_period(&self, preferred: TimeOfDay) -> TimeOfDay {
        let start = TimeOfDay::ALL
            .iter()
            .position(|p| *p == preferred)
            .unwrap_or(0);
        (0..TimeOfDay::ALL.len())
            .map(|offset| TimeOfDay::ALL[(start + offset) % TimeOfDay::ALL.len()])
            .find(|period| !self.has_period(*period))
            .unwrap_or(preferred)
    }
}

/// Exercise allocator bound to a configuration
#[derive(Debug, Clone, Copy)]
pub struct ExerciseAllocator<'a> {
    config: &'a ExerciseConfig,
}

impl<'a> ExerciseAllocator<'a> {
    /// Create an allocator
    #[must_use]
    pub const fn new(config: &'a ExerciseConfig) -> Self {
        Self { config }
    }

    /// Allocate the week's activity targets
    ///
    /// # Errors
    ///
    /// Returns `Config` if the exercise configuration is invalid, or
    /// `NoFeasibleActivity` if a category with a nonzero target has no
    /// eligible activity
    pub fn solve_week<'m, I>(
        &self,
        requirements: &ActivityRequirements,
        candidates: I,
        focus_areas: &BTreeSet<String>,
    ) -> SolveResult<WeeklyExercisePlan>
    where
        I: Iterator<Item = &'m Activity> + Clone,
    {
        self.config.validate()?;
        let cap = self.config.per_day_cap_minutes;
        let mut bins: Vec<DayBin> = WEEK.iter().map(|_| DayBin::default()).collect();
        let mut usage: BTreeMap<&str, u32> = BTreeMap::new();
        let mut unallocated: BTreeMap<ActivityCategory, u32> = BTreeMap::new();

        for category in requirements.active_categories() {
            let pool: Vec<&Activity> = candidates
                .clone()
                .filter(|activity| activity.category == category)
                .collect();
            if pool.is_empty() {
                return Err(SolveError::NoFeasibleActivity { category });
            }

            let minutes = requirements.weekly_minutes(category);
            let min_sessions = requirements
                .target(category)
                .and_then(|target| target.min_sessions)
                .unwrap_or(0);
            let session_length = self.config.session_minutes.minutes(category);
            let count = minutes.div_ceil(session_length.max(1)).max(min_sessions);

            debug!(
                category = %category,
                minutes,
                sessions = count,
                "Allocating category"
            );

            for chunk in split_evenly(minutes, count) {
                let mut remaining = chunk;
                while remaining > 0 {
                    let Some((day_index, piece)) = self.pick_day(&bins, category, remaining, cap)
                    else {
                        *unallocated.entry(category).or_insert(0) += remaining;
                        break;
                    };
                    let activity = self.pick_activity(&pool, &usage, focus_areas);
                    *usage.entry(activity.id.as_str()).or_insert(0) += 1;

                    let bin = &mut bins[day_index];
                    let time_of_day = bin.free_period(preferred_time_of_day(category));
                    bin.load += piece;
                    bin.sessions.push(ExerciseSession {
                        activity_id: activity.id.clone(),
                        category,
                        duration_minutes: piece,
                        time_of_day,
                        estimated_kcal: activity.kcal_per_minute(requirements.body_weight_kg)
                            * f64::from(piece),
                    });
                    debug!(
                        day = %WEEK[day_index],
                        activity = %activity.id,
                        minutes = piece,
                        "Placed session"
                    );
                    remaining -= piece;
                }
            }
        }

        let capped = if unallocated.is_empty() {
            None
        } else {
            let report = CappedAllocation { unallocated };
            warn!(
                unallocated_minutes = report.total_minutes(),
                per_day_cap = cap,
                "Activity targets exceed weekly capacity"
            );
            Some(report)
        };

        let days = WEEK
            .iter()
            .zip(bins)
            .map(|(day, mut bin)| {
                bin.sessions.sort_by_key(|s| s.time_of_day);
                DayPlan {
                    day: *day,
                    sessions: bin.sessions,
                }
            })
            .collect();

        Ok(WeeklyExercisePlan {
            days,
            per_day_cap_minutes: cap,
            capped,
            relaxed: false,
        })
    }

    /// Day for the next piece of a chunk and the minutes placed there
    ///
    /// A day that fits the whole remainder is preferred; otherwise the
    /// remainder is split and the largest piece that fits goes to the
    /// best day with at least `min_session_minutes` (and never zero) of room.
    fn pick_day(
        &self,
        bins: &[DayBin],
        category: ActivityCategory,
        remaining: u32,
        cap: u32,
    ) -> Option<(usize, u32)> {
        let best_with_room = |needed: u32| {
            bins.iter()
                .enumerate()
                .filter(|(_, bin)| cap.saturating_sub(bin.load) >= needed)
                .min_by_key(|(index, bin)| (bin.has_category(category), bin.load, *index))
                .map(|(index, bin)| (index, cap.saturating_sub(bin.load)))
        };

        if let Some((index, _)) = best_with_room(remaining) {
            return Some((index, remaining));
        }

        // A zero-minute piece would never shrink the remainder
        let needed = remaining.min(self.config.min_session_minutes).max(1);
        best_with_room(needed).map(|(index, room)| (index, room.min(remaining)))
    }

    /// Highest-priority activity; ties go to declaration order
    fn pick_activity<'m>(
        &self,
        pool: &[&'m Activity],
        usage: &BTreeMap<&str, u32>,
        focus_areas: &BTreeSet<String>,
    ) -> &'m Activity {
        let priority = |activity: &Activity| {
            let used = usage.get(activity.id.as_str()).copied().unwrap_or(0);
            let boost = if activity.matches_focus(focus_areas) {
                self.config.focus_boost
            } else {
                1.0
            };
            boost / f64::from(1 + used)
        };

        let mut best = pool[0];
        let mut best_priority = priority(best);
        for activity in &pool[1..] {
            let candidate = priority(activity);
            if candidate > best_priority {
                best = activity;
                best_priority = candidate;
            }
        }
        best
    }
}
