// ABOUTME: Activity categories and weekly activity-minute requirements
// ABOUTME: Category targets carry a tolerance band and an optional session-count minimum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::nutrients::TargetBand;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Activity category
///
/// Declaration order is the order in which the exercise allocator fills day bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    /// Aerobic endurance work
    Cardio,
    /// Resistance training
    Strength,
    /// Stretching and mobility
    Flexibility,
    /// Yoga, tai chi and similar practices
    MindBody,
    /// Breathing exercises
    Breathing,
    /// Functional and balance training
    Functional,
    /// Dance
    Dance,
    /// Martial arts
    MartialArts,
}

impl ActivityCategory {
    /// Every category in allocation order
    pub const ALL: [Self; 8] = [
        Self::Cardio,
        Self::Strength,
        Self::Flexibility,
        Self::MindBody,
        Self::Breathing,
        Self::Functional,
        Self::Dance,
        Self::MartialArts,
    ];

    /// Stable snake-case identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cardio => "cardio",
            Self::Strength => "strength",
            Self::Flexibility => "flexibility",
            Self::MindBody => "mind_body",
            Self::Breathing => "breathing",
            Self::Functional => "functional",
            Self::Dance => "dance",
            Self::MartialArts => "martial_arts",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weekly target for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryTarget {
    /// Weekly minutes and their tolerance
    pub minutes: TargetBand,
    /// Minimum number of distinct sessions per week
    pub min_sessions: Option<u32>,
}

/// Weekly activity targets per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRequirements {
    /// Body weight used for energy estimates (kg)
    pub body_weight_kg: f64,
    /// Target per category; categories absent or at zero are not allocated
    pub targets: BTreeMap<ActivityCategory, CategoryTarget>,
}

impl ActivityRequirements {
    /// Target for a category
    #[must_use]
    pub fn target(&self, category: ActivityCategory) -> Option<&CategoryTarget> {
        self.targets.get(&category)
    }

    /// Weekly minutes for a category rounded to whole minutes
    #[must_use]
    pub fn weekly_minutes(&self, category: ActivityCategory) -> u32 {
        self.targets
            .get(&category)
            .map_or(0, |target| target.minutes.target.max(0.0).round() as u32)
    }

    /// Categories with a nonzero minute target, in allocation order
    pub fn active_categories(&self) -> impl Iterator<Item = ActivityCategory> + '_ {
        ActivityCategory::ALL
            .into_iter()
            .filter(|category| self.weekly_minutes(*category) > 0)
    }

    /// Sum of all weekly minute targets
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        ActivityCategory::ALL
            .iter()
            .map(|category| self.weekly_minutes(*category))
            .sum()
    }
}
