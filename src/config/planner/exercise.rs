// ABOUTME: Exercise allocation configuration: per-day cap, focus boost and session lengths
// ABOUTME: Preferred session length per category drives how weekly minutes are chunked
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use vitaplan_core::models::ActivityCategory;

/// Exercise Allocation Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseConfig {
    /// Maximum scheduled minutes per day: 90
    pub per_day_cap_minutes: u32,
    /// Priority multiplier for activities matching a focus area: 2.0
    pub focus_boost: f64,
    /// Smallest piece a chunk is split into when it must span days: 10
    pub min_session_minutes: u32,
    /// Preferred session length per category
    pub session_minutes: SessionLengthConfig,
}

/// Preferred session length per category (minutes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLengthConfig {
    /// Cardio: 30
    pub cardio: u32,
    /// Strength: 45
    pub strength: u32,
    /// Flexibility: 20
    pub flexibility: u32,
    /// Mind-body: 30
    pub mind_body: u32,
    /// Breathing: 10
    pub breathing: u32,
    /// Functional: 30
    pub functional: u32,
    /// Dance: 45
    pub dance: u32,
    /// Martial arts: 45
    pub martial_arts: u32,
}

impl SessionLengthConfig {
    /// Preferred session length for a category
    #[must_use]
    pub const fn minutes(&self, category: ActivityCategory) -> u32 {
        match category {
            ActivityCategory::Cardio => self.cardio,
            ActivityCategory::Strength => self.strength,
            ActivityCategory::Flexibility => self.flexibility,
            ActivityCategory::MindBody => self.mind_body,
            ActivityCategory::Breathing => self.breathing,
            ActivityCategory::Functional => self.functional,
            ActivityCategory::Dance => self.dance,
            ActivityCategory::MartialArts => self.martial_arts,
        }
    }
}

impl ExerciseConfig {
    /// Validate exercise configuration
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the cap, boost or session lengths are out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_day_cap_minutes == 0 || self.per_day_cap_minutes > 24 * 60 {
            return Err(ConfigError::ValueOutOfRange(
                "Per-day cap must be between 1 and 1440 minutes",
            ));
        }
        if self.focus_boost < 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Focus boost must be at least 1.0",
            ));
        }
        if self.min_session_minutes == 0 || self.min_session_minutes > self.per_day_cap_minutes {
            return Err(ConfigError::InvalidRange(
                "Minimum session length must be between 1 and the per-day cap",
            ));
        }
        if ActivityCategory::ALL
            .iter()
            .any(|category| self.session_minutes.minutes(*category) == 0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "Session lengths must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            per_day_cap_minutes: 90,
            focus_boost: 2.0,
            min_session_minutes: 10,
            session_minutes: SessionLengthConfig::default(),
        }
    }
}

impl Default for SessionLengthConfig {
    fn default() -> Self {
        Self {
            cardio: 30,
            strength: 45,
            flexibility: 20,
            mind_body: 30,
            breathing: 10,
            functional: 30,
            dance: 45,
            martial_arts: 45,
        }
    }
}
