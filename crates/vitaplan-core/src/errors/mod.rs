// ABOUTME: Error taxonomy for plan solving with stable, serializable error codes
// ABOUTME: Covers invalid profiles, infeasible slots and categories, restriction leaks and deadlines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Solver Error Handling
//!
//! Every fatal outcome of a solve is a [`SolveError`]. Each variant maps to a
//! stable [`ErrorCode`] so collaborators can branch on the failure class without
//! parsing messages. Non-fatal outcomes (capped exercise allocation, relaxed
//! tolerances) are carried as data on the returned plan instead.

use crate::models::{ActivityCategory, MealSlot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used by the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Profile is missing a required field or has an out-of-range value
    #[serde(rename = "INVALID_PROFILE")]
    InvalidProfile = 3000,
    /// Catalog is malformed (duplicate identifiers, invalid values)
    #[serde(rename = "INVALID_CATALOG")]
    InvalidCatalog = 3001,

    // Feasibility (4000-4999)
    /// No meal can fill a slot even after variety relaxation
    #[serde(rename = "NO_FEASIBLE_MEAL")]
    NoFeasibleMeal = 4000,
    /// No activity exists for a category with a nonzero target
    #[serde(rename = "NO_FEASIBLE_ACTIVITY")]
    NoFeasibleActivity = 4001,
    /// A hard dietary or medical restriction would be violated
    #[serde(rename = "RESTRICTION_VIOLATION")]
    RestrictionViolation = 4100,

    // Scheduling (5000-5999)
    /// Caller-imposed deadline elapsed between core invocations
    #[serde(rename = "DEADLINE_EXCEEDED")]
    DeadlineExceeded = 5000,

    // Configuration (6000-6999)
    /// Solver configuration is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidProfile => "The health profile is missing data or has invalid values",
            Self::InvalidCatalog => "The catalog is malformed",
            Self::NoFeasibleMeal => "No meal in the catalog can fill a required slot",
            Self::NoFeasibleActivity => "No activity in the catalog covers a required category",
            Self::RestrictionViolation => "A hard dietary or medical restriction would be violated",
            Self::DeadlineExceeded => "The solve deadline elapsed before the plan was complete",
            Self::ConfigInvalid => "The solver configuration is invalid",
        }
    }
}

/// Fatal solve failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// Malformed or missing biometric input
    #[error("invalid profile field `{field}`: {reason}")]
    InvalidProfile {
        /// Name of the offending profile field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Catalog cannot be used as given
    #[error("invalid catalog: {reason}")]
    InvalidCatalog {
        /// Description of the defect
        reason: String,
    },

    /// A meal slot cannot be filled even after variety relaxation
    #[error("no feasible meal for slot {slot}")]
    NoFeasibleMeal {
        /// Slot that stayed empty
        slot: MealSlot,
    },

    /// A category with a nonzero target has no eligible activity
    #[error("no feasible activity for category {category}")]
    NoFeasibleActivity {
        /// Category that could not be covered
        category: ActivityCategory,
    },

    /// A chosen item violates a hard restriction
    #[error("item `{item_id}` violates restrictions {tags:?}")]
    RestrictionViolation {
        /// Identifier of the offending catalog item
        item_id: String,
        /// Restriction tags that were hit
        tags: Vec<String>,
    },

    /// The caller's deadline elapsed between core invocations
    #[error("deadline exceeded before {stage}")]
    DeadlineExceeded {
        /// Stage that was about to start
        stage: &'static str,
    },

    /// Configuration could not be loaded or validated
    #[error("configuration error: {0}")]
    Config(String),
}

impl SolveError {
    /// Build an `InvalidProfile` error
    pub fn invalid_profile(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            field,
            reason: reason.into(),
        }
    }

    /// Build an `InvalidCatalog` error
    pub fn invalid_catalog(reason: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            reason: reason.into(),
        }
    }

    /// Stable error code for this failure
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidProfile { .. } => ErrorCode::InvalidProfile,
            Self::InvalidCatalog { .. } => ErrorCode::InvalidCatalog,
            Self::NoFeasibleMeal { .. } => ErrorCode::NoFeasibleMeal,
            Self::NoFeasibleActivity { .. } => ErrorCode::NoFeasibleActivity,
            Self::RestrictionViolation { .. } => ErrorCode::RestrictionViolation,
            Self::DeadlineExceeded { .. } => ErrorCode::DeadlineExceeded,
            Self::Config(_) => ErrorCode::ConfigInvalid,
        }
    }
}

/// Result type alias for solver operations
pub type SolveResult<T> = Result<T, SolveError>;

/// Serializable error report handed to collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Stable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Structured details identifying the failing slot, category or item
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl From<&SolveError> for ErrorReport {
    fn from(error: &SolveError) -> Self {
        let details = match error {
            SolveError::InvalidProfile { field, .. } => serde_json::json!({ "field": field }),
            SolveError::NoFeasibleMeal { slot } => serde_json::json!({ "slot": slot }),
            SolveError::NoFeasibleActivity { category } => {
                serde_json::json!({ "category": category })
            }
            SolveError::RestrictionViolation { item_id, tags } => {
                serde_json::json!({ "item_id": item_id, "tags": tags })
            }
            SolveError::DeadlineExceeded { stage } => serde_json::json!({ "stage": stage }),
            SolveError::InvalidCatalog { .. } | SolveError::Config(_) => serde_json::Value::Null,
        };

        Self {
            code: error.code(),
            message: error.to_string(),
            details,
        }
    }
}
