// ABOUTME: Core types for the Vitaplan personalized plan solver
// ABOUTME: Foundation crate with error handling and the domain models exchanged with collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Vitaplan Core
//!
//! Foundation crate providing the shared types of the plan solver. This crate is
//! designed to change infrequently, enabling incremental compilation benefits in
//! the workspace.
//!
//! ## Modules
//!
//! - **errors**: `SolveError` taxonomy and stable `ErrorCode` values
//! - **models**: health profile, nutrient and activity targets, catalog items,
//!   plans and validation results
//!
//! All quantities use a single canonical unit system: kilograms, centimetres,
//! years, kilocalories, grams for macronutrients and fiber, milligrams for
//! minerals and vitamins, and minutes for activity.

/// Solver error taxonomy with stable error codes
pub mod errors;

/// Domain models (profile, requirements, catalog items, plans)
pub mod models;

pub use errors::{ErrorCode, ErrorReport, SolveError, SolveResult};
