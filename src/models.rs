// ABOUTME: Domain model re-exports from the vitaplan-core crate
// ABOUTME: Preserves crate::models import paths for the solver and its collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Profiles, nutrients, catalog items, plans and validation results. All
//! models are serde-serializable and use one canonical unit system.

pub use vitaplan_core::models::*;
