// ABOUTME: Error type re-exports from the vitaplan-core crate
// ABOUTME: Keeps crate::errors paths stable for binaries and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! See [`vitaplan_core::errors`] for the taxonomy.

pub use vitaplan_core::errors::*;
