// ABOUTME: Relaxation configuration for the plan validator
// ABOUTME: Tolerance widening step and the bound on re-solve attempts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Relaxation Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaxationConfig {
    /// Fraction added to the missed side of a band per retry: 0.05
    pub tolerance_step: f64,
    /// Re-solve attempts after the first plan: 3
    pub max_retries: u32,
}

impl RelaxationConfig {
    /// Validate relaxation configuration
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the step is not in (0.0, 1.0] or retries exceed 10
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tolerance_step <= 0.0 || self.tolerance_step > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Tolerance step must be in (0.0, 1.0]",
            ));
        }
        if self.max_retries > 10 {
            return Err(ConfigError::ValueOutOfRange(
                "Max retries must not exceed 10",
            ));
        }
        Ok(())
    }
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            tolerance_step: 0.05,
            max_retries: 3,
        }
    }
}
