// ABOUTME: Planner entry points orchestrating requirements, both solver cores and relaxation
// ABOUTME: Runs diet and exercise cores as independent rayon tasks with optional deadline checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Planner
//!
//! `profile -> requirements -> {diet core, exercise core} -> validator/relaxer -> PlanResult`
//!
//! The two cores share nothing but read-only inputs, so they run through
//! `rayon::join` when `parallel_cores` is enabled. Results are identical in
//! either mode. A deadline, when given, is checked only between core
//! invocations and relaxation retries.

use crate::catalog::{Catalog, CatalogFilter};
use crate::config::{ConfigError, PlannerConfig};
use crate::intelligence::{
    compute_requirements, find_misses, widen_requirements, DietOptimizer, ExerciseAllocator, Miss,
    PlanValidator,
};
use crate::logging::SolverLogger;
use std::time::Instant;
use tracing::{info, info_span};
use vitaplan_core::errors::{SolveError, SolveResult};
use vitaplan_core::models::{
    DailyDietPlan, HealthProfile, PlanResult, Requirements, TargetKey, WeeklyExercisePlan,
};

/// Solve with the global configuration
///
/// # Errors
///
/// Returns a `SolveError` for invalid profiles, infeasible slots or
/// categories, and restriction violations
pub fn solve(profile: &HealthProfile, catalog: &Catalog) -> SolveResult<PlanResult> {
    Planner::new(PlannerConfig::global().clone())?.solve(profile, catalog)
}

/// Derive requirements with the global configuration
///
/// # Errors
///
/// Returns `InvalidProfile` if a biometric field is missing or out of range
pub fn recompute_requirements(profile: &HealthProfile) -> SolveResult<Requirements> {
    compute_requirements(profile, &PlannerConfig::global().requirements)
}

fn check_deadline(deadline: Option<Instant>, stage: &'static str) -> SolveResult<()> {
    if deadline.is_some_and(|d| Instant::now() >= d) {
        return Err(SolveError::DeadlineExceeded { stage });
    }
    Ok(())
}

fn join_cores<A, B, RA, RB>(parallel: bool, diet: A, exercise: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    if parallel {
        rayon::join(diet, exercise)
    } else {
        (diet(), exercise())
    }
}

fn nutrient_misses(misses: &[Miss]) -> usize {
    misses.iter().filter(|m| m.is_nutrient()).count()
}

/// Plan solver holding its configuration
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

/// Read-only inputs shared by every core invocation of one solve
struct SolveInputs<'a> {
    profile: &'a HealthProfile,
    catalog: &'a Catalog,
    filter: CatalogFilter,
}

impl Planner {
    /// Create a planner with an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` the configuration fails validation with
    pub fn new(config: PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Derive requirements without solving
    ///
    /// # Errors
    ///
    /// Returns `InvalidProfile` if a biometric field is missing or out of range
    pub fn recompute_requirements(&self, profile: &HealthProfile) -> SolveResult<Requirements> {
        compute_requirements(profile, &self.config.requirements)
    }

    /// Solve a full plan
    ///
    /// # Errors
    ///
    /// Returns a `SolveError` for invalid profiles, infeasible slots or
    /// categories, and restriction violations
    pub fn solve(&self, profile: &HealthProfile, catalog: &Catalog) -> SolveResult<PlanResult> {
        self.run(profile, catalog, None)
    }

    /// Solve a full plan, giving up between stages once `deadline` has passed
    ///
    /// # Errors
    ///
    /// Returns `DeadlineExceeded` naming the stage that was about to start, or
    /// any error `solve` returns
    pub fn solve_with_deadline(
        &self,
        profile: &HealthProfile,
        catalog: &Catalog,
        deadline: Instant,
    ) -> SolveResult<PlanResult> {
        self.run(profile, catalog, Some(deadline))
    }

    /// Build a multi-day menu honouring the variety window across days
    ///
    /// # Errors
    ///
    /// Returns `InvalidProfile`, `NoFeasibleMeal` or `RestrictionViolation`
    pub fn solve_diet_days(
        &self,
        profile: &HealthProfile,
        catalog: &Catalog,
        days: usize,
    ) -> SolveResult<Vec<DailyDietPlan>> {
        let requirements = self.recompute_requirements(profile)?;
        let filter = CatalogFilter::from_profile(profile);
        let optimizer = DietOptimizer::new(&self.config.diet, &profile.preferences);
        let plans =
            optimizer.solve_diet_days(&requirements.nutrients, catalog.meals(&filter), days)?;

        let validator = PlanValidator::new(catalog, &profile.restrictions);
        if let Some(leak) = plans.iter().find_map(|plan| validator.diet_leak(plan)) {
            SolverLogger::log_restriction_violation(&leak.item_id, &leak.tags);
            return Err(leak.into());
        }
        Ok(plans)
    }

    fn run(
        &self,
        profile: &HealthProfile,
        catalog: &Catalog,
        deadline: Option<Instant>,
    ) -> SolveResult<PlanResult> {
        let span = info_span!("solve", catalog_items = catalog.len());
        let _guard = span.enter();
        let started = Instant::now();

        check_deadline(deadline, "requirements")?;
        let requirements = self.recompute_requirements(profile)?;

        let inputs = SolveInputs {
            profile,
            catalog,
            filter: CatalogFilter::from_profile(profile),
        };
        let validator = PlanValidator::new(catalog, &profile.restrictions);

        check_deadline(deadline, "cores")?;
        let (diet, exercise) = join_cores(
            self.config.parallel_cores,
            || self.diet_core(&inputs, &requirements),
            || self.exercise_core(&inputs, &requirements),
        );
        let mut diet = diet?;
        let exercise = exercise?;
        Self::ensure_safe(&validator, &diet, &exercise)?;

        let mut applied = requirements.clone();
        let mut misses = find_misses(&diet, &exercise, &applied);
        let mut attempts = 0;

        while !misses.is_empty() && attempts < self.config.relaxation.max_retries {
            check_deadline(deadline, "relaxation")?;
            attempts += 1;

            // Allocation ignores tolerance widths, so widened activity bands are only re-checked
            let resolve_diet = misses.iter().any(Miss::is_nutrient);
            SolverLogger::log_relaxation(
                attempts,
                misses.len(),
                if resolve_diet { "diet" } else { "recheck" },
            );

            applied = widen_requirements(&applied, &misses, self.config.relaxation.tolerance_step);

            if resolve_diet {
                let candidate = self.diet_core(&inputs, &applied)?;
                Self::ensure_safe(&validator, &candidate, &exercise)?;
                // Kept unless it misses more original nutrient bands than the plan it replaces
                let current = find_misses(&diet, &exercise, &requirements);
                let replacement = find_misses(&candidate, &exercise, &requirements);
                if nutrient_misses(&replacement) <= nutrient_misses(&current) {
                    diet = candidate;
                }
            }

            misses = find_misses(&diet, &exercise, &applied);
        }

        Self::ensure_safe(&validator, &diet, &exercise)?;
        let validation = validator.validate_relaxed(&diet, &exercise, &requirements, &applied);

        let adjustments = validation.adjustments();
        let diet_relaxed = adjustments
            .iter()
            .any(|a| matches!(a.key, TargetKey::Nutrient(_)));
        let exercise_relaxed = adjustments
            .iter()
            .any(|a| !matches!(a.key, TargetKey::Nutrient(_)));

        SolverLogger::log_solve_completed(
            if validation.is_ok() { "ok" } else { "relaxed" },
            adjustments.len(),
            attempts,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        info!(
            meals = diet.assignments.len(),
            sessions = exercise.days.iter().map(|d| d.sessions.len()).sum::<usize>(),
            capped = exercise.is_capped(),
            "Plan ready"
        );

        Ok(PlanResult {
            requirements,
            diet_plan: diet.with_relaxed(diet_relaxed),
            exercise_plan: exercise.with_relaxed(exercise_relaxed),
            validation,
        })
    }

    fn diet_core(
        &self,
        inputs: &SolveInputs<'_>,
        requirements: &Requirements,
    ) -> SolveResult<DailyDietPlan> {
        DietOptimizer::new(&self.config.diet, &inputs.profile.preferences).solve_diet(
            &requirements.nutrients,
            inputs.catalog.meals(&inputs.filter),
            &[],
        )
    }

    fn exercise_core(
        &self,
        inputs: &SolveInputs<'_>,
        requirements: &Requirements,
    ) -> SolveResult<WeeklyExercisePlan> {
        ExerciseAllocator::new(&self.config.exercise).solve_week(
            &requirements.activity,
            inputs.catalog.activities(&inputs.filter),
            &inputs.profile.focus_areas,
        )
    }

    fn ensure_safe(
        validator: &PlanValidator<'_>,
        diet: &DailyDietPlan,
        exercise: &WeeklyExercisePlan,
    ) -> SolveResult<()> {
        match validator.restriction_leak(diet, exercise) {
            Some(leak) => {
                SolverLogger::log_restriction_violation(&leak.item_id, &leak.tags);
                Err(leak.into())
            }
            None => Ok(()),
        }
    }
}
