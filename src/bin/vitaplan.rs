// ABOUTME: Command-line front end for deriving requirements and solving plans from JSON files
// ABOUTME: Reads a health profile and catalog, prints requirements or a full plan as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Vitaplan CLI
//!
//! Usage:
//! ```bash
//! # Derive daily nutrient and weekly activity requirements
//! vitaplan requirements --profile data/profile.json
//!
//! # Solve a full plan
//! vitaplan solve --profile data/profile.json --catalog data/catalog.json
//!
//! # Solve a plan plus a five-day menu, compact output
//! vitaplan solve --profile data/profile.json --catalog data/catalog.json --days 5 --compact
//! ```
//!
//! Logs go to stderr and honour `RUST_LOG` and `LOG_FORMAT`. Failures from
//! the solver are printed to stdout as an error report before exiting.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{error, info};
use vitaplan::config::PlannerConfig;
use vitaplan::errors::{ErrorReport, SolveError};
use vitaplan::logging::LoggingConfig;
use vitaplan::models::{DailyDietPlan, HealthProfile, PlanResult};
use vitaplan::{Catalog, Planner};

#[derive(Parser)]
#[command(
    name = "vitaplan",
    about = "Personalized diet and exercise plan solver",
    long_about = "Derive nutrient and activity requirements from a health profile and \
                  solve a daily meal plan and weekly exercise schedule from a catalog"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Pretty-print logs instead of the configured format
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Derive requirements without solving
    Requirements {
        /// Health profile JSON file
        #[arg(long)]
        profile: PathBuf,
    },

    /// Solve a full diet and exercise plan
    Solve {
        /// Health profile JSON file
        #[arg(long)]
        profile: PathBuf,

        /// Catalog JSON file (array of meals and activities)
        #[arg(long)]
        catalog: PathBuf,

        /// Also build a menu of this many days honouring the variety window
        #[arg(long, default_value = "1")]
        days: usize,

        /// Give up between solver stages after this many milliseconds
        #[arg(long)]
        deadline_ms: Option<u64>,
    },
}

/// Plan output with the optional multi-day menu
#[derive(Serialize)]
struct SolveOutput {
    plan: PlanResult,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    menu: Vec<DailyDietPlan>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".to_owned();
    }
    if let Err(e) = logging.init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(solve_error) = e.downcast_ref::<SolveError>() {
                let report = ErrorReport::from(solve_error);
                if let Err(print_error) = print_json(&report, cli.compact) {
                    error!("Failed to print error report: {print_error}");
                }
            }
            error!("vitaplan failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = PlannerConfig::load().context("Invalid planner configuration")?;
    let planner = Planner::new(config)?;

    match &cli.command {
        Command::Requirements { profile } => {
            let profile = read_profile(profile)?;
            let requirements = planner.recompute_requirements(&profile)?;
            print_json(&requirements, cli.compact)
        }
        Command::Solve {
            profile,
            catalog,
            days,
            deadline_ms,
        } => {
            let profile = read_profile(profile)?;
            let catalog = read_catalog(catalog)?;
            info!(items = catalog.len(), "Catalog loaded");

            let plan = match deadline_ms {
                Some(ms) => planner.solve_with_deadline(
                    &profile,
                    &catalog,
                    Instant::now() + Duration::from_millis(*ms),
                )?,
                None => planner.solve(&profile, &catalog)?,
            };
            let menu = if *days > 1 {
                planner.solve_diet_days(&profile, &catalog, *days)?
            } else {
                Vec::new()
            };

            print_json(&SolveOutput { plan, menu }, cli.compact)
        }
    }
}

fn read_profile(path: &Path) -> Result<HealthProfile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Malformed profile {}", path.display()))
}

fn read_catalog(path: &Path) -> Result<Catalog> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    Ok(Catalog::from_json_str(&raw)?)
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{json}");
    Ok(())
}
