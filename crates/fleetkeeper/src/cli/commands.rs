//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// History command arguments.
#[derive(Debug, Args)]
pub struct HistoryCommand {
    /// Model name (exact, case-sensitive)
    pub model: String,
}

/// Due command arguments.
#[derive(Debug, Args)]
pub struct DueCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Search command arguments.
///
/// Filters combine: a vehicle must match every filter given.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Filter by make
    #[arg(long)]
    pub make: Option<String>,

    /// Filter by model
    #[arg(long)]
    pub model: Option<String>,

    /// Earliest model year (inclusive)
    #[arg(long)]
    pub from_year: Option<i32>,

    /// Latest model year (inclusive)
    #[arg(long)]
    pub to_year: Option<i32>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Efficiency command arguments.
#[derive(Debug, Args)]
pub struct EfficiencyCommand {
    /// Odometer reading at the start
    #[arg(long)]
    pub start: u64,

    /// Odometer reading at the end
    #[arg(long)]
    pub end: u64,

    /// Fuel consumed between the two readings
    #[arg(long)]
    pub fuel: f64,
}

/// Insurance command arguments.
#[derive(Debug, Args)]
pub struct InsuranceCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

impl SearchCommand {
    /// Check if a vehicle passes every filter in this search.
    #[must_use]
    pub fn matches(&self, vehicle: &crate::Vehicle) -> bool {
        self.make.as_deref().map_or(true, |m| vehicle.make() == m)
            && self.model.as_deref().map_or(true, |m| vehicle.model() == m)
            && self.from_year.map_or(true, |y| vehicle.year() >= y)
            && self.to_year.map_or(true, |y| vehicle.year() <= y)
    }
}
