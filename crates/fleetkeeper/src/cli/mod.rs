//! Command-line interface for fleetkeeper.
//!
//! This module provides the CLI structure for the `fleetctl` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, DueCommand, EfficiencyCommand, HistoryCommand, InsuranceCommand,
    SearchCommand, StatsCommand,
};

/// fleetctl - Inspect a vehicle fleet
///
/// Loads a fleet manifest into memory and reports on mileage, maintenance,
/// insurance and fuel efficiency.
#[derive(Debug, Parser)]
#[command(name = "fleetctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fleet manifest to load (JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every vehicle with its mileage
    Details,

    /// Show maintenance history for vehicles of a model
    History(HistoryCommand),

    /// List vehicles due for maintenance
    Due(DueCommand),

    /// Search vehicles by make, model or year
    Search(SearchCommand),

    /// Compute fuel efficiency from mileage and fuel figures
    Efficiency(EfficiencyCommand),

    /// Show insurance details for every vehicle
    Insurance(InsuranceCommand),

    /// Show fleet summary statistics
    Stats(StatsCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Command {
    /// Check if this command needs a loaded fleet.
    #[must_use]
    pub fn needs_fleet(&self) -> bool {
        !matches!(self, Self::Efficiency(_) | Self::Config(_))
    }
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }

    /// Manifest to load: the `--manifest` flag, else the configured path.
    #[must_use]
    pub fn manifest_path(&self, config: &crate::Config) -> Option<PathBuf> {
        self.manifest
            .clone()
            .or_else(|| config.manifest.path.clone())
    }
}
