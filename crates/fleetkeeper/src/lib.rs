//! `fleetkeeper` - In-memory records for a small vehicle fleet
//!
//! This library tracks each vehicle's identity, mileage, maintenance history
//! and insurance, and answers fleet-wide questions: searches, which vehicles
//! are due for service, and fuel efficiency.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod fleet;
pub mod logging;
pub mod manifest;
pub mod vehicle;

pub use config::Config;
pub use error::{Error, Result};
pub use fleet::{FleetManager, FleetStats, MaintenancePolicy, Report};
pub use logging::init_logging;
pub use manifest::FleetManifest;
pub use vehicle::{Insurance, MaintenanceRecord, Vehicle, VehicleId};
