//! Fleet management for fleetkeeper.
//!
//! This module provides the in-memory fleet: vehicle registration and
//! removal, searches, and fleet-wide maintenance, insurance and fuel reporting.

pub mod report;

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::manifest::{FleetManifest, ManifestVehicle};
use crate::vehicle::{
    Insurance, MaintenanceRecord, Vehicle, VehicleId, DEFAULT_DUE_AFTER_DAYS,
};

pub use report::{FleetStats, Report};

/// Rules applied by fleet-wide maintenance checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenancePolicy {
    /// A vehicle is due once more than this many days pass without service.
    pub due_after_days: u32,
}

impl Default for MaintenancePolicy {
    fn default() -> Self {
        Self {
            due_after_days: DEFAULT_DUE_AFTER_DAYS,
        }
    }
}

impl From<&Config> for MaintenancePolicy {
    fn from(config: &Config) -> Self {
        Self {
            due_after_days: config.maintenance.due_after_days,
        }
    }
}

/// Owner of all vehicles in a fleet.
///
/// Vehicles keep their insertion order. Each one is addressed by the
/// [`VehicleId`] returned from [`FleetManager::add_vehicle`].
#[derive(Debug, Clone, Default)]
pub struct FleetManager {
    vehicles: Vec<Vehicle>,
    next_id: u64,
    policy: MaintenancePolicy,
}

impl FleetManager {
    /// Create an empty fleet with the default maintenance policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty fleet with a custom maintenance policy.
    #[must_use]
    pub fn with_policy(policy: MaintenancePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Create an empty fleet using the maintenance settings from `config`.
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        Self::with_policy(MaintenancePolicy::from(config))
    }

    /// The maintenance policy in effect.
    #[must_use]
    pub fn policy(&self) -> MaintenancePolicy {
        self.policy
    }

    /// Register a new vehicle with an empty log and no insurance.
    pub fn add_vehicle(
        &mut self,
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        mileage: u64,
    ) -> VehicleId {
        let id = VehicleId::new(self.next_id);
        self.next_id += 1;

        let vehicle = Vehicle::new(id, make, model, year, mileage);
        info!("Added vehicle {}: {}", id, vehicle);
        self.vehicles.push(vehicle);
        id
    }

    /// Remove a vehicle from the fleet and hand it back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VehicleNotFound`] if no vehicle has this handle.
    pub fn remove_vehicle(&mut self, id: VehicleId) -> Result<Vehicle> {
        let Some(index) = self.position(id) else {
            warn!("Cannot remove vehicle {}: not in fleet", id);
            return Err(Error::vehicle_not_found(id));
        };
        let vehicle = self.vehicles.remove(index);
        info!("Removed vehicle {}: {}", id, vehicle);
        Ok(vehicle)
    }

    fn position(&self, id: VehicleId) -> Option<usize> {
        self.vehicles.iter().position(|v| v.id() == id)
    }

    /// Look up a vehicle by handle.
    #[must_use]
    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    /// Look up a vehicle by handle for mutation.
    pub fn vehicle_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|v| v.id() == id)
    }

    fn require(&self, id: VehicleId) -> Result<&Vehicle> {
        self.vehicle(id).ok_or_else(|| Error::vehicle_not_found(id))
    }

    fn require_mut(&mut self, id: VehicleId) -> Result<&mut Vehicle> {
        self.vehicle_mut(id).ok_or_else(|| Error::vehicle_not_found(id))
    }

    /// All vehicles in fleet order.
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of vehicles in the fleet.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Check if the fleet has no vehicles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Vehicles whose model matches exactly (case-sensitive).
    #[must_use]
    pub fn find_vehicle_by_model(&self, model: &str) -> Vec<&Vehicle> {
        self.vehicles.iter().filter(|v| v.model() == model).collect()
    }

    /// Vehicles whose make matches exactly (case-sensitive).
    #[must_use]
    pub fn find_vehicles_by_make(&self, make: &str) -> Vec<&Vehicle> {
        self.vehicles.iter().filter(|v| v.make() == make).collect()
    }

    /// Vehicles with `start <= year <= end`.
    #[must_use]
    pub fn find_vehicles_by_year_range(&self, start: i32, end: i32) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| (start..=end).contains(&v.year()))
            .collect()
    }

    /// Log a maintenance event on a fleet vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VehicleNotFound`] if no vehicle has this handle.
    pub fn record_maintenance(
        &mut self,
        id: VehicleId,
        service_type: impl Into<String>,
        date: impl Into<String>,
        mileage: u64,
    ) -> Result<()> {
        self.require_mut(id)?
            .log_maintenance(service_type, date, mileage);
        Ok(())
    }

    /// Distance travelled per unit of fuel.
    ///
    /// The vehicle handle is accepted but not consulted: the result depends
    /// only on the explicit mileage and fuel figures.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `fuel_used` is not positive or
    /// if `end_mileage` does not exceed `start_mileage`.
    #[allow(clippy::cast_precision_loss)]
    pub fn calculate_fuel_efficiency(
        &self,
        _vehicle: VehicleId,
        start_mileage: u64,
        end_mileage: u64,
        fuel_used: f64,
    ) -> Result<f64> {
        if fuel_used.is_nan() || fuel_used <= 0.0 {
            return Err(Error::invalid_argument(
                "fuel used must be greater than zero",
            ));
        }
        if end_mileage <= start_mileage {
            return Err(Error::invalid_argument(
                "end mileage must be greater than start mileage",
            ));
        }
        let distance = end_mileage - start_mileage;
        Ok(distance as f64 / fuel_used)
    }

    /// Vehicles due for maintenance as of today, in fleet order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DateFormat`] for the first vehicle whose last
    /// maintenance date is malformed.
    pub fn fleet_maintenance_due(&self) -> Result<Vec<&Vehicle>> {
        self.fleet_maintenance_due_on(Local::now().date_naive())
    }

    /// Like [`Self::fleet_maintenance_due`] with an explicit reference date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DateFormat`] for the first vehicle whose last
    /// maintenance date is malformed.
    pub fn fleet_maintenance_due_on(&self, today: NaiveDate) -> Result<Vec<&Vehicle>> {
        let mut due = Vec::new();
        for vehicle in &self.vehicles {
            if vehicle.maintenance_due_after(today, self.policy.due_after_days)? {
                due.push(vehicle);
            }
        }
        debug!("{} of {} vehicles due for maintenance", due.len(), self.len());
        Ok(due)
    }

    /// Insurance record of every vehicle, keyed by handle.
    ///
    /// Vehicles without insurance map to `None`.
    #[must_use]
    pub fn fleet_insurance_info(&self) -> BTreeMap<VehicleId, Option<Insurance>> {
        self.vehicles
            .iter()
            .map(|v| (v.id(), v.insurance_info().cloned()))
            .collect()
    }

    /// Append a complete "Fuel Usage" record to a fleet vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VehicleNotFound`] if no vehicle has this handle.
    pub fn log_fuel_usage(
        &mut self,
        id: VehicleId,
        date: impl Into<String>,
        mileage: u64,
        fuel_used: f64,
    ) -> Result<()> {
        let record = MaintenanceRecord::fuel_usage(date, mileage, fuel_used);
        self.require_mut(id)?.push_record(record);
        Ok(())
    }

    /// One line per vehicle describing year, make, model and mileage.
    #[must_use]
    pub fn fleet_details_report(&self) -> Report {
        Report::new(None, self.vehicles.iter().map(ToString::to_string).collect())
    }

    /// Maintenance history of one vehicle, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VehicleNotFound`] if no vehicle has this handle.
    pub fn maintenance_history_report(&self, id: VehicleId) -> Result<Report> {
        let vehicle = self.require(id)?;
        Ok(Report::maintenance_history(vehicle))
    }

    /// Summary counts over the whole fleet as of today.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DateFormat`] if a maintenance date is malformed.
    pub fn stats(&self) -> Result<FleetStats> {
        self.stats_on(Local::now().date_naive())
    }

    /// Like [`Self::stats`] with an explicit reference date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DateFormat`] if a maintenance date is malformed.
    pub fn stats_on(&self, today: NaiveDate) -> Result<FleetStats> {
        let due = self.fleet_maintenance_due_on(today)?.len();
        Ok(FleetStats::collect(&self.vehicles, due))
    }

    /// Serializable copy of the current fleet.
    #[must_use]
    pub fn snapshot(&self) -> FleetManifest {
        FleetManifest {
            vehicles: self.vehicles.iter().map(ManifestVehicle::from).collect(),
        }
    }
}
