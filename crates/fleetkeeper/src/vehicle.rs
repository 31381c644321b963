//! Core vehicle types for fleetkeeper.
//!
//! This module defines a single vehicle together with its maintenance log
//! and insurance record.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Date format accepted for maintenance records.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Service type used for records created by fuel logging.
pub const FUEL_USAGE_SERVICE: &str = "Fuel Usage";

/// Days without service after which a vehicle is due for maintenance.
pub const DEFAULT_DUE_AFTER_DAYS: u32 = 180;

/// Stable handle for a vehicle within one fleet.
///
/// Handles are issued by [`crate::FleetManager::add_vehicle`] in increasing
/// order and are never reused, so two vehicles with identical fields still
/// have distinct handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(u64);

impl VehicleId {
    /// Wrap a raw handle value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw handle value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&format!("#{}", self.0))
    }
}

/// One logged service event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    /// Free-form label, e.g. "Oil change" or "Fuel Usage".
    pub service_type: String,

    /// Service date as `YYYY-MM-DD` text. Not validated until a due check.
    pub date: String,

    /// Odometer reading at the time of service.
    pub mileage: u64,

    /// Fuel consumed, only present on fuel usage records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_used: Option<f64>,
}

impl MaintenanceRecord {
    /// Create a record without fuel information.
    #[must_use]
    pub fn new(service_type: impl Into<String>, date: impl Into<String>, mileage: u64) -> Self {
        Self {
            service_type: service_type.into(),
            date: date.into(),
            mileage,
            fuel_used: None,
        }
    }

    /// Create a complete fuel usage record.
    #[must_use]
    pub fn fuel_usage(date: impl Into<String>, mileage: u64, fuel_used: f64) -> Self {
        Self {
            fuel_used: Some(fuel_used),
            ..Self::new(FUEL_USAGE_SERVICE, date, mileage)
        }
    }

    /// Parse the record's date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DateFormat`] if the date is not `YYYY-MM-DD`.
    pub fn parsed_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|source| Error::DateFormat {
            value: self.date.clone(),
            source,
        })
    }

    /// Check if this record came from fuel logging.
    #[must_use]
    pub fn is_fuel_usage(&self) -> bool {
        self.fuel_used.is_some()
    }
}

/// Insurance details for a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insurance {
    /// Insurance company.
    pub provider: String,
    /// Policy number as issued by the provider.
    pub policy_number: String,
}

/// A vehicle and its mutable history.
///
/// Vehicles are created by the fleet; state changes go through the methods
/// below so the mileage and log stay consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: VehicleId,
    make: String,
    model: String,
    year: i32,
    mileage: u64,
    maintenance_log: Vec<MaintenanceRecord>,
    insurance: Option<Insurance>,
}

impl Vehicle {
    pub(crate) fn new(
        id: VehicleId,
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        mileage: u64,
    ) -> Self {
        Self {
            id,
            make: make.into(),
            model: model.into(),
            year,
            mileage,
            maintenance_log: Vec::new(),
            insurance: None,
        }
    }

    /// The fleet handle of this vehicle.
    #[must_use]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// Manufacturer.
    #[must_use]
    pub fn make(&self) -> &str {
        &self.make
    }

    /// Model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Model year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Current odometer reading.
    #[must_use]
    pub fn mileage(&self) -> u64 {
        self.mileage
    }

    /// Append a service record and move the odometer to its mileage.
    ///
    /// Neither the date format nor mileage ordering is checked here.
    pub fn log_maintenance(
        &mut self,
        service_type: impl Into<String>,
        date: impl Into<String>,
        mileage: u64,
    ) {
        self.push_record(MaintenanceRecord::new(service_type, date, mileage));
    }

    pub(crate) fn push_record(&mut self, record: MaintenanceRecord) {
        debug!(
            "Vehicle {}: logging '{}' on {} at {} miles",
            self.id, record.service_type, record.date, record.mileage
        );
        self.mileage = record.mileage;
        self.maintenance_log.push(record);
    }

    /// Borrowed view of the maintenance log, oldest first.
    #[must_use]
    pub fn maintenance_log(&self) -> &[MaintenanceRecord] {
        &self.maintenance_log
    }

    /// Owned copy of the maintenance log.
    ///
    /// Changes to the returned vector do not affect the vehicle.
    #[must_use]
    pub fn maintenance_history(&self) -> Vec<MaintenanceRecord> {
        self.maintenance_log.clone()
    }

    /// Set the odometer directly without logging a record.
    pub fn update_mileage(&mut self, new_mileage: u64) {
        debug!(
            "Vehicle {}: mileage {} -> {}",
            self.id, self.mileage, new_mileage
        );
        self.mileage = new_mileage;
    }

    /// Mean mileage across all log entries, or 0 when the log is empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_mileage(&self) -> f64 {
        if self.maintenance_log.is_empty() {
            return 0.0;
        }
        let total: u64 = self.maintenance_log.iter().map(|r| r.mileage).sum();
        total as f64 / self.maintenance_log.len() as f64
    }

    /// The most recently appended record.
    #[must_use]
    pub fn last_maintenance(&self) -> Option<&MaintenanceRecord> {
        self.maintenance_log.last()
    }

    /// Replace the insurance record.
    pub fn set_insurance_details(
        &mut self,
        provider: impl Into<String>,
        policy_number: impl Into<String>,
    ) {
        self.insurance = Some(Insurance {
            provider: provider.into(),
            policy_number: policy_number.into(),
        });
    }

    /// Current insurance record, `None` until one is set.
    #[must_use]
    pub fn insurance_info(&self) -> Option<&Insurance> {
        self.insurance.as_ref()
    }

    /// Check whether the vehicle is due for maintenance as of today.
    ///
    /// A vehicle that was never serviced is due. Otherwise it is due when
    /// more than 180 days have passed since the last record's date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DateFormat`] if the last record's date is malformed.
    pub fn check_maintenance_due(&self) -> Result<bool> {
        self.check_maintenance_due_on(Local::now().date_naive())
    }

    /// Like [`Self::check_maintenance_due`] with an explicit reference date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DateFormat`] if the last record's date is malformed.
    pub fn check_maintenance_due_on(&self, today: NaiveDate) -> Result<bool> {
        self.maintenance_due_after(today, DEFAULT_DUE_AFTER_DAYS)
    }

    /// Due check against a custom interval.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DateFormat`] if the last record's date is malformed.
    pub fn maintenance_due_after(&self, today: NaiveDate, due_after_days: u32) -> Result<bool> {
        let Some(last) = self.last_maintenance() else {
            return Ok(true);
        };
        let elapsed = (today - last.parsed_date()?).num_days();
        Ok(elapsed > i64::from(due_after_days))
    }
}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}, Mileage: {} miles",
            self.year, self.make, self.model, self.mileage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_test_vehicle() -> Vehicle {
        Vehicle::new(VehicleId::new(1), "Toyota", "Corolla", 2020, 25000)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_new_vehicle_is_blank() {
        let vehicle = create_test_vehicle();
        assert_eq!(vehicle.id(), VehicleId::new(1));
        assert_eq!(vehicle.make(), "Toyota");
        assert_eq!(vehicle.model(), "Corolla");
        assert_eq!(vehicle.year(), 2020);
        assert_eq!(vehicle.mileage(), 25000);
        assert!(vehicle.maintenance_log().is_empty());
        assert!(vehicle.insurance_info().is_none());
    }

    #[test]
    fn test_log_maintenance() {
        let mut vehicle = create_test_vehicle();
        vehicle.log_maintenance("Oil change", "2023-05-10", 26000);

        assert_eq!(vehicle.maintenance_log().len(), 1);
        assert_eq!(vehicle.mileage(), 26000);
    }

    #[test]
    fn test_mileage_follows_last_log_call() {
        let mut vehicle = create_test_vehicle();
        vehicle.log_maintenance("Service", "2023-05-10", 26000);
        vehicle.log_maintenance("Service", "2023-06-10", 24000);
        vehicle.log_maintenance("Service", "2023-07-10", 27500);

        assert_eq!(vehicle.mileage(), 27500);
    }

    #[test]
    fn test_log_multiple_maintenance() {
        let mut vehicle = create_test_vehicle();
        vehicle.log_maintenance("Oil change", "2023-05-10", 26000);
        vehicle.log_maintenance("Brake inspection", "2023-06-01", 26500);

        let types: Vec<_> = vehicle
            .maintenance_log()
            .iter()
            .map(|r| r.service_type.as_str())
            .collect();
        assert_eq!(types, vec!["Oil change", "Brake inspection"]);
    }

    #[test]
    fn test_maintenance_history_is_a_copy() {
        let mut vehicle = create_test_vehicle();
        vehicle.log_maintenance("Oil change", "2023-05-10", 26000);

        let mut history = vehicle.maintenance_history();
        assert_eq!(history.len(), 1);
        history.clear();

        assert_eq!(vehicle.maintenance_log().len(), 1);
    }

    #[test]
    fn test_update_mileage() {
        let mut vehicle = create_test_vehicle();
        vehicle.log_maintenance("Oil change", "2023-05-10", 26000);
        vehicle.update_mileage(27000);

        assert_eq!(vehicle.mileage(), 27000);
        assert_eq!(vehicle.maintenance_log().len(), 1);
    }

    #[test]
    fn test_average_mileage_empty() {
        let vehicle = create_test_vehicle();
        assert!(vehicle.average_mileage().abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_mileage() {
        let mut vehicle = create_test_vehicle();
        vehicle.log_maintenance("Service", "2023-05-10", 26000);
        vehicle.log_maintenance("Service", "2023-06-10", 27000);

        assert!((vehicle.average_mileage() - 26500.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_ignores_direct_updates() {
        let mut vehicle = create_test_vehicle();
        vehicle.log_maintenance("Service", "2023-05-10", 26000);
        vehicle.update_mileage(90000);

        assert!((vehicle.average_mileage() - 26000.0).abs() < 1e-9);
    }

    #[test]
    fn test_last_maintenance() {
        let mut vehicle = create_test_vehicle();
        assert!(vehicle.last_maintenance().is_none());

        vehicle.log_maintenance("Oil change", "2023-05-10", 26000);
        vehicle.log_maintenance("Tire rotation", "2023-04-01", 26200);

        let last = vehicle.last_maintenance().unwrap();
        assert_eq!(last.service_type, "Tire rotation");
        assert_eq!(last.date, "2023-04-01");
    }

    #[test]
    fn test_set_insurance_details() {
        let mut vehicle = create_test_vehicle();
        vehicle.set_insurance_details("InsureCo", "12345");

        assert_eq!(
            vehicle.insurance_info(),
            Some(&Insurance {
                provider: "InsureCo".to_string(),
                policy_number: "12345".to_string(),
            })
        );
    }

    #[test]
    fn test_insurance_details_replaced() {
        let mut vehicle = create_test_vehicle();
        vehicle.set_insurance_details("InsureCo", "12345");
        vehicle.set_insurance_details("NewInsureCo", "54321");

        let info = vehicle.insurance_info().unwrap();
        assert_eq!(info.provider, "NewInsureCo");
        assert_eq!(info.policy_number, "54321");
    }

    #[test]
    fn test_due_when_never_serviced() {
        let vehicle = create_test_vehicle();
        assert!(vehicle.check_maintenance_due().unwrap());
    }

    #[test]
    fn test_due_boundary() {
        let mut vehicle = create_test_vehicle();
        vehicle.log_maintenance("Oil change", "2023-01-01", 26000);
        let serviced = date("2023-01-01");

        assert!(!vehicle
            .check_maintenance_due_on(serviced + Duration::days(180))
            .unwrap());
        assert!(vehicle
            .check_maintenance_due_on(serviced + Duration::days(181))
            .unwrap());
    }

    #[test]
    fn test_due_uses_last_appended_record() {
        let mut vehicle = create_test_vehicle();
        vehicle.log_maintenance("Oil change", "2023-06-01", 26000);
        vehicle.log_maintenance("Inspection", "2021-01-01", 26100);

        assert!(vehicle.check_maintenance_due_on(date("2023-07-01")).unwrap());
    }

    #[test]
    fn test_old_service_is_due_today() {
        let mut vehicle = create_test_vehicle();
        vehicle.log_maintenance("Oil change", "2021-05-10", 26000);
        assert!(vehicle.check_maintenance_due().unwrap());
    }

    #[test]
    fn test_recent_service_not_due_today() {
        let mut vehicle = create_test_vehicle();
        let yesterday = Local::now().date_naive() - Duration::days(1);
        vehicle.log_maintenance("Oil change", yesterday.format(DATE_FORMAT).to_string(), 26000);
        assert!(!vehicle.check_maintenance_due().unwrap());
    }

    #[test]
    fn test_future_date_not_due() {
        let mut vehicle = create_test_vehicle();
        vehicle.log_maintenance("Oil change", "2030-01-01", 26000);
        assert!(!vehicle.check_maintenance_due_on(date("2024-01-01")).unwrap());
    }

    #[test]
    fn test_custom_interval() {
        let mut vehicle = create_test_vehicle();
        vehicle.log_maintenance("Oil change", "2023-01-01", 26000);
        let today = date("2023-03-01");

        assert!(vehicle.maintenance_due_after(today, 30).unwrap());
        assert!(!vehicle.maintenance_due_after(today, 90).unwrap());
    }

    #[test]
    fn test_malformed_date_is_format_error() {
        let mut vehicle = create_test_vehicle();
        vehicle.log_maintenance("Oil change", "10/05/2023", 26000);

        let err = vehicle.check_maintenance_due().unwrap_err();
        assert!(err.is_date_format());
        assert!(err.to_string().contains("10/05/2023"));
    }

    #[test]
    fn test_display() {
        let vehicle = create_test_vehicle();
        assert_eq!(vehicle.to_string(), "2020 Toyota Corolla, Mileage: 25000 miles");
    }

    #[test]
    fn test_fuel_usage_record() {
        let record = MaintenanceRecord::fuel_usage("2023-05-12", 26000, 50.0);
        assert_eq!(record.service_type, FUEL_USAGE_SERVICE);
        assert_eq!(record.fuel_used, Some(50.0));
        assert!(record.is_fuel_usage());
        assert!(!MaintenanceRecord::new("Oil change", "2023-05-12", 1).is_fuel_usage());
    }

    #[test]
    fn test_record_serialization_skips_missing_fuel() {
        let record = MaintenanceRecord::new("Oil change", "2023-05-10", 26000);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("fuel_used"));

        let parsed: MaintenanceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_vehicle_id_display() {
        assert_eq!(VehicleId::new(3).to_string(), "#3");
        assert_eq!(VehicleId::new(3).get(), 3);
        assert_eq!(format!("{:>4}", VehicleId::new(3)), "  #3");
    }
}
