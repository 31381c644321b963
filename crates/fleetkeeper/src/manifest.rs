//! JSON fleet manifests.
//!
//! A manifest describes vehicles, their insurance and their maintenance
//! history. Loading one replays the history through the normal fleet
//! operations, so a loaded fleet is indistinguishable from one built by hand.
//! Manifests are only read; nothing is written back.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::fleet::{FleetManager, MaintenancePolicy};
use crate::vehicle::{Insurance, MaintenanceRecord, Vehicle};

/// A fleet description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetManifest {
    /// Vehicles in fleet order.
    #[serde(default)]
    pub vehicles: Vec<ManifestVehicle>,
}

/// One vehicle entry in a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestVehicle {
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Model year.
    pub year: i32,
    /// Odometer reading at registration.
    pub mileage: u64,
    /// Insurance record, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<Insurance>,
    /// Maintenance history, oldest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintenance: Vec<MaintenanceRecord>,
}

impl From<&Vehicle> for ManifestVehicle {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            make: vehicle.make().to_string(),
            model: vehicle.model().to_string(),
            year: vehicle.year(),
            mileage: vehicle.mileage(),
            insurance: vehicle.insurance_info().cloned(),
            maintenance: vehicle.maintenance_history(),
        }
    }
}

impl FleetManifest {
    /// Read a manifest from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid manifest.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading fleet manifest from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| Error::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the text is not a valid manifest.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Render the manifest as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a fleet from this manifest.
    ///
    /// Each vehicle is added with its registration mileage, then its
    /// maintenance entries are replayed in order: entries carrying
    /// `fuel_used` go through fuel logging, the rest through maintenance
    /// recording.
    ///
    /// # Errors
    ///
    /// Propagates errors from the fleet operations.
    pub fn into_fleet(self, policy: MaintenancePolicy) -> Result<FleetManager> {
        let mut fleet = FleetManager::with_policy(policy);
        for entry in self.vehicles {
            let id = fleet.add_vehicle(entry.make, entry.model, entry.year, entry.mileage);
            for record in entry.maintenance {
                match record.fuel_used {
                    Some(fuel_used) => {
                        fleet.log_fuel_usage(id, record.date, record.mileage, fuel_used)?;
                    }
                    None => fleet.record_maintenance(
                        id,
                        record.service_type,
                        record.date,
                        record.mileage,
                    )?,
                }
            }
            if let Some(insurance) = entry.insurance {
                if let Some(vehicle) = fleet.vehicle_mut(id) {
                    vehicle.set_insurance_details(insurance.provider, insurance.policy_number);
                }
            }
        }
        info!("Loaded fleet of {} vehicles", fleet.len());
        Ok(fleet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "vehicles": [
            {
                "make": "Toyota",
                "model": "Corolla",
                "year": 2020,
                "mileage": 25000,
                "insurance": { "provider": "InsureCo", "policy_number": "12345" },
                "maintenance": [
                    { "service_type": "Oil change", "date": "2023-05-10", "mileage": 26000 },
                    { "service_type": "Fuel Usage", "date": "2023-05-12", "mileage": 26400, "fuel_used": 40.0 }
                ]
            },
            { "make": "Honda", "model": "Civic", "year": 2019, "mileage": 30000 }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let manifest = FleetManifest::from_json(SAMPLE).unwrap();
        assert_eq!(manifest.vehicles.len(), 2);
        assert_eq!(manifest.vehicles[0].maintenance.len(), 2);
        assert!(manifest.vehicles[1].insurance.is_none());
        assert!(manifest.vehicles[1].maintenance.is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        let err = FleetManifest::from_json("{ \"vehicles\": 3 }").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_from_json_empty_object() {
        let manifest = FleetManifest::from_json("{}").unwrap();
        assert!(manifest.vehicles.is_empty());
    }

    #[test]
    fn test_into_fleet_replays_history() {
        let fleet = FleetManifest::from_json(SAMPLE)
            .unwrap()
            .into_fleet(MaintenancePolicy::default())
            .unwrap();

        assert_eq!(fleet.len(), 2);
        let corolla = &fleet.vehicles()[0];
        assert_eq!(corolla.mileage(), 26400);
        assert_eq!(corolla.maintenance_log().len(), 2);
        assert_eq!(corolla.last_maintenance().unwrap().fuel_used, Some(40.0));
        assert_eq!(corolla.insurance_info().unwrap().provider, "InsureCo");

        let civic = &fleet.vehicles()[1];
        assert_eq!(civic.mileage(), 30000);
        assert!(civic.insurance_info().is_none());
    }

    #[test]
    fn test_into_fleet_keeps_policy() {
        let policy = MaintenancePolicy { due_after_days: 7 };
        let fleet = FleetManifest::default().into_fleet(policy).unwrap();
        assert_eq!(fleet.policy(), policy);
        assert!(fleet.is_empty());
    }

    #[test]
    fn test_snapshot_matches_manifest() {
        let manifest = FleetManifest::from_json(SAMPLE).unwrap();
        let fleet = manifest
            .clone()
            .into_fleet(MaintenancePolicy::default())
            .unwrap();

        let mut expected = manifest;
        // Registration mileage is superseded by the replayed history.
        expected.vehicles[0].mileage = 26400;
        assert_eq!(fleet.snapshot(), expected);
    }

    #[test]
    fn test_to_json_omits_empty_sections() {
        let fleet = FleetManifest::from_json(SAMPLE)
            .unwrap()
            .into_fleet(MaintenancePolicy::default())
            .unwrap();
        let json = fleet.snapshot().to_json().unwrap();

        let reparsed = FleetManifest::from_json(&json).unwrap();
        assert_eq!(reparsed.vehicles.len(), 2);
        assert_eq!(json.matches("\"insurance\"").count(), 1);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = FleetManifest::from_path("/nonexistent/fleet.json").unwrap_err();
        assert!(matches!(err, Error::ManifestRead { .. }));
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join(format!(
            "fleetkeeper_manifest_test_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, SAMPLE).unwrap();

        let manifest = FleetManifest::from_path(&path).unwrap();
        assert_eq!(manifest.vehicles.len(), 2);

        let _ = std::fs::remove_file(&path);
    }
}
