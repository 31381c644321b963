//! Structured fleet reports.
//!
//! Reports are plain values. Callers pick the sink: any [`std::io::Write`],
//! the tracing log, or their own formatting over [`Report::lines`].

use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::vehicle::Vehicle;

/// A textual report: an optional header followed by body lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Heading line, if the report has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Body lines in order.
    pub lines: Vec<String>,
}

impl Report {
    /// Create a report from its parts.
    #[must_use]
    pub fn new(header: Option<String>, lines: Vec<String>) -> Self {
        Self { header, lines }
    }

    /// Maintenance history of a single vehicle.
    #[must_use]
    pub fn maintenance_history(vehicle: &Vehicle) -> Self {
        let lines = vehicle
            .maintenance_log()
            .iter()
            .map(|record| {
                format!(
                    "Date: {}, Type of Service: {}, Mileage: {}",
                    record.date, record.service_type, record.mileage
                )
            })
            .collect();
        Self::new(
            Some(format!("Maintenance History for {}:", vehicle.model())),
            lines,
        )
    }

    /// Header (if any) followed by the body lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.header
            .iter()
            .chain(self.lines.iter())
            .map(String::as_str)
    }

    /// Write every line, newline-terminated.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for line in self.lines() {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }

    /// Emit every line at info level on the `fleetkeeper::report` target.
    pub fn log(&self) {
        for line in self.lines() {
            info!(target: "fleetkeeper::report", "{}", line);
        }
    }

    /// Check if the report has no lines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.lines.is_empty()
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Summary counts over a fleet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetStats {
    /// Number of vehicles in the fleet.
    pub total_vehicles: usize,
    /// Vehicles due for maintenance.
    pub vehicles_due: usize,
    /// Vehicles with an insurance record.
    pub insured_vehicles: usize,
    /// Maintenance records across all vehicles.
    pub maintenance_records: usize,
    /// Sum of fuel recorded by fuel logging.
    pub total_fuel_used: f64,
}

impl FleetStats {
    pub(crate) fn collect(vehicles: &[Vehicle], vehicles_due: usize) -> Self {
        let maintenance_records = vehicles.iter().map(|v| v.maintenance_log().len()).sum();
        let total_fuel_used = vehicles
            .iter()
            .flat_map(|v| v.maintenance_log())
            .filter_map(|r| r.fuel_used)
            .sum();

        Self {
            total_vehicles: vehicles.len(),
            vehicles_due,
            insured_vehicles: vehicles
                .iter()
                .filter(|v| v.insurance_info().is_some())
                .count(),
            maintenance_records,
            total_fuel_used,
        }
    }
}
