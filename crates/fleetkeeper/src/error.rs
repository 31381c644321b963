//! Error types for fleetkeeper.
//!
//! This module defines all error types used throughout the fleetkeeper crate,
//! providing enough context for callers to tell failures apart.

use std::path::PathBuf;
use thiserror::Error;

use crate::vehicle::VehicleId;

/// The main error type for fleetkeeper operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Fleet Errors ===
    /// An argument failed a numeric check.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Which check failed.
        message: String,
    },

    /// No vehicle with this handle is in the fleet.
    #[error("vehicle {id} not found in fleet")]
    VehicleNotFound {
        /// Handle that was looked up.
        id: VehicleId,
    },

    /// A maintenance date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid maintenance date '{value}' (expected YYYY-MM-DD): {source}")]
    DateFormat {
        /// The offending date text.
        value: String,
        /// The underlying parse error.
        #[source]
        source: chrono::ParseError,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Manifest Errors ===
    /// Failed to read a fleet manifest file.
    #[error("failed to read manifest {path}: {source}")]
    ManifestRead {
        /// Path to the manifest.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// Writing a report or reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for fleetkeeper operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a vehicle-not-found error for the given handle.
    #[must_use]
    pub fn vehicle_not_found(id: VehicleId) -> Self {
        Self::VehicleNotFound { id }
    }

    /// Check if this error is an argument check failure.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Check if this error means a vehicle handle was unknown.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::VehicleNotFound { .. })
    }

    /// Check if this error is a malformed maintenance date.
    #[must_use]
    pub fn is_date_format(&self) -> bool {
        matches!(self, Self::DateFormat { .. })
    }
}
