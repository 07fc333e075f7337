//! geo-address Library
//!
//! Looks up the device's last known location, reverse geocodes it into a
//! human-readable address and hands it to an external map application.
//! Exposed as a library for integration tests and embedding.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use application::{LocationAddressWorkflow, WorkflowEvent, WorkflowPorts};
pub use config::{load_config, Config};
pub use domain::entities::{AddressCandidate, AddressResult, Coordinate, DisplayState, PermissionState};
pub use domain::errors::WorkflowError;
pub use domain::ports::{
    LocationProvider, LocationSettings, MapLauncher, Notifier, PermissionGate, ReverseGeocoder,
};
pub use domain::value_objects::GeoUri;
