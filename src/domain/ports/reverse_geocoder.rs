//! Reverse Geocoder Port
//!
//! Defines the interface for turning coordinates into addresses.

use crate::domain::entities::{AddressCandidate, Coordinate};
use async_trait::async_trait;

/// Geocoding service that resolves a coordinate to address candidates.
///
/// An empty result is not an error: the caller falls back to showing
/// the coordinate itself.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Resolve a coordinate into at most `max_results` candidates,
    /// best match first.
    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
        max_results: usize,
    ) -> anyhow::Result<Vec<AddressCandidate>>;
}
