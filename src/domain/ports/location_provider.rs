//! Location Provider Port
//!
//! Defines the interface for reading the device's last known location.

use crate::domain::entities::Coordinate;
use async_trait::async_trait;

/// Source of the last known location.
///
/// This is an outbound port. Implementations may read a platform
/// location cache, a configured position, or an IP geolocation database.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Return the cached location without asking for a fresh fix.
    ///
    /// `Ok(None)` means the provider is working but has no location;
    /// `Err` means the provider itself failed.
    async fn last_known_location(&self) -> anyhow::Result<Option<Coordinate>>;
}
