//! Map Launcher Port
//!
//! Defines the interface for handing a geo URI to an external map application.

use crate::domain::value_objects::GeoUri;
use async_trait::async_trait;

/// Launcher for external map applications.
#[async_trait]
pub trait MapLauncher: Send + Sync {
    /// Whether some installed application can show this URI.
    fn can_handle(&self, uri: &GeoUri) -> bool;

    /// Start the map application with the URI.
    async fn launch(&self, uri: &GeoUri) -> anyhow::Result<()>;
}
