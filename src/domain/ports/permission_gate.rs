//! Permission Gate Port
//!
//! Defines the interface to the host's permission subsystem.

use crate::domain::entities::PermissionState;
use async_trait::async_trait;

/// Host permission subsystem for location access.
#[async_trait]
pub trait PermissionGate: Send + Sync {
    /// Current permission state, read before every location request.
    fn check(&self) -> PermissionState;

    /// Ask the user for access. Resolves once the user has answered.
    async fn request(&self) -> PermissionState;
}
