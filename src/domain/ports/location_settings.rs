//! Location Settings Port

use async_trait::async_trait;

/// Device-level location service switch.
#[async_trait]
pub trait LocationSettings: Send + Sync {
    /// Whether location services are turned on.
    async fn is_enabled(&self) -> bool;

    /// Bring up the screen where the user can turn them on.
    async fn open(&self) -> anyhow::Result<()>;
}
