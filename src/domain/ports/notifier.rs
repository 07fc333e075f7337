//! Notifier Port
//!
//! Defines the interface for transient user-facing messages and prompts.

use async_trait::async_trait;

/// User-facing notices and confirmation dialogs.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show a short transient message (a toast).
    fn notify(&self, message: &str);

    /// Tell the user location services are off and ask whether to open
    /// the settings screen. Resolves to `true` when the user agrees.
    async fn confirm_location_settings(&self) -> bool;
}
