//! Command Location Settings
//!
//! Implements LocationSettings from configuration: whether location
//! services are on, and which command brings up their settings screen.

use crate::domain::ports::LocationSettings;
use async_trait::async_trait;
use tokio::process::Command;

pub struct CommandLocationSettings {
    enabled: bool,
    command: Option<String>,
}

impl CommandLocationSettings {
    pub fn new(enabled: bool, command: Option<String>) -> Self {
        Self { enabled, command }
    }
}

#[async_trait]
impl LocationSettings for CommandLocationSettings {
    async fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn open(&self) -> anyhow::Result<()> {
        let command = self
            .command
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("no location settings command configured"))?;

        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("location settings command is empty"))?;

        tracing::debug!("opening location settings with {:?}", command);
        let status = Command::new(program).args(parts).status().await?;
        if !status.success() {
            anyhow::bail!("{} exited with {}", program, status);
        }
        Ok(())
    }
}
