//! Command Map Launcher
//!
//! Implements MapLauncher by running a desktop program with the geo URI
//! as its only argument. A named map application is preferred; the
//! generic URI opener is the fallback.

use crate::domain::ports::MapLauncher;
use crate::domain::value_objects::GeoUri;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

pub struct CommandMapLauncher {
    preferred: Option<String>,
    opener: String,
}

impl CommandMapLauncher {
    /// `preferred` is tried first (e.g. "gnome-maps"), then `opener`
    /// (e.g. "xdg-open").
    pub fn new(preferred: Option<String>, opener: impl Into<String>) -> Self {
        Self {
            preferred,
            opener: opener.into(),
        }
    }

    /// First configured program that is installed.
    fn resolve(&self) -> Option<PathBuf> {
        self.preferred
            .iter()
            .chain(std::iter::once(&self.opener))
            .find_map(|program| match which::which(program) {
                Ok(path) => Some(path),
                Err(_) => {
                    tracing::debug!("map program {} is not installed", program);
                    None
                }
            })
    }
}

#[async_trait]
impl MapLauncher for CommandMapLauncher {
    fn can_handle(&self, _uri: &GeoUri) -> bool {
        self.resolve().is_some()
    }

    async fn launch(&self, uri: &GeoUri) -> anyhow::Result<()> {
        let program = self
            .resolve()
            .ok_or_else(|| anyhow::anyhow!("no map application installed"))?;

        tracing::debug!("launching {} {}", program.display(), uri);
        let mut child = Command::new(&program).arg(uri.to_string()).spawn()?;

        // Reap the child without making the caller wait for the app to exit.
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if !status.success() => {
                    tracing::warn!("map application exited with {}", status);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("failed to wait for map application: {}", e),
            }
        });

        Ok(())
    }
}
