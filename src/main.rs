//! geo-address - last known location to address, in a terminal
//!
//! This is the composition root that wires together all the components.

use geo_address::adapters::inbound::TerminalSession;
use geo_address::adapters::outbound::{
    CommandLocationSettings, CommandMapLauncher, FixedLocationProvider, MaxMindLocationProvider,
    NominatimConfig, NominatimGeocoder, TerminalUi,
};
use geo_address::{load_config, Config, LocationAddressWorkflow, LocationProvider, WorkflowPorts};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging; stdout belongs to the session
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "starting geo-address geocoder={} permission={}",
        cfg.geocoder_url,
        cfg.permission
    );

    // ===== COMPOSITION ROOT =====
    // Wire up all adapters and the workflow

    // 1. Create outbound adapters

    let locator = location_provider(&cfg);

    let geocoder = Arc::new(NominatimGeocoder::new(NominatimConfig {
        base_url: cfg.geocoder_url.clone(),
        user_agent: cfg.user_agent.clone(),
        language: cfg.language.clone(),
        timeout_secs: cfg.http_timeout_secs,
    })?);

    let settings = Arc::new(CommandLocationSettings::new(
        cfg.location_enabled,
        cfg.settings_command.clone(),
    ));

    let launcher = Arc::new(CommandMapLauncher::new(
        cfg.map_app.clone(),
        cfg.map_opener.clone(),
    ));

    // The terminal is both the permission dialog and the toast surface
    let ui = Arc::new(TerminalUi::new(cfg.permission));

    // 2. Create application workflow
    let ports = WorkflowPorts {
        permissions: ui.clone(),
        locator,
        geocoder,
        settings,
        launcher,
        notifier: ui.clone(),
    };
    let (workflow, events) =
        LocationAddressWorkflow::new(ports, Duration::from_secs(cfg.fetch_timeout_secs));

    // 3. Run inbound adapter
    let session = TerminalSession::new(workflow, events, ui);
    session.run(BufReader::new(tokio::io::stdin())).await
}

/// Pick the location source: a configured position wins, then GeoIP.
fn location_provider(cfg: &Config) -> Arc<dyn LocationProvider> {
    if let Some(coordinate) = cfg.last_known {
        tracing::info!("using configured last known location {}", coordinate);
        return Arc::new(FixedLocationProvider::new(Some(coordinate)));
    }

    if let Some(path) = &cfg.geoip_path {
        match MaxMindLocationProvider::from_file(
            path,
            &cfg.public_ip_url,
            Duration::from_secs(cfg.http_timeout_secs),
        ) {
            Ok(provider) => {
                tracing::info!("using GeoIP location from {}", path);
                return Arc::new(provider);
            }
            Err(e) => {
                tracing::warn!("failed to load GeoIP database {}: {:#}", path, e);
            }
        }
    }

    tracing::info!("no location source configured, last known location is empty");
    Arc::new(FixedLocationProvider::new(None))
}
