//! Location Address Workflow - Main application use case
//!
//! Orchestrates one lookup: permission check, last known location,
//! reverse geocoding, display, and handing the result to a map app.
//! This is the primary interface for the inbound adapter.

use crate::domain::entities::{AddressResult, Coordinate, DisplayState};
use crate::domain::errors::WorkflowError;
use crate::domain::ports::{
    LocationProvider, LocationSettings, MapLauncher, Notifier, PermissionGate, ReverseGeocoder,
};
use crate::domain::value_objects::GeoUri;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::Instrument;

/// Only the best geocoder match is ever shown.
const MAX_GEOCODE_RESULTS: usize = 1;

/// Completion of an asynchronous step, fed back into the workflow.
///
/// Spawned tasks never touch the display state; they only send one of
/// these. The host delivers them to [`LocationAddressWorkflow::handle`]
/// from a single task.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// The user answered the permission prompt
    PermissionResult { granted: bool },
    /// The provider answered; `None` means it has no cached location
    LocationFetched {
        generation: u64,
        coordinate: Option<Coordinate>,
    },
    /// The provider failed or timed out
    LocationFetchFailed { generation: u64, reason: String },
    /// The geocoder finished; failures are already folded into a fallback
    AddressResolved {
        generation: u64,
        result: AddressResult,
    },
    /// Result of the independent location-services check
    LocationServicesChecked { enabled: bool },
}

/// External collaborators of the workflow.
#[derive(Clone)]
pub struct WorkflowPorts {
    pub permissions: Arc<dyn PermissionGate>,
    pub locator: Arc<dyn LocationProvider>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub settings: Arc<dyn LocationSettings>,
    pub launcher: Arc<dyn MapLauncher>,
    pub notifier: Arc<dyn Notifier>,
}

/// Location to address workflow.
///
/// A small state machine over [`DisplayState`]:
/// `Idle -> Loading -> {ShowingAddress, ShowingError}`, where every state
/// can be left again by a fresh [`request_location`](Self::request_location).
///
/// Each request that starts a fetch bumps a generation counter. Results
/// carry the generation they were started with and are dropped unless it
/// is still the latest, so a slow earlier lookup can never overwrite a
/// later one. A permission denial bumps the counter as well.
pub struct LocationAddressWorkflow {
    ports: WorkflowPorts,
    fetch_timeout: Duration,
    generation: u64,
    display: watch::Sender<DisplayState>,
    events: mpsc::UnboundedSender<WorkflowEvent>,
}

impl LocationAddressWorkflow {
    /// Create a new workflow in the `Idle` state.
    ///
    /// Returns the receiving end of the event channel; the caller must
    /// pass every event it yields back into [`handle`](Self::handle).
    pub fn new(
        ports: WorkflowPorts,
        fetch_timeout: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<WorkflowEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let (display, _) = watch::channel(DisplayState::Idle);
        let workflow = Self {
            ports,
            fetch_timeout,
            generation: 0,
            display,
            events,
        };
        (workflow, rx)
    }

    /// Current display state.
    pub fn display(&self) -> DisplayState {
        self.display.borrow().clone()
    }

    /// Watch the display state; the UI renders from this.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.display.subscribe()
    }

    /// Generation of the latest lookup.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a lookup, or ask for permission first.
    ///
    /// Without permission this only issues the permission request; the
    /// answer comes back as [`WorkflowEvent::PermissionResult`]. With
    /// permission the display switches to `Loading`, the fetch starts,
    /// and the location-services check runs alongside it.
    pub fn request_location(&mut self) {
        let permission = self.ports.permissions.check();
        if !permission.is_granted() {
            tracing::debug!("location permission is {}, requesting it", permission);
            let permissions = self.ports.permissions.clone();
            let events = self.events.clone();
            tokio::spawn(
                async move {
                    let granted = permissions.request().await.is_granted();
                    let _ = events.send(WorkflowEvent::PermissionResult { granted });
                }
                .in_current_span(),
            );
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        tracing::debug!("permission granted, fetching location (generation {})", generation);
        self.set_display(DisplayState::Loading);

        self.spawn_fetch(generation);
        self.spawn_settings_check();
    }

    /// Apply an event produced by one of the spawned steps.
    pub fn handle(&mut self, event: WorkflowEvent) {
        match event {
            WorkflowEvent::PermissionResult { granted } => self.on_permission_result(granted),
            WorkflowEvent::LocationFetched {
                generation,
                coordinate,
            } => self.on_location_fetched(generation, coordinate),
            WorkflowEvent::LocationFetchFailed { generation, reason } => {
                self.on_location_fetch_failed(generation, reason)
            }
            WorkflowEvent::AddressResolved { generation, result } => {
                self.on_address_resolved(generation, result)
            }
            WorkflowEvent::LocationServicesChecked { enabled } => {
                self.on_location_services_checked(enabled)
            }
        }
    }

    /// The user answered the permission prompt.
    pub fn on_permission_result(&mut self, granted: bool) {
        if granted {
            self.request_location();
            return;
        }

        // Invalidate whatever is still in flight.
        self.generation += 1;
        tracing::debug!("location permission denied");
        self.show_error(WorkflowError::PermissionDenied);
    }

    /// The provider answered for `generation`.
    ///
    /// A usable coordinate is handed to the geocoder on its own task; the
    /// outcome comes back as [`WorkflowEvent::AddressResolved`].
    pub fn on_location_fetched(&mut self, generation: u64, coordinate: Option<Coordinate>) {
        if !self.is_current(generation) {
            return;
        }

        let Some(coordinate) = coordinate else {
            tracing::debug!("location is null");
            self.show_error(WorkflowError::LocationUnavailable);
            return;
        };

        tracing::debug!("location fetched: {}", coordinate);
        if !coordinate.is_valid() {
            tracing::warn!("provider reported an unusable location: {:?}", coordinate);
            self.set_display(DisplayState::ShowingAddress(AddressResult::NotFound));
            return;
        }

        self.spawn_geocode(generation, coordinate);
    }

    /// The geocoder finished for `generation`.
    pub fn on_address_resolved(&mut self, generation: u64, result: AddressResult) {
        if !self.is_current(generation) {
            return;
        }
        self.set_display(DisplayState::ShowingAddress(result));
    }

    /// The provider failed for `generation`.
    pub fn on_location_fetch_failed(&mut self, generation: u64, reason: String) {
        if !self.is_current(generation) {
            return;
        }
        tracing::warn!("{}", reason);
        self.set_display(DisplayState::ShowingError(reason));
    }

    /// Location services check finished. When they are off, the user is
    /// offered the settings screen; that dialog runs on its own task and
    /// never blocks the lookup.
    pub fn on_location_services_checked(&mut self, enabled: bool) {
        if enabled {
            return;
        }

        tracing::debug!("location services are disabled, prompting for settings");
        let notifier = self.ports.notifier.clone();
        let settings = self.ports.settings.clone();
        tokio::spawn(
            async move {
                if !notifier.confirm_location_settings().await {
                    return;
                }
                if let Err(e) = settings.open().await {
                    tracing::warn!("failed to open location settings: {:#}", e);
                    notifier.notify("Could not open location settings");
                }
            }
            .in_current_span(),
        );
    }

    /// Open the displayed address in an external map application.
    ///
    /// Failures are shown to the user as a notice and also returned.
    pub async fn open_external_map(&self) -> Result<GeoUri, WorkflowError> {
        let outcome = self.launch_map().await;
        if let Err(e) = &outcome {
            self.ports.notifier.notify(&e.to_string());
        }
        outcome
    }

    async fn launch_map(&self) -> Result<GeoUri, WorkflowError> {
        let text = self
            .display
            .borrow()
            .address_text()
            .ok_or(WorkflowError::NoLocationToDisplay)?;

        let uri = GeoUri::for_query(text);
        if !self.ports.launcher.can_handle(&uri) {
            tracing::warn!("no application can handle {}", uri);
            return Err(WorkflowError::NoMapAppAvailable);
        }

        self.ports.launcher.launch(&uri).await.map_err(|e| {
            tracing::error!("failed to launch map for {}: {:#}", uri, e);
            WorkflowError::MapLaunchFailed(e.to_string())
        })?;

        tracing::info!("opened map for {}", uri);
        Ok(uri)
    }

    fn spawn_fetch(&self, generation: u64) {
        let locator = self.ports.locator.clone();
        let events = self.events.clone();
        let fetch_timeout = self.fetch_timeout;

        tokio::spawn(
            async move {
                let event =
                    match tokio::time::timeout(fetch_timeout, locator.last_known_location()).await {
                        Ok(Ok(coordinate)) => WorkflowEvent::LocationFetched {
                            generation,
                            coordinate,
                        },
                        Ok(Err(e)) => WorkflowEvent::LocationFetchFailed {
                            generation,
                            reason: WorkflowError::LocationProviderFailure(format!("{:#}", e))
                                .to_string(),
                        },
                        Err(_) => WorkflowEvent::LocationFetchFailed {
                            generation,
                            reason: WorkflowError::LocationProviderFailure(format!(
                                "timed out after {}s",
                                fetch_timeout.as_secs_f64()
                            ))
                            .to_string(),
                        },
                    };
                let _ = events.send(event);
            }
            .in_current_span(),
        );
    }

    fn spawn_geocode(&self, generation: u64, coordinate: Coordinate) {
        let geocoder = self.ports.geocoder.clone();
        let events = self.events.clone();

        tokio::spawn(
            async move {
                let result = match geocoder
                    .reverse_geocode(coordinate, MAX_GEOCODE_RESULTS)
                    .await
                {
                    Ok(candidates) => match candidates.into_iter().next() {
                        Some(candidate) if !candidate.formatted.trim().is_empty() => {
                            tracing::debug!("address found: {}", candidate.formatted);
                            AddressResult::ResolvedAddress(candidate.formatted)
                        }
                        _ => {
                            tracing::debug!("no address found, using lat/lon");
                            AddressResult::FallbackCoordinate(coordinate)
                        }
                    },
                    Err(e) => {
                        tracing::warn!("reverse geocoding failed for {}: {:#}", coordinate, e);
                        AddressResult::FallbackCoordinate(coordinate)
                    }
                };
                let _ = events.send(WorkflowEvent::AddressResolved { generation, result });
            }
            .in_current_span(),
        );
    }

    fn spawn_settings_check(&self) {
        let settings = self.ports.settings.clone();
        let events = self.events.clone();

        tokio::spawn(
            async move {
                let enabled = settings.is_enabled().await;
                let _ = events.send(WorkflowEvent::LocationServicesChecked { enabled });
            }
            .in_current_span(),
        );
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation != self.generation {
            tracing::debug!(
                "discarding stale result (generation {}, current {})",
                generation,
                self.generation
            );
            return false;
        }
        true
    }

    fn show_error(&mut self, error: WorkflowError) {
        self.set_display(DisplayState::ShowingError(error.to_string()));
    }

    fn set_display(&mut self, state: DisplayState) {
        tracing::debug!("display -> {:?}", state);
        self.display.send_replace(state);
    }
}
