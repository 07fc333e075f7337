mod command_location_settings;
mod command_map_launcher;
mod fixed_location_provider;
mod maxmind_location_provider;
mod nominatim_geocoder;
mod terminal_ui;

pub use command_location_settings::CommandLocationSettings;
pub use command_map_launcher::CommandMapLauncher;
pub use fixed_location_provider::FixedLocationProvider;
pub use maxmind_location_provider::MaxMindLocationProvider;
pub use nominatim_geocoder::{NominatimConfig, NominatimGeocoder};
pub use terminal_ui::{render_line, TerminalUi};
