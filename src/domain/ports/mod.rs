mod location_provider;
mod location_settings;
mod map_launcher;
mod notifier;
mod permission_gate;
mod reverse_geocoder;

pub use location_provider::LocationProvider;
pub use location_settings::LocationSettings;
pub use map_launcher::MapLauncher;
pub use notifier::Notifier;
pub use permission_gate::PermissionGate;
pub use reverse_geocoder::ReverseGeocoder;
