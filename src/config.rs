use crate::domain::entities::{Coordinate, PermissionState};
use serde::Deserialize;

const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_PUBLIC_IP_URL: &str = "https://checkip.amazonaws.com/";
const DEFAULT_MAP_APP: &str = "gnome-maps";
const DEFAULT_MAP_OPENER: &str = "xdg-open";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Reverse geocoding
    pub geocoder_url: String,
    pub user_agent: String,
    pub language: Option<String>,
    pub http_timeout_secs: u64,

    // Location source
    pub last_known: Option<Coordinate>,
    pub geoip_path: Option<String>,
    pub public_ip_url: String,
    pub fetch_timeout_secs: u64,

    // Device state
    pub permission: PermissionState,
    pub location_enabled: bool,
    pub settings_command: Option<String>,

    // Map applications
    pub map_app: Option<String>,
    pub map_opener: String,

    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: default_user_agent(),
            language: None,
            http_timeout_secs: 15,
            last_known: None,
            geoip_path: None,
            public_ip_url: DEFAULT_PUBLIC_IP_URL.to_string(),
            fetch_timeout_secs: 10,
            permission: PermissionState::Unknown,
            location_enabled: true,
            settings_command: None,
            map_app: Some(DEFAULT_MAP_APP.to_string()),
            map_opener: DEFAULT_MAP_OPENER.to_string(),
            debug: false,
        }
    }
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("GEOADDR_LAST_KNOWN: {0}")]
    InvalidLastKnown(String),
    #[error("GEOADDR_PERMISSION must be one of ask, granted, denied (got {0:?})")]
    InvalidPermission(String),
}

fn default_user_agent() -> String {
    format!("geo-address/{}", env!("CARGO_PKG_VERSION"))
}

fn is_enabled(value: &str) -> bool {
    value == "1" || value.to_lowercase() == "true"
}

/// A zero timeout would fail every request, so it counts as unset.
fn parse_timeout_secs(value: &str) -> Option<u64> {
    value.trim().parse().ok().filter(|&secs| secs > 0)
}

fn parse_permission(value: &str) -> Result<PermissionState, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "ask" | "unknown" | "" => Ok(PermissionState::Unknown),
        "granted" => Ok(PermissionState::Granted),
        "denied" => Ok(PermissionState::Denied),
        _ => Err(ConfigError::InvalidPermission(value.to_string())),
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> anyhow::Result<Config> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration through `var`, which looks up one variable by name.
pub fn load_config_from<F>(var: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Config::default();

    let geocoder_url = var("GEOADDR_GEOCODER_URL")
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or(defaults.geocoder_url);

    let user_agent = var("GEOADDR_USER_AGENT").unwrap_or(defaults.user_agent);

    let language = var("GEOADDR_LANGUAGE").filter(|v| !v.trim().is_empty());

    let http_timeout_secs = var("GEOADDR_HTTP_TIMEOUT_SECS")
        .and_then(|v| parse_timeout_secs(&v))
        .unwrap_or(defaults.http_timeout_secs);

    let last_known = match var("GEOADDR_LAST_KNOWN") {
        Some(v) if !v.trim().is_empty() => Some(
            v.parse::<Coordinate>()
                .map_err(ConfigError::InvalidLastKnown)?,
        ),
        _ => None,
    };

    let geoip_path = var("GEOADDR_GEOIP_PATH");

    let public_ip_url = var("GEOADDR_PUBLIC_IP_URL").unwrap_or(defaults.public_ip_url);

    let fetch_timeout_secs = var("GEOADDR_FETCH_TIMEOUT_SECS")
        .and_then(|v| parse_timeout_secs(&v))
        .unwrap_or(defaults.fetch_timeout_secs);

    let permission = match var("GEOADDR_PERMISSION") {
        Some(v) => parse_permission(&v)?,
        None => defaults.permission,
    };

    let location_enabled = var("GEOADDR_LOCATION_ENABLED")
        .map(|v| is_enabled(&v))
        .unwrap_or(defaults.location_enabled);

    let settings_command = var("GEOADDR_SETTINGS_COMMAND").filter(|v| !v.trim().is_empty());

    // An empty value turns the preferred app off and goes straight to the opener.
    let map_app = match var("GEOADDR_MAP_APP") {
        Some(v) if v.trim().is_empty() => None,
        Some(v) => Some(v),
        None => defaults.map_app,
    };

    let map_opener = var("GEOADDR_MAP_OPENER").unwrap_or(defaults.map_opener);

    let debug = var("DEBUG").is_some();

    Ok(Config {
        geocoder_url,
        user_agent,
        language,
        http_timeout_secs,
        last_known,
        geoip_path,
        public_ip_url,
        fetch_timeout_secs,
        permission,
        location_enabled,
        settings_command,
        map_app,
        map_opener,
        debug,
    })
}
