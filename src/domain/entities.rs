//! Domain Entities - Core objects of the location lookup
//!
//! These entities describe what the workflow fetches, derives and shows.
//! They have no external dependencies beyond serde.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether the host has granted access to the device location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Never asked, or the answer is not known yet
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A geographic position as reported by a location provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both parts finite and inside the WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Renders as `Lat: 37.0, Lon: -122.0`.
///
/// `{:?}` keeps the decimal point on whole numbers, so the text always
/// shows the coordinate the way the provider reported it.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lat: {:?}, Lon: {:?}", self.latitude, self.longitude)
    }
}

/// Parses `"lat,lon"` (whitespace around either part is ignored).
impl FromStr for Coordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lat,lon\", got {:?}", s))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|e| format!("invalid latitude {:?}: {}", lat.trim(), e))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|e| format!("invalid longitude {:?}: {}", lon.trim(), e))?;

        let coordinate = Self::new(latitude, longitude);
        if !coordinate.is_valid() {
            return Err(format!("coordinate out of range: {}", s.trim()));
        }
        Ok(coordinate)
    }
}

/// A single reverse geocoding result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressCandidate {
    /// The address formatted as one line
    pub formatted: String,
}

impl AddressCandidate {
    pub fn new(formatted: impl Into<String>) -> Self {
        Self {
            formatted: formatted.into(),
        }
    }
}

/// What a lookup turned a coordinate into.
#[derive(Debug, Clone, PartialEq)]
pub enum AddressResult {
    /// First geocoder result
    ResolvedAddress(String),
    /// Geocoder had nothing; show the raw coordinate
    FallbackCoordinate(Coordinate),
    /// The provider reported a position that cannot be shown
    NotFound,
}

impl AddressResult {
    /// Text shown to the user and handed to the map application.
    pub fn display_text(&self) -> Option<String> {
        match self {
            Self::ResolvedAddress(text) => Some(text.clone()),
            Self::FallbackCoordinate(coordinate) => Some(coordinate.to_string()),
            Self::NotFound => None,
        }
    }
}

/// The single piece of UI-visible state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayState {
    #[default]
    Idle,
    Loading,
    ShowingAddress(AddressResult),
    ShowingError(String),
}

impl DisplayState {
    /// Non-empty address text, only while an address is displayed.
    pub fn address_text(&self) -> Option<String> {
        match self {
            Self::ShowingAddress(result) => result.display_text().filter(|t| !t.is_empty()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}
