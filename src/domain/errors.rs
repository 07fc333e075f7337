//! Workflow error taxonomy.
//!
//! Every variant is recovered locally: it ends up either as the text of
//! `DisplayState::ShowingError` or as a transient notice. None is fatal.

/// User-facing failures of a lookup or a map launch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("Permission denied")]
    PermissionDenied,
    /// The provider has no cached location
    #[error("Location not found")]
    LocationUnavailable,
    #[error("Error getting location: {0}")]
    LocationProviderFailure(String),
    #[error("No app to handle map request")]
    NoMapAppAvailable,
    #[error("No location to show")]
    NoLocationToDisplay,
    #[error("Failed to open map: {0}")]
    MapLaunchFailed(String),
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(WorkflowError::PermissionDenied.to_string(), "Permission denied");
        assert_eq!(WorkflowError::LocationUnavailable.to_string(), "Location not found");
        assert_eq!(
            WorkflowError::LocationProviderFailure("gps off".to_string()).to_string(),
            "Error getting location: gps off"
        );
        assert_eq!(
            WorkflowError::NoMapAppAvailable.to_string(),
            "No app to handle map request"
        );
        assert_eq!(WorkflowError::NoLocationToDisplay.to_string(), "No location to show");
    }
}
