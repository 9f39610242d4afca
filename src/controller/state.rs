use crate::domain::{GeocodingError, LocationError, LocationFix, Placemark};
use chrono::{DateTime, Utc};

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Active,
}

/// Errors are last-error snapshots: a later success does not clear them.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct ControllerState {
    pub current_location: Option<LocationFix>,
    pub current_placemark: Option<Placemark>,
    pub session_start: Option<DateTime<Utc>>,
    pub last_location_error: Option<LocationError>,
    pub last_geocoding_error: Option<GeocodingError>,
}
