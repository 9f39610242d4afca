use crate::domain::{Coordinate, GeocodingError, LocationError, LocationFix, Placemark};

#[derive(Debug)]
pub enum ControllerEvent {
    Fix(LocationFix),
    SensorFailed(LocationError),
    Geocoded(GeocodingOutcome),
}

#[derive(Debug)]
pub struct GeocodingOutcome {
    pub(crate) generation: u64,
    pub coordinate: Coordinate,
    pub result: Result<Placemark, GeocodingError>,
}
