use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq)]
pub enum LocationError {
    #[error("access to location services was denied")]
    Denied,
    #[error("location is currently unknown")]
    LocationUnknown,
    #[error("heading could not be determined")]
    HeadingFailure,
    #[error("sensor failure: {0}")]
    Sensor(String),
}

#[derive(Error, Clone, Debug, PartialEq)]
pub enum GeocodingError {
    #[error("no placemark found for the coordinate")]
    NoResult,
    #[error("geocoding service failure: {0}")]
    Service(String),
    #[error("geocoding service dropped the request without answering")]
    Interrupted,
    #[error("no geocoding backend is available")]
    Unavailable,
}
