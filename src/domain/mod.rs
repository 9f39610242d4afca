mod errors;
pub mod events;
mod location_fix;
mod placemark;
mod settings;

pub use errors::{GeocodingError, LocationError};
pub use location_fix::{Coordinate, LocationFix};
pub use placemark::Placemark;
pub use settings::{DesiredAccuracy, LocationSettings, SensorConfiguration};
