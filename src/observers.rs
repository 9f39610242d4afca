use crate::domain::{GeocodingError, LocationError, LocationFix, Placemark};

pub trait LocationObserver: Send + Sync {
    fn on_location_updated(&self, fix: &LocationFix);

    fn on_location_failed(&self, error: &LocationError);
}

pub trait GeocoderObserver: Send + Sync {
    fn on_placemark_updated(&self, placemark: &Placemark);

    fn on_geocoding_failed(&self, error: &GeocodingError);
}
