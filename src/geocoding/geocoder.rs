use crate::domain::{Coordinate, GeocodingError, Placemark};
use async_trait::async_trait;

#[async_trait]
pub trait Geocoder: Send + Sync {
    fn name(&self) -> &'static str;

    /// Resolves `coordinate` into a placemark. Dropping the returned future cancels the backend request.
    async fn resolve(&self, coordinate: Coordinate) -> Result<Placemark, GeocodingError>;
}
