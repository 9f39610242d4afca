use crate::domain::GeocodingError;
use crate::geocoding::{CompletionGeocoder, CompletionGeocodingService, Geocoder, PollingGeocoder, PollingGeocodingService};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeocoderStrategy {
    Polling,
    #[default]
    Completion,
}

pub fn select_geocoder(
    preferred: GeocoderStrategy,
    polling: Option<Arc<dyn PollingGeocodingService>>,
    completion: Option<Arc<dyn CompletionGeocodingService>>,
    poll_interval: Duration,
) -> Result<Arc<dyn Geocoder>, GeocodingError> {
    let polling = polling.map(|service| Arc::new(PollingGeocoder::new(service, poll_interval)) as Arc<dyn Geocoder>);
    let completion = completion.map(|service| Arc::new(CompletionGeocoder::new(service)) as Arc<dyn Geocoder>);

    let (first_choice, second_choice) = match preferred {
        GeocoderStrategy::Polling => (polling, completion),
        GeocoderStrategy::Completion => (completion, polling),
    };

    match (first_choice, second_choice) {
        (Some(geocoder), _) => {
            info!(strategy = geocoder.name(), "🗺️ Selected geocoder");
            Ok(geocoder)
        }
        (None, Some(geocoder)) => {
            warn!(strategy = geocoder.name(), "⚠️ Preferred geocoder {:?} is unavailable, falling back", preferred);
            Ok(geocoder)
        }
        (None, None) => Err(GeocodingError::Unavailable),
    }
}
