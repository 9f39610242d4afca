use crate::domain::{Coordinate, GeocodingError, Placemark};
use crate::geocoding::Geocoder;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, instrument, trace};

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub enum LookupStatus {
    Pending,
    /// The address dictionary, keyed by `Thoroughfare`, `SubThoroughfare`, `City`, `State` and `Country`.
    Found(HashMap<String, String>),
    NotFound,
    Failed(String),
}

pub trait PollingGeocodingService: Send + Sync {
    fn submit(&self, coordinate: Coordinate) -> Result<RequestId, String>;

    fn poll(&self, request: RequestId) -> LookupStatus;

    fn cancel(&self, request: RequestId);
}

pub struct PollingGeocoder {
    service: Arc<dyn PollingGeocodingService>,
    poll_interval: Duration,
}

impl PollingGeocoder {
    pub fn new(service: Arc<dyn PollingGeocodingService>, poll_interval: Duration) -> Self {
        PollingGeocoder {
            service,
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
        }
    }
}

#[async_trait]
impl Geocoder for PollingGeocoder {
    fn name(&self) -> &'static str {
        "polling"
    }

    #[instrument(skip(self))]
    async fn resolve(&self, coordinate: Coordinate) -> Result<Placemark, GeocodingError> {
        let request = self.service.submit(coordinate).map_err(GeocodingError::Service)?;
        let mut guard = CancelOnDrop {
            service: self.service.as_ref(),
            request,
            armed: true,
        };

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let result = loop {
            ticker.tick().await;
            match self.service.poll(request) {
                LookupStatus::Pending => trace!(request = request.0, "Lookup still pending"),
                LookupStatus::Found(address) => break Ok(placemark_from(address, coordinate)),
                LookupStatus::NotFound => break Err(GeocodingError::NoResult),
                LookupStatus::Failed(message) => break Err(GeocodingError::Service(message)),
            }
        };

        guard.armed = false;
        result
    }
}

struct CancelOnDrop<'a> {
    service: &'a dyn PollingGeocodingService,
    request: RequestId,
    armed: bool,
}

impl Drop for CancelOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed {
            debug!(request = self.request.0, "🚫 Cancelling unfinished lookup");
            self.service.cancel(self.request);
        }
    }
}

fn placemark_from(mut address: HashMap<String, String>, coordinate: Coordinate) -> Placemark {
    let mut take = |key: &str| address.remove(key).filter(|value| !value.trim().is_empty());

    Placemark {
        thoroughfare: take("Thoroughfare"),
        sub_thoroughfare: take("SubThoroughfare"),
        locality: take("City"),
        region: take("State"),
        country: take("Country"),
        coordinate,
    }
}
