use crate::domain::{Coordinate, GeocodingError, Placemark};
use crate::geocoding::{Geocoder, RequestId};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, instrument, trace};

#[derive(Clone, Default, Debug, PartialEq)]
pub struct GeocodedPlace {
    pub name: Option<String>,
    pub thoroughfare: Option<String>,
    pub sub_thoroughfare: Option<String>,
    pub locality: Option<String>,
    pub administrative_area: Option<String>,
    pub country: Option<String>,
    pub iso_country_code: Option<String>,
}

impl GeocodedPlace {
    fn into_placemark(self, coordinate: Coordinate) -> Placemark {
        Placemark {
            thoroughfare: self.thoroughfare,
            sub_thoroughfare: self.sub_thoroughfare,
            locality: self.locality,
            region: self.administrative_area,
            country: self.country,
            coordinate,
        }
    }
}

pub type Completion = Box<dyn FnOnce(Result<Vec<GeocodedPlace>, String>) + Send>;

/// `cancel` must only affect the request it is given; a late cancel of a finished or replaced request is a no-op.
pub trait CompletionGeocodingService: Send + Sync {
    fn reverse_geocode(&self, coordinate: Coordinate, completion: Completion) -> RequestId;

    fn cancel(&self, request: RequestId);
}

pub struct CompletionGeocoder {
    service: Arc<dyn CompletionGeocodingService>,
}

impl CompletionGeocoder {
    pub fn new(service: Arc<dyn CompletionGeocodingService>) -> Self {
        CompletionGeocoder { service }
    }
}

#[async_trait]
impl Geocoder for CompletionGeocoder {
    fn name(&self) -> &'static str {
        "completion"
    }

    #[instrument(skip(self))]
    async fn resolve(&self, coordinate: Coordinate) -> Result<Placemark, GeocodingError> {
        let (tx, rx) = oneshot::channel();
        let request = self.service.reverse_geocode(
            coordinate,
            Box::new(move |result| {
                if tx.send(result).is_err() {
                    trace!("Geocoding answer arrived after the request was dropped");
                }
            }),
        );

        let mut guard = CancelOnDrop {
            service: self.service.as_ref(),
            request,
            armed: true,
        };
        let answer = rx.await;
        guard.armed = false;

        match answer {
            Ok(Ok(places)) => {
                debug!(candidates = places.len(), "Received geocoding candidates");
                places
                    .into_iter()
                    .next()
                    .map(|place| place.into_placemark(coordinate))
                    .ok_or(GeocodingError::NoResult)
            }
            Ok(Err(message)) => Err(GeocodingError::Service(message)),
            Err(_) => Err(GeocodingError::Interrupted),
        }
    }
}

struct CancelOnDrop<'a> {
    service: &'a dyn CompletionGeocodingService,
    request: RequestId,
    armed: bool,
}

impl Drop for CancelOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed {
            debug!(request = self.request.0, "🚫 Cancelling unfinished reverse geocode");
            self.service.cancel(self.request);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use std::time::Duration;
    use test_log::test;

    enum Behaviour {
        Answer(Result<Vec<GeocodedPlace>, String>),
        Drop,
        Hold,
    }

    struct FakeService {
        behaviour: Mutex<Option<Behaviour>>,
        held: Mutex<Vec<Completion>>,
        cancelled: Mutex<Vec<RequestId>>,
    }

    impl FakeService {
        fn new(behaviour: Behaviour) -> Arc<Self> {
            Arc::new(FakeService {
                behaviour: Mutex::new(Some(behaviour)),
                held: Mutex::new(Vec::new()),
                cancelled: Mutex::new(Vec::new()),
            })
        }
    }

    impl CompletionGeocodingService for FakeService {
        fn reverse_geocode(&self, _coordinate: Coordinate, completion: Completion) -> RequestId {
            match self.behaviour.lock().unwrap().take() {
                Some(Behaviour::Answer(result)) => completion(result),
                Some(Behaviour::Hold) => self.held.lock().unwrap().push(completion),
                Some(Behaviour::Drop) | None => drop(completion),
            }
            RequestId(11)
        }

        fn cancel(&self, request: RequestId) {
            self.cancelled.lock().unwrap().push(request);
        }
    }

    fn place(thoroughfare: &str) -> GeocodedPlace {
        GeocodedPlace {
            name: Some("Nieuwe Kerk".to_string()),
            thoroughfare: Some(thoroughfare.to_string()),
            sub_thoroughfare: Some("80".to_string()),
            locality: Some("Delft".to_string()),
            administrative_area: Some("Zuid-Holland".to_string()),
            country: Some("Netherlands".to_string()),
            iso_country_code: Some("NL".to_string()),
        }
    }

    #[test(tokio::test)]
    async fn resolves_to_the_first_candidate() -> Result<(), GeocodingError> {
        let service = FakeService::new(Behaviour::Answer(Ok(vec![place("Markt"), place("Oude Delft")])));
        let geocoder = CompletionGeocoder::new(service.clone());
        let coordinate = Coordinate::new(52.0122, 4.3609);

        let placemark = geocoder.resolve(coordinate).await?;

        assert_eq!(
            placemark,
            Placemark {
                thoroughfare: Some("Markt".to_string()),
                sub_thoroughfare: Some("80".to_string()),
                locality: Some("Delft".to_string()),
                region: Some("Zuid-Holland".to_string()),
                country: Some("Netherlands".to_string()),
                coordinate,
            }
        );
        assert!(service.cancelled.lock().unwrap().is_empty());
        Ok(())
    }

    #[test(tokio::test)]
    async fn empty_candidate_list_is_no_result() {
        let geocoder = CompletionGeocoder::new(FakeService::new(Behaviour::Answer(Ok(vec![]))));

        assert_eq!(geocoder.resolve(Coordinate::default()).await, Err(GeocodingError::NoResult));
    }

    #[test(tokio::test)]
    async fn service_failure_is_reported() {
        let geocoder = CompletionGeocoder::new(FakeService::new(Behaviour::Answer(Err("network unreachable".to_string()))));

        assert_eq!(
            geocoder.resolve(Coordinate::default()).await,
            Err(GeocodingError::Service("network unreachable".to_string()))
        );
    }

    #[test(tokio::test)]
    async fn dropped_completion_is_interrupted() {
        let geocoder = CompletionGeocoder::new(FakeService::new(Behaviour::Drop));

        assert_eq!(geocoder.resolve(Coordinate::default()).await, Err(GeocodingError::Interrupted));
    }

    #[test(tokio::test)]
    async fn dropping_an_unanswered_request_cancels_it() {
        let service = FakeService::new(Behaviour::Hold);
        let geocoder = CompletionGeocoder::new(service.clone());

        let result = tokio::time::timeout(Duration::from_millis(10), geocoder.resolve(Coordinate::default())).await;

        assert!(result.is_err());
        assert_eq!(*service.cancelled.lock().unwrap(), vec![RequestId(11)]);

        // A late answer is swallowed
        let completion = service.held.lock().unwrap().pop().unwrap();
        completion(Ok(vec![place("Markt")]));
    }
}
