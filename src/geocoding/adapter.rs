use crate::domain::events::{ControllerEvent, GeocodingOutcome};
use crate::domain::{Coordinate, GeocodingError, Placemark};
use crate::geocoding::Geocoder;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, debug_span, warn};

/// Outcomes must pass through [`GeocodingAdapter::complete`], which drops all but the latest submission's answer.
pub struct GeocodingAdapter {
    geocoder: Arc<dyn Geocoder>,
    tx: Sender<ControllerEvent>,
    in_flight: Mutex<InFlight>,
}

#[derive(Default)]
struct InFlight {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl GeocodingAdapter {
    pub fn new(geocoder: Arc<dyn Geocoder>, tx: Sender<ControllerEvent>) -> Self {
        GeocodingAdapter {
            geocoder,
            tx,
            in_flight: Mutex::new(InFlight::default()),
        }
    }

    pub fn geocoder_name(&self) -> &'static str {
        self.geocoder.name()
    }

    /// Fails with [`GeocodingError::Unavailable`] when called outside a tokio runtime.
    pub fn submit(&self, coordinate: Coordinate) -> Result<u64, GeocodingError> {
        let Ok(runtime) = Handle::try_current() else {
            warn!("⚠️ No tokio runtime to resolve placemarks on");
            return Err(GeocodingError::Unavailable);
        };

        let mut in_flight = self.lock();
        if let Some(task) = in_flight.task.take() {
            debug!(generation = in_flight.generation, "⏭️ Superseding unfinished geocoding request");
            task.abort();
        }

        in_flight.generation += 1;
        let generation = in_flight.generation;

        let geocoder = self.geocoder.clone();
        let tx = self.tx.clone();
        let span = debug_span!("geocoding", generation, backend = geocoder.name());
        in_flight.task = Some(runtime.spawn(
            async move {
                debug!(latitude = coordinate.latitude, longitude = coordinate.longitude, "🗺️ Resolving placemark...");
                let result = geocoder.resolve(coordinate).await;
                let outcome = GeocodingOutcome {
                    generation,
                    coordinate,
                    result,
                };
                if tx.send(ControllerEvent::Geocoded(outcome)).await.is_err() {
                    warn!("⚠️ Dropping geocoding outcome, the controller stopped listening");
                }
            }
            .instrument(span),
        ));

        Ok(generation)
    }

    pub fn complete(&self, outcome: GeocodingOutcome) -> Option<Result<Placemark, GeocodingError>> {
        let mut in_flight = self.lock();
        if outcome.generation != in_flight.generation {
            debug!(
                generation = outcome.generation,
                latest = in_flight.generation,
                "⏭️ Discarding superseded geocoding outcome"
            );
            return None;
        }

        in_flight.task = None;
        Some(outcome.result)
    }

    pub fn is_resolving(&self) -> bool {
        self.lock().task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn cancel(&self) {
        let mut in_flight = self.lock();
        if let Some(task) = in_flight.task.take() {
            task.abort();
        }
        in_flight.generation += 1;
    }

    fn lock(&self) -> MutexGuard<'_, InFlight> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for GeocodingAdapter {
    fn drop(&mut self) {
        if let Some(task) = self.lock().task.take() {
            task.abort();
        }
    }
}
