use crate::controller::{ControllerState, SessionStatus};
use crate::domain::events::ControllerEvent;
use crate::domain::{DesiredAccuracy, GeocodingError, LocationError, LocationFix, LocationSettings, Placemark};
use crate::fix_validator::{self, Verdict};
use crate::geocoding::{Geocoder, GeocodingAdapter};
use crate::observer_registry::ObserverRegistry;
use crate::observers::{GeocoderObserver, LocationObserver};
use crate::sensor::LocationSensor;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::{Receiver, Sender};
use tracing::{debug, info, instrument, warn};

/// Observers are called without any internal lock held, so they may call back into the controller.
pub struct LocationController {
    inner: Mutex<Inner>,
    sensor: Arc<dyn LocationSensor>,
    geocoding: GeocodingAdapter,
    location_observers: ObserverRegistry<dyn LocationObserver, LocationFix>,
    geocoder_observers: ObserverRegistry<dyn GeocoderObserver, Placemark>,
}

#[derive(Default)]
struct Inner {
    status: SessionStatus,
    state: ControllerState,
    settings: LocationSettings,
}

impl LocationController {
    /// `tx` must feed the receiver given to [`LocationController::listen`].
    pub fn new(sensor: Arc<dyn LocationSensor>, geocoder: Arc<dyn Geocoder>, settings: LocationSettings, tx: Sender<ControllerEvent>) -> Self {
        sensor.configure(&settings.sensor_configuration());

        LocationController {
            inner: Mutex::new(Inner {
                settings,
                ..Inner::default()
            }),
            sensor,
            geocoding: GeocodingAdapter::new(geocoder, tx),
            location_observers: ObserverRegistry::<dyn LocationObserver, LocationFix>::new(|observer, fix| observer.on_location_updated(fix)),
            geocoder_observers: ObserverRegistry::<dyn GeocoderObserver, Placemark>::new(|observer, placemark| {
                observer.on_placemark_updated(placemark)
            }),
        }
    }

    #[instrument(skip_all)]
    pub async fn listen(&self, mut rx: Receiver<ControllerEvent>) {
        info!(geocoder = self.geocoding.geocoder_name(), "📡 Listening for location events");
        while let Some(event) = rx.recv().await {
            self.handle(event);
        }
        info!("📡 Event channel closed, stopped listening");
    }

    pub fn handle(&self, event: ControllerEvent) {
        match event {
            ControllerEvent::Fix(fix) => self.on_raw_fix(fix),
            ControllerEvent::SensorFailed(error) => self.on_sensor_error(error),
            ControllerEvent::Geocoded(outcome) => match self.geocoding.complete(outcome) {
                Some(Ok(placemark)) => self.on_geocoding_result(placemark),
                Some(Err(error)) => self.on_geocoding_error(error),
                None => {}
            },
        }
    }

    pub fn resume_updating_location(&self) {
        {
            let mut inner = self.lock();
            if inner.status == SessionStatus::Active {
                debug!("Location updates are already running");
                return;
            }

            inner.status = SessionStatus::Active;
            inner.state.session_start = Some(Utc::now());
            inner.state.last_location_error = None;
        }

        info!("▶️ Resuming location updates");
        self.sensor.start();
    }

    pub fn pause_updating_location(&self) {
        {
            let mut inner = self.lock();
            if inner.status == SessionStatus::Idle {
                debug!("Location updates are already paused");
                return;
            }

            inner.status = SessionStatus::Idle;
        }

        info!("⏸️ Pausing location updates");
        self.sensor.stop();
    }

    pub fn on_raw_fix(&self, fix: LocationFix) {
        let verdict = {
            let mut inner = self.lock();
            let verdict = fix_validator::evaluate(&fix, inner.state.current_location.as_ref(), inner.state.session_start, &inner.settings);
            if verdict.is_accepted() {
                inner.state.current_location = Some(fix.clone());
            }
            verdict
        };

        if let Verdict::Rejected(reason) = verdict {
            debug!(latitude = fix.latitude, longitude = fix.longitude, %reason, "🔇 Ignoring fix");
            return;
        }

        debug!(
            latitude = fix.latitude,
            longitude = fix.longitude,
            accuracy = fix.horizontal_accuracy,
            "📍 Accepted fix"
        );
        self.location_observers.notify_all(&fix);
        if let Err(error) = self.geocoding.submit(fix.coordinate()) {
            self.on_geocoding_error(error);
        }
    }

    pub fn on_sensor_error(&self, error: LocationError) {
        warn!("⚠️ Location sensor failed: {}", error);
        self.lock().state.last_location_error = Some(error.clone());
        self.location_observers.notify_each(|observer| observer.on_location_failed(&error));
    }

    pub fn on_geocoding_result(&self, placemark: Placemark) {
        debug!(locality = placemark.locality.as_deref(), "🏠 Resolved placemark");
        self.lock().state.current_placemark = Some(placemark.clone());
        self.geocoder_observers.notify_all(&placemark);
    }

    pub fn on_geocoding_error(&self, error: GeocodingError) {
        warn!("⚠️ Geocoding failed: {}", error);
        self.lock().state.last_geocoding_error = Some(error.clone());
        self.geocoder_observers.notify_each(|observer| observer.on_geocoding_failed(&error));
    }

    pub fn add_location_delegate(&self, observer: Arc<dyn LocationObserver>) {
        let current_location = self.current_location();
        self.location_observers.add(observer, current_location);
    }

    pub fn remove_location_delegate(&self, observer: &Arc<dyn LocationObserver>) {
        self.location_observers.remove(observer);
    }

    pub fn add_geocoder_delegate(&self, observer: Arc<dyn GeocoderObserver>) {
        let current_placemark = self.current_placemark();
        self.geocoder_observers.add(observer, current_placemark);
    }

    pub fn remove_geocoder_delegate(&self, observer: &Arc<dyn GeocoderObserver>) {
        self.geocoder_observers.remove(observer);
    }

    pub fn current_location(&self) -> Option<LocationFix> {
        self.lock().state.current_location.clone()
    }

    pub fn current_placemark(&self) -> Option<Placemark> {
        self.lock().state.current_placemark.clone()
    }

    pub fn session_start(&self) -> Option<DateTime<Utc>> {
        self.lock().state.session_start
    }

    pub fn last_location_error(&self) -> Option<LocationError> {
        self.lock().state.last_location_error.clone()
    }

    pub fn last_geocoding_error(&self) -> Option<GeocodingError> {
        self.lock().state.last_geocoding_error.clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.lock().status
    }

    pub fn state(&self) -> ControllerState {
        self.lock().state.clone()
    }

    pub fn settings(&self) -> LocationSettings {
        self.lock().settings.clone()
    }

    pub fn set_desired_accuracy(&self, desired_accuracy: DesiredAccuracy) {
        self.update_sensor_settings(|settings| settings.desired_accuracy = desired_accuracy);
    }

    pub fn set_distance_filter(&self, distance_filter: Option<f64>) {
        self.update_sensor_settings(|settings| settings.distance_filter = distance_filter);
    }

    pub fn set_heading_filter(&self, heading_filter: Option<f64>) {
        self.update_sensor_settings(|settings| settings.heading_filter = heading_filter);
    }

    pub fn set_strict_mode(&self, strict_mode: bool) {
        self.lock().settings.strict_mode = strict_mode;
    }

    pub fn set_reject_repeated_locations(&self, reject_repeated_locations: bool) {
        self.lock().settings.reject_repeated_locations = reject_repeated_locations;
    }

    fn update_sensor_settings(&self, update: impl FnOnce(&mut LocationSettings)) {
        let configuration = {
            let mut inner = self.lock();
            update(&mut inner.settings);
            inner.settings.sensor_configuration()
        };

        debug!(configuration = ?configuration, "Reconfiguring location sensor");
        self.sensor.configure(&configuration);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
