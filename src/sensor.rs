use crate::domain::SensorConfiguration;

/// Pushes fixes and failures as `ControllerEvent::Fix` and `ControllerEvent::SensorFailed`.
pub trait LocationSensor: Send + Sync {
    fn start(&self);

    fn stop(&self);

    fn configure(&self, configuration: &SensorConfiguration);
}
