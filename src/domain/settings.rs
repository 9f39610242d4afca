use serde::Deserialize;

/// Accuracy levels the sensor can be asked for. Better accuracy drains the battery faster and is never guaranteed.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesiredAccuracy {
    BestForNavigation,
    #[default]
    Best,
    NearestTenMeters,
    HundredMeters,
    Kilometer,
    ThreeKilometers,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocationSettings {
    pub desired_accuracy: DesiredAccuracy,
    pub distance_filter: Option<f64>, // In meters, `None` reports every movement
    pub heading_filter: Option<f64>,  // In degrees, `None` reports every heading change
    pub strict_mode: bool,
    pub reject_repeated_locations: bool,
}

impl Default for LocationSettings {
    fn default() -> Self {
        LocationSettings {
            desired_accuracy: DesiredAccuracy::Best,
            distance_filter: None,
            heading_filter: Some(1.0),
            strict_mode: true,
            reject_repeated_locations: false,
        }
    }
}

impl LocationSettings {
    pub fn sensor_configuration(&self) -> SensorConfiguration {
        SensorConfiguration {
            desired_accuracy: self.desired_accuracy,
            distance_filter: self.distance_filter,
            heading_filter: self.heading_filter,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorConfiguration {
    pub desired_accuracy: DesiredAccuracy,
    pub distance_filter: Option<f64>,
    pub heading_filter: Option<f64>,
}
