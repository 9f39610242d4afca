use crate::domain::LocationFix;
use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

impl<'de> Deserialize<'de> for LocationFix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Debug, Deserialize)]
        pub struct Inner {
            latitude: f64,
            longitude: f64,
            #[serde(default)]
            altitude_m: f64,
            horizontal_accuracy_m: f64,
            #[serde(default = "unknown")]
            vertical_accuracy_m: f64,
            #[serde(default = "unknown")]
            course_deg: f64,
            #[serde(default = "unknown")]
            speed_mps: f64,
            timestamp: DateTime<Utc>,
        }

        fn unknown() -> f64 {
            -1.0
        }

        let inner = Inner::deserialize(deserializer)?;
        if !(inner.latitude >= -90.0 && inner.latitude <= 90.0) {
            return Err(Error::custom(format!("invalid fix latitude: {}, must be between -90 and 90", inner.latitude)));
        }

        if !(inner.longitude >= -180.0 && inner.longitude <= 180.0) {
            return Err(Error::custom(format!("invalid fix longitude: {}, must be between -180 and 180", inner.longitude)));
        }

        Ok(LocationFix {
            latitude: inner.latitude,
            longitude: inner.longitude,
            altitude: inner.altitude_m,
            horizontal_accuracy: inner.horizontal_accuracy_m,
            vertical_accuracy: inner.vertical_accuracy_m,
            course: inner.course_deg,
            speed: inner.speed_mps,
            timestamp: inner.timestamp,
        })
    }
}
