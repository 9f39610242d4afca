use chrono::{DateTime, Utc};

#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate { latitude, longitude }
    }
}

/// A negative `horizontal_accuracy` marks the fix as invalid.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,            // In meters
    pub horizontal_accuracy: f64, // In meters
    pub vertical_accuracy: f64,   // In meters
    pub course: f64,              // In degrees, relative to true north
    pub speed: f64,               // In meters per second
    pub timestamp: DateTime<Utc>,
}

impl LocationFix {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn is_valid(&self) -> bool {
        self.horizontal_accuracy >= 0.0
    }
}
