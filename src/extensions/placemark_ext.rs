use crate::domain::Placemark;

pub trait PlacemarkExt {
    /// Returns a display address built from the thoroughfare and sub-thoroughfare, e.g. `Main St, 42`.
    fn address(&self) -> Option<String>;
}

impl PlacemarkExt for Placemark {
    fn address(&self) -> Option<String> {
        let thoroughfare = self.thoroughfare.as_deref()?;
        match self.sub_thoroughfare.as_deref() {
            Some(sub_thoroughfare) => Some(format!("{}, {}", thoroughfare, sub_thoroughfare)),
            None => Some(thoroughfare.to_string()),
        }
    }
}
