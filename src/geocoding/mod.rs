mod adapter;
mod completion;
mod geocoder;
mod polling;
mod selection;

pub use adapter::GeocodingAdapter;
pub use completion::{Completion, CompletionGeocoder, CompletionGeocodingService, GeocodedPlace};
pub use geocoder::Geocoder;
pub use polling::{LookupStatus, PollingGeocoder, PollingGeocodingService, RequestId};
pub use selection::{GeocoderStrategy, select_geocoder};
