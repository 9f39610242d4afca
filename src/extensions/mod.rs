mod placemark_ext;

pub use placemark_ext::PlacemarkExt;
