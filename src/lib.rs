//! Location fix filtering and reverse-geocoding coordination.

pub mod app_config;
pub mod controller;
pub mod domain;
pub mod extensions;
pub mod fix_validator;
pub mod geocoding;
mod location_fix_deserializer;
pub mod observer_registry;
pub mod observers;
pub mod sensor;

pub use controller::LocationController;
