mod location_controller;
mod shared;
mod state;

pub use location_controller::LocationController;
pub use shared::{install_shared, shared};
pub use state::{ControllerState, SessionStatus};
