use crate::controller::LocationController;
use std::sync::{Arc, OnceLock};

static SHARED_CONTROLLER: OnceLock<Arc<LocationController>> = OnceLock::new();

pub fn install_shared(controller: Arc<LocationController>) -> Result<(), Arc<LocationController>> {
    SHARED_CONTROLLER.set(controller)
}

pub fn shared() -> Option<Arc<LocationController>> {
    SHARED_CONTROLLER.get().cloned()
}
