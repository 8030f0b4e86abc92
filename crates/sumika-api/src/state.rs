//! Shared application state

use std::sync::Arc;
use std::time::Instant;
use sumika_core::{ContainerStore, ResourceStore};

/// Collaborators injected into every handler
///
/// Both stores are trait objects: the protocol layer never depends on a
/// concrete backend. No other state crosses request boundaries.
#[derive(Clone)]
pub struct AppState {
    pub resources: Arc<dyn ResourceStore>,
    pub containers: Arc<dyn ContainerStore>,
    pub start_time: Instant,
}

impl AppState {
    /// Wire up the handlers with the given collaborators
    pub fn new(resources: Arc<dyn ResourceStore>, containers: Arc<dyn ContainerStore>) -> Self {
        AppState {
            resources,
            containers,
            start_time: Instant::now(),
        }
    }
}
