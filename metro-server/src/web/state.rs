//! Application state for the web layer.

use std::sync::Arc;

use crate::bookings::BookingRecorder;
use crate::cache::{CachedPlanner, RouteCacheConfig};
use crate::network::NetworkModel;
use crate::planner::PlannerConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Route planner with result cache
    pub planner: Arc<CachedPlanner>,

    /// Recorded bookings
    pub bookings: BookingRecorder,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        network: NetworkModel,
        config: PlannerConfig,
        cache_config: &RouteCacheConfig,
        bookings: BookingRecorder,
    ) -> Self {
        Self {
            planner: Arc::new(CachedPlanner::new(
                Arc::new(network),
                Arc::new(config),
                cache_config,
            )),
            bookings,
        }
    }
}
