#![allow(dead_code)]

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use geo_types::Point;
use itinera_directions::{
    directions_request::DirectionsRequest, error::DirectionsError,
    optimized_route::OptimizedRoute, route_optimizer::RouteOptimizer,
};
use itinera_trip::{catalog::Catalog, location::LocationId};

pub fn fixture_catalog() -> Catalog {
    Catalog::from_file(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/locations.json"
    ))
    .unwrap()
}

pub fn temp_dir() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("itinera-it-{}", uuid::Uuid::new_v4()))
}

pub fn ids(ids: &[u64]) -> Vec<LocationId> {
    ids.iter().copied().map(LocationId::new).collect()
}

/// Answers every request with the same waypoint order, or with an error
/// status when no order is scripted.
pub struct ScriptedOptimizer {
    waypoint_order: Option<Vec<usize>>,
    path: Vec<Point>,
    delay: Duration,
    calls: AtomicUsize,
    requests: parking_lot::Mutex<Vec<DirectionsRequest>>,
}

impl ScriptedOptimizer {
    pub fn returning(waypoint_order: Vec<usize>) -> Self {
        Self {
            waypoint_order: Some(waypoint_order),
            path: vec![Point::new(79.8428, 6.9344), Point::new(81.5016, 6.3728)],
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            requests: parking_lot::Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            waypoint_order: None,
            ..Self::returning(vec![])
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<DirectionsRequest> {
        self.requests.lock().last().cloned()
    }
}

impl RouteOptimizer for ScriptedOptimizer {
    async fn optimize_route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<OptimizedRoute, DirectionsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.waypoint_order {
            Some(order) => Ok(OptimizedRoute {
                waypoint_order: order.clone(),
                path: self.path.clone(),
            }),
            None => Err(DirectionsError::Status {
                status: String::from("ZERO_RESULTS"),
                message: String::from("No route could be found"),
            }),
        }
    }
}
