use std::{cell::RefCell, time::Duration};

use fxhash::FxHashSet;
use geo_types::Point;
use itinera_directions::{
    directions_request::DirectionsRequest, error::DirectionsError,
    optimized_route::OptimizedRoute, route_optimizer::RouteOptimizer,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    catalog::Catalog,
    error::TripError,
    itinerary::{RouteResult, resolve},
    location::{Coordinates, LocationId, LocationRecord},
    storage::TripStorage,
    trip_store::{Membership, TripStore},
};

#[derive(Debug, Error)]
pub enum ReorderFailure {
    #[error("route optimization failed: {0}")]
    Service(#[from] DirectionsError),

    #[error("route optimization timed out after {0:?}")]
    Timeout(Duration),

    #[error("expected an order of {expected} waypoints, got {received:?}")]
    InvalidWaypointOrder {
        expected: usize,
        received: Vec<usize>,
    },

    #[error(transparent)]
    Trip(#[from] TripError),
}

#[derive(Debug)]
pub enum ReorderOutcome {
    /// The trip now follows the optimized order
    Applied,

    /// Fewer than two resolvable stops, nothing was requested
    NotEnoughStops,

    /// The trip changed while the request was in flight, response discarded
    Stale,

    Failed(ReorderFailure),
}

/// A request issued for the trip as it was when [`ItineraryReorderer::prepare`] ran.
pub struct PendingReorder {
    request: DirectionsRequest,
    stops: Vec<LocationRecord>,
    membership: Membership,
}

impl PendingReorder {
    pub fn request(&self) -> &DirectionsRequest {
        &self.request
    }

    pub fn stops(&self) -> &[LocationRecord] {
        &self.stops
    }

    fn waypoint_count(&self) -> usize {
        self.stops.len() - 2
    }

    /// Origin, waypoints in the given order, destination.
    fn reordered_stops(&self, waypoint_order: &[usize]) -> Vec<LocationRecord> {
        let last = self.stops.len() - 1;

        std::iter::once(&self.stops[0])
            .chain(waypoint_order.iter().map(|&index| &self.stops[index + 1]))
            .chain(std::iter::once(&self.stops[last]))
            .cloned()
            .collect()
    }
}

/// Reorders the trip with an external route optimization, keeping the first
/// and last stops in place.
#[derive(Default)]
pub struct ItineraryReorderer {
    route: Option<RouteResult>,
}

impl ItineraryReorderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successful optimization, if any.
    pub fn route(&self) -> Option<&RouteResult> {
        self.route.as_ref()
    }

    /// Builds the request for the resolvable stops of the trip, `None` with fewer than two.
    pub fn prepare<S>(store: &TripStore<S>, catalog: &Catalog) -> Option<PendingReorder>
    where
        S: TripStorage,
    {
        let stops: Vec<LocationRecord> = resolve(store.ids(), catalog)
            .into_iter()
            .cloned()
            .collect();

        if stops.len() < 2 {
            return None;
        }

        let points: Vec<Point> = stops.iter().map(Point::from).collect();
        let last = points.len() - 1;
        let request = DirectionsRequest::optimized(
            points[0],
            points[last],
            points[1..last].iter().copied(),
        );

        Some(PendingReorder {
            request,
            stops,
            membership: store.membership(),
        })
    }

    /// Applies the response of a request prepared with [`ItineraryReorderer::prepare`].
    ///
    /// The trip is reloaded from storage first, so changes written by another
    /// store while waiting make the response stale. Anything but a valid
    /// response for the current trip leaves both the trip and the previous
    /// route untouched.
    pub fn complete<S>(
        &mut self,
        pending: PendingReorder,
        response: Result<OptimizedRoute, ReorderFailure>,
        store: &mut TripStore<S>,
    ) -> ReorderOutcome
    where
        S: TripStorage,
    {
        let route = match response {
            Ok(route) => route,
            Err(err) => {
                warn!("Keeping the current trip order: {}", err);
                return ReorderOutcome::Failed(err);
            }
        };

        if let Err(err) = store.reload() {
            warn!("Keeping the current trip order: {}", err);
            return ReorderOutcome::Failed(err.into());
        }

        if store.membership() != pending.membership {
            warn!("Discarding optimized route, the trip changed in the meantime");
            return ReorderOutcome::Stale;
        }

        if !route.is_permutation_of(pending.waypoint_count()) {
            let failure = ReorderFailure::InvalidWaypointOrder {
                expected: pending.waypoint_count(),
                received: route.waypoint_order,
            };
            warn!("Keeping the current trip order: {}", failure);
            return ReorderOutcome::Failed(failure);
        }

        let stops = pending.reordered_stops(&route.waypoint_order);

        let order = full_order(&stops, store.ids());
        if let Err(err) = store.replace_order(&order) {
            warn!("Keeping the current trip order: {}", err);
            return ReorderOutcome::Failed(err.into());
        }

        let path = if route.path.is_empty() {
            None
        } else {
            Some(route.path.into_iter().map(Coordinates::from).collect())
        };

        info!("Applied optimized order to {} stops", stops.len());
        self.route = Some(RouteResult { stops, path });

        ReorderOutcome::Applied
    }

    /// Optimizes the trip order.
    ///
    /// The store is only borrowed before the request is sent and after the
    /// response arrived, so it stays usable while waiting.
    pub async fn optimize<S, O>(
        &mut self,
        store: &RefCell<TripStore<S>>,
        catalog: &Catalog,
        optimizer: &O,
        timeout: Duration,
    ) -> ReorderOutcome
    where
        S: TripStorage,
        O: RouteOptimizer,
    {
        let pending = {
            let store = store.borrow();
            Self::prepare(&*store, catalog)
        };

        let Some(pending) = pending else {
            debug!("Not enough stops to optimize the trip");
            return ReorderOutcome::NotEnoughStops;
        };

        debug!(
            "Optimizing trip with {} waypoints",
            pending.request().waypoint_count()
        );

        let response =
            match tokio::time::timeout(timeout, optimizer.optimize_route(pending.request())).await {
                Ok(Ok(route)) => Ok(route),
                Ok(Err(err)) => Err(ReorderFailure::Service(err)),
                Err(_) => Err(ReorderFailure::Timeout(timeout)),
            };

        let mut store = store.borrow_mut();
        self.complete(pending, response, &mut *store)
    }
}

/// Reordered stops followed by the trip ids the catalog could not resolve, in trip order.
fn full_order(stops: &[LocationRecord], trip_ids: &[LocationId]) -> Vec<LocationId> {
    let resolved: FxHashSet<LocationId> = stops.iter().map(|stop| stop.id).collect();

    stops
        .iter()
        .map(|stop| stop.id)
        .chain(trip_ids.iter().copied().filter(|id| !resolved.contains(id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        storage::{MemoryStorage, TRIP_STORAGE_KEY},
        test_utils::{ids, sample_catalog},
    };

    fn route(order: Vec<usize>) -> Result<OptimizedRoute, ReorderFailure> {
        Ok(OptimizedRoute {
            waypoint_order: order,
            path: vec![Point::new(80.7603, 7.957), Point::new(80.217, 6.0269)],
        })
    }

    #[test]
    fn test_prepare_groups_origin_waypoints_destination() {
        let storage = MemoryStorage::with_entry(TRIP_STORAGE_KEY, "[1,2,3,4]");
        let store = TripStore::open(&storage);
        let catalog = sample_catalog();

        let pending = ItineraryReorderer::prepare(&store, &catalog).unwrap();
        let request = pending.request();

        assert_eq!(request.origin, Point::new(80.7603, 7.957));
        assert_eq!(request.destination, Point::new(81.5016, 6.3728));
        assert_eq!(
            request.waypoints,
            vec![Point::new(80.6413, 7.2936), Point::new(80.217, 6.0269)]
        );
        assert!(request.optimize_waypoints);
    }

    #[test]
    fn test_prepare_requires_two_resolved_stops() {
        let catalog = sample_catalog();

        for snapshot in ["[]", "[1]", "[1,98,99]"] {
            let storage = MemoryStorage::with_entry(TRIP_STORAGE_KEY, snapshot);
            let store = TripStore::open(&storage);

            assert!(ItineraryReorderer::prepare(&store, &catalog).is_none());
        }
    }

    #[test]
    fn test_complete_applies_waypoint_order() {
        let storage = MemoryStorage::with_entry(TRIP_STORAGE_KEY, "[1,2,3,4]");
        let mut store = TripStore::open(&storage);
        let catalog = sample_catalog();
        let mut reorderer = ItineraryReorderer::new();

        let pending = ItineraryReorderer::prepare(&store, &catalog).unwrap();
        let outcome = reorderer.complete(pending, route(vec![1, 0]), &mut store);

        assert!(matches!(outcome, ReorderOutcome::Applied));
        assert_eq!(store.ids(), ids(&[1, 3, 2, 4]));
        assert_eq!(storage.get(TRIP_STORAGE_KEY).as_deref(), Some("[1,3,2,4]"));

        let result = reorderer.route().unwrap();
        assert_eq!(result.stop_ids(), ids(&[1, 3, 2, 4]));
        assert_eq!(
            result.path,
            Some(vec![
                Coordinates::new(7.957, 80.7603),
                Coordinates::new(6.0269, 80.217)
            ])
        );
    }

    #[test]
    fn test_complete_keeps_unresolved_ids() {
        let storage = MemoryStorage::with_entry(TRIP_STORAGE_KEY, "[1,99,2,3,4]");
        let mut store = TripStore::open(&storage);
        let catalog = sample_catalog();
        let mut reorderer = ItineraryReorderer::new();

        let pending = ItineraryReorderer::prepare(&store, &catalog).unwrap();
        let outcome = reorderer.complete(pending, route(vec![1, 0]), &mut store);

        assert!(matches!(outcome, ReorderOutcome::Applied));
        assert_eq!(store.ids(), ids(&[1, 3, 2, 4, 99]));
    }

    #[test]
    fn test_complete_rejects_invalid_waypoint_order() {
        let catalog = sample_catalog();

        for order in [vec![0], vec![0, 1, 2], vec![0, 0], vec![0, 2], vec![]] {
            let storage = MemoryStorage::with_entry(TRIP_STORAGE_KEY, "[1,2,3,4]");
            let mut store = TripStore::open(&storage);
            let mut reorderer = ItineraryReorderer::new();

            let pending = ItineraryReorderer::prepare(&store, &catalog).unwrap();
            let outcome = reorderer.complete(pending, route(order), &mut store);

            assert!(matches!(
                outcome,
                ReorderOutcome::Failed(ReorderFailure::InvalidWaypointOrder { expected: 2, .. })
            ));
            assert_eq!(store.ids(), ids(&[1, 2, 3, 4]));
            assert!(reorderer.route().is_none());
        }
    }

    #[test]
    fn test_failure_keeps_previous_route() {
        let storage = MemoryStorage::with_entry(TRIP_STORAGE_KEY, "[1,2,3,4]");
        let mut store = TripStore::open(&storage);
        let catalog = sample_catalog();
        let mut reorderer = ItineraryReorderer::new();

        let pending = ItineraryReorderer::prepare(&store, &catalog).unwrap();
        reorderer.complete(pending, route(vec![1, 0]), &mut store);
        let previous = reorderer.route().cloned();

        let pending = ItineraryReorderer::prepare(&store, &catalog).unwrap();
        let outcome = reorderer.complete(
            pending,
            Err(ReorderFailure::Service(DirectionsError::Status {
                status: String::from("ZERO_RESULTS"),
                message: String::new(),
            })),
            &mut store,
        );

        assert!(matches!(
            outcome,
            ReorderOutcome::Failed(ReorderFailure::Service(_))
        ));
        assert_eq!(store.ids(), ids(&[1, 3, 2, 4]));
        assert_eq!(reorderer.route().cloned(), previous);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let storage = MemoryStorage::with_entry(TRIP_STORAGE_KEY, "[1,2,3,4]");
        let mut store = TripStore::open(&storage);
        let catalog = sample_catalog();
        let mut reorderer = ItineraryReorderer::new();

        let pending = ItineraryReorderer::prepare(&store, &catalog).unwrap();
        store.remove(LocationId::new(2)).unwrap();

        let outcome = reorderer.complete(pending, route(vec![1, 0]), &mut store);

        assert!(matches!(outcome, ReorderOutcome::Stale));
        assert_eq!(store.ids(), ids(&[1, 3, 4]));
        assert!(reorderer.route().is_none());
    }

    #[test]
    fn test_empty_path_is_none() {
        let storage = MemoryStorage::with_entry(TRIP_STORAGE_KEY, "[1,4]");
        let mut store = TripStore::open(&storage);
        let catalog = sample_catalog();
        let mut reorderer = ItineraryReorderer::new();

        let pending = ItineraryReorderer::prepare(&store, &catalog).unwrap();
        let outcome = reorderer.complete(
            pending,
            Ok(OptimizedRoute {
                waypoint_order: vec![],
                path: vec![],
            }),
            &mut store,
        );

        assert!(matches!(outcome, ReorderOutcome::Applied));
        assert_eq!(reorderer.route().unwrap().path, None);
        assert_eq!(store.ids(), ids(&[1, 4]));
    }

    #[test]
    fn test_full_order() {
        let catalog = sample_catalog();
        let stops: Vec<LocationRecord> = resolve(&ids(&[4, 1]), &catalog)
            .into_iter()
            .cloned()
            .collect();

        assert_eq!(full_order(&stops, &ids(&[1, 7, 4, 8])), ids(&[4, 1, 7, 8]));
    }
}
