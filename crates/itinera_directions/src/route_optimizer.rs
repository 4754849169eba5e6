use std::future::Future;

use crate::{
    directions_request::DirectionsRequest, error::DirectionsError, optimized_route::OptimizedRoute,
};

/// Anything able to compute a waypoint visiting order for a request.
pub trait RouteOptimizer {
    fn optimize_route(
        &self,
        request: &DirectionsRequest,
    ) -> impl Future<Output = Result<OptimizedRoute, DirectionsError>> + Send;
}
