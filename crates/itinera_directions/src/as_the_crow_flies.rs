use geo::{Distance, Haversine};

use crate::{directions_request::DirectionsRequest, optimized_route::OptimizedRoute};

/// Offline stand-in for a routing service.
///
/// Visits the waypoints greedily, always going to the closest unvisited one
/// (haversine distance), and draws straight segments between the stops.
pub fn as_the_crow_flies_route(request: &DirectionsRequest) -> OptimizedRoute {
    let waypoint_order = if request.optimize_waypoints {
        nearest_neighbour_order(request)
    } else {
        (0..request.waypoint_count()).collect()
    };

    let mut path = Vec::with_capacity(request.waypoint_count() + 2);
    path.push(request.origin);
    path.extend(waypoint_order.iter().map(|&index| request.waypoints[index]));
    path.push(request.destination);

    OptimizedRoute {
        waypoint_order,
        path,
    }
}

fn nearest_neighbour_order(request: &DirectionsRequest) -> Vec<usize> {
    let mut visited = vec![false; request.waypoint_count()];
    let mut order = Vec::with_capacity(request.waypoint_count());
    let mut current = request.origin;

    while order.len() < request.waypoint_count() {
        let mut best: Option<(usize, f64)> = None;

        for (index, waypoint) in request.waypoints.iter().enumerate() {
            if visited[index] {
                continue;
            }

            let distance = Haversine.distance(current, *waypoint);
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((index, distance));
            }
        }

        let Some((index, _)) = best else {
            break;
        };

        visited[index] = true;
        order.push(index);
        current = request.waypoints[index];
    }

    order
}
