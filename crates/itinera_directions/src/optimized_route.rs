use geo_types::Point;
use serde::{Deserialize, Serialize};

/// What a provider answers for a [`crate::directions_request::DirectionsRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedRoute {
    /// 0-based indices into the request waypoints, in visiting order
    pub waypoint_order: Vec<usize>,

    /// Path geometry between the stops, may be empty
    pub path: Vec<Point>,
}

impl OptimizedRoute {
    /// Whether `waypoint_order` visits every one of `waypoint_count` waypoints exactly once.
    pub fn is_permutation_of(&self, waypoint_count: usize) -> bool {
        if self.waypoint_order.len() != waypoint_count {
            return false;
        }

        let mut seen = vec![false; waypoint_count];
        for &index in &self.waypoint_order {
            match seen.get_mut(index) {
                Some(visited) if !*visited => *visited = true,
                _ => return false,
            }
        }

        true
    }
}
