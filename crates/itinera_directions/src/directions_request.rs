use geo_types::Point;

/// A route request with fixed endpoints.
///
/// Points are stored as `x = longitude`, `y = latitude`.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: Point,
    pub destination: Point,
    pub waypoints: Vec<Point>,

    /// Ask the provider to reorder the waypoints for the shortest route
    pub optimize_waypoints: bool,
}

impl DirectionsRequest {
    pub fn optimized<P>(origin: P, destination: P, waypoints: impl IntoIterator<Item = P>) -> Self
    where
        P: Into<Point>,
    {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            waypoints: waypoints.into_iter().map(Into::into).collect(),
            optimize_waypoints: true,
        }
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    /// All stops in request order: origin, waypoints, destination.
    pub fn stops(&self) -> impl Iterator<Item = &Point> {
        std::iter::once(&self.origin)
            .chain(self.waypoints.iter())
            .chain(std::iter::once(&self.destination))
    }
}
