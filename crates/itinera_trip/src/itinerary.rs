use geo::BoundingRect;
use geo_types::{MultiPoint, Point, Rect};

use crate::{
    catalog::Catalog,
    location::{Coordinates, LocationId, LocationRecord},
};

/// Center of the map when the trip has no stop to show.
pub const DEFAULT_MAP_CENTER: Coordinates = Coordinates::new(7.8731, 80.7718);

/// Resolves trip ids against the catalog, keeping the trip order.
///
/// Ids without a catalog entry are left out; they stay in the trip.
pub fn resolve<'a>(ids: &[LocationId], catalog: &'a Catalog) -> Vec<&'a LocationRecord> {
    ids.iter().filter_map(|&id| catalog.get(id)).collect()
}

/// Outcome of the last successful route optimization. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub stops: Vec<LocationRecord>,

    /// Path geometry between the stops, `None` when the service gave none
    pub path: Option<Vec<Coordinates>>,
}

impl RouteResult {
    pub fn stop_ids(&self) -> Vec<LocationId> {
        self.stops.iter().map(|stop| stop.id).collect()
    }
}

/// Bounding box of the stops, for fitting a map view.
pub fn bounds(stops: &[&LocationRecord]) -> Option<Rect> {
    let points: MultiPoint = stops
        .iter()
        .map(|&stop| Point::from(stop))
        .collect::<Vec<_>>()
        .into();

    points.bounding_rect()
}

pub fn map_center(stops: &[&LocationRecord]) -> Coordinates {
    stops
        .first()
        .map(|stop| stop.coordinates)
        .unwrap_or(DEFAULT_MAP_CENTER)
}
