use serde::{Deserialize, Serialize};

use crate::google_directions_api::TravelMode;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionsProvider {
    /// https://developers.google.com/maps/documentation/directions/get-directions
    GoogleApi { travel_mode: TravelMode },

    /// Straight lines and a nearest-neighbour visiting order, no network access
    AsTheCrowFlies,
}
