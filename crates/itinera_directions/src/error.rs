use thiserror::Error;

use crate::polyline::PolylineError;

#[derive(Debug, Error)]
pub enum DirectionsError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Directions request failed with status {status}: {message}")]
    Status { status: String, message: String },

    #[error("Too many waypoints: {count} (max {max})")]
    TooManyWaypoints { count: usize, max: usize },

    #[error("Incomplete response")]
    IncompleteResponse,

    #[error("Invalid path geometry: {0}")]
    Polyline(#[from] PolylineError),

    #[error("No API key configured for the Google Directions API")]
    MissingApiKey,
}
