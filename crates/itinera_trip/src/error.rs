use std::path::PathBuf;

use thiserror::Error;

use crate::location::LocationId;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum TripError {
    #[error("Failed to persist trip: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to serialize trip: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{given:?} is not a permutation of the trip {current:?}")]
    NotAPermutation {
        current: Vec<LocationId>,
        given: Vec<LocationId>,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog is not a JSON array of locations: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum InvalidLocation {
    #[error("blank {0}")]
    BlankField(&'static str),

    #[error("coordinates out of range: {lat}, {lng}")]
    Coordinates { lat: f64, lng: f64 },
}
