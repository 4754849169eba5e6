use std::path::PathBuf;

use crate::{
    catalog::Catalog,
    location::{Coordinates, LocationId, LocationRecord},
};

pub fn location(id: u64, name: &str, lat: f64, lng: f64) -> LocationRecord {
    LocationRecord {
        id: LocationId::new(id),
        name: name.to_string(),
        province: String::from("Central"),
        category: String::from("Nature"),
        description: String::new(),
        image_url: String::new(),
        coordinates: Coordinates::new(lat, lng),
    }
}

pub fn ids(ids: &[u64]) -> Vec<LocationId> {
    ids.iter().copied().map(LocationId::new).collect()
}

/// Fresh path under the system temp folder, not created yet.
pub fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("itinera-{}", uuid::Uuid::new_v4()))
}

pub const SAMPLE_CATALOG: &str = r#"[
    {
        "id": 1,
        "name": "Sigiriya Rock Fortress",
        "province": "Central",
        "category": "Historical",
        "description": "Ancient rock fortress.",
        "image_url": "/images/sigiriya.jpg",
        "coordinates": { "lat": 7.957, "lng": 80.7603 }
    },
    {
        "id": 2,
        "name": "Temple of the Tooth",
        "province": "Central",
        "category": "Religious",
        "description": "Buddhist temple in Kandy.",
        "image_url": "/images/kandy.jpg",
        "coordinates": { "lat": 7.2936, "lng": 80.6413 }
    },
    {
        "id": 3,
        "name": "Galle Fort",
        "province": "Southern",
        "category": "Historical",
        "description": "Fortified old town.",
        "image_url": "/images/galle.jpg",
        "coordinates": { "lat": 6.0269, "lng": 80.217 }
    },
    {
        "id": 4,
        "name": "Yala National Park",
        "province": "Southern",
        "category": "Wildlife",
        "description": "Leopards and elephants.",
        "image_url": "/images/yala.jpg",
        "coordinates": { "lat": 6.3728, "lng": 81.5016 }
    },
    {
        "id": 5,
        "name": "Nine Arches Bridge",
        "province": "Uva",
        "category": "Nature",
        "description": "Railway viaduct near Ella.",
        "image_url": "/images/ella.jpg",
        "coordinates": { "lat": 6.8768, "lng": 81.0608 }
    }
]"#;

pub fn sample_catalog() -> Catalog {
    Catalog::from_json_str(SAMPLE_CATALOG).unwrap()
}
