use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::InvalidLocation;

#[derive(
    Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct LocationId(u64);

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl LocationId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for LocationId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<Coordinates> for geo_types::Point {
    fn from(coordinates: Coordinates) -> Self {
        geo_types::Point::new(coordinates.lng, coordinates.lat)
    }
}

impl From<geo_types::Point> for Coordinates {
    fn from(point: geo_types::Point) -> Self {
        Coordinates::new(point.y(), point.x())
    }
}

/// A destination of the catalog.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "Location")]
pub struct LocationRecord {
    pub id: LocationId,
    pub name: String,

    /// Region the destination belongs to
    pub province: String,
    pub category: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image_url: String,

    pub coordinates: Coordinates,
}

impl LocationRecord {
    pub fn validate(&self) -> Result<(), InvalidLocation> {
        for (field, value) in [
            ("name", &self.name),
            ("province", &self.province),
            ("category", &self.category),
        ] {
            if value.trim().is_empty() {
                return Err(InvalidLocation::BlankField(field));
            }
        }

        if !self.coordinates.is_valid() {
            return Err(InvalidLocation::Coordinates {
                lat: self.coordinates.lat,
                lng: self.coordinates.lng,
            });
        }

        Ok(())
    }
}

impl From<&LocationRecord> for geo_types::Point {
    fn from(location: &LocationRecord) -> Self {
        location.coordinates.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::location;

    #[test]
    fn test_validate() {
        assert_eq!(location(1, "Sigiriya", 7.957, 80.7603).validate(), Ok(()));

        let mut blank = location(2, "  ", 7.0, 80.0);
        assert_eq!(blank.validate(), Err(InvalidLocation::BlankField("name")));

        blank.name = String::from("Ella");
        blank.category = String::new();
        assert_eq!(blank.validate(), Err(InvalidLocation::BlankField("category")));

        assert!(matches!(
            location(3, "Nowhere", 91.0, 80.0).validate(),
            Err(InvalidLocation::Coordinates { .. })
        ));
        assert!(matches!(
            location(4, "Nowhere", 7.0, f64::NAN).validate(),
            Err(InvalidLocation::Coordinates { .. })
        ));
    }

    #[test]
    fn test_point_conversion() {
        let point: geo_types::Point = Coordinates::new(6.9271, 79.8612).into();

        assert_eq!(point.x(), 79.8612);
        assert_eq!(point.y(), 6.9271);
        assert_eq!(Coordinates::from(point), Coordinates::new(6.9271, 79.8612));
    }

    #[test]
    fn test_deserialize_defaults_optional_fields() {
        let record: LocationRecord = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "Galle Fort",
                "province": "Southern",
                "category": "Historical",
                "coordinates": { "lat": 6.0269, "lng": 80.217 }
            }"#,
        )
        .unwrap();

        assert_eq!(record.id, LocationId::new(7));
        assert!(record.description.is_empty());
        assert!(record.image_url.is_empty());
    }
}
