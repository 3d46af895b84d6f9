use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::geo;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Returns `None` unless latitude is in [-90, 90] and longitude in
    /// [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        geo::is_valid_coordinate(latitude, longitude).then_some(Self {
            latitude,
            longitude,
        })
    }

    pub fn is_valid(&self) -> bool {
        geo::is_valid_coordinate(self.latitude, self.longitude)
    }

    pub fn distance_km_to(&self, other: &Coordinates) -> f64 {
        geo::haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    pub fn distance_meters_to(&self, other: &Coordinates) -> f64 {
        geo::km_to_meters(self.distance_km_to(other))
    }
}
