//! Subset of the Open Charge Map POI format this crate reads.

use indexmap::IndexMap;
use model::{charging_station::metadata, ChargingStation, Coordinates};
use serde::Deserialize;
use serde_json::Value;
use utility::{geo, id::Id};

use crate::ApiError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Poi {
    #[serde(rename = "ID")]
    pub id: u64,
    pub address_info: Option<AddressInfo>,
    pub operator_info: Option<Titled>,
    pub usage_cost: Option<String>,
    pub status_type: Option<Titled>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressInfo {
    pub title: Option<String>,
    pub address_line1: Option<String>,
    pub town: Option<String>,
    pub country: Option<Titled>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// In the unit requested via `distanceunit`.
    pub distance: Option<f64>,
}

/// Reference data entries (operator, status, country, connection type) all
/// carry a display title.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Titled {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Connection {
    pub connection_type: Option<Titled>,
}

impl Poi {
    /// Converts the POI into a station. POIs without usable coordinates are
    /// dropped, a zero latitude or longitude counting as unusable.
    pub fn into_charging_station(self, center: &Coordinates) -> Option<ChargingStation> {
        let address = self.address_info?;
        let latitude = address.latitude.filter(|lat| *lat != 0.0)?;
        let longitude = address.longitude.filter(|lon| *lon != 0.0)?;
        let coordinates = Coordinates::new(latitude, longitude)?;
        let distance_meters = address
            .distance
            .filter(|km| km.is_finite() && *km >= 0.0)
            .map(geo::km_to_meters)
            .unwrap_or_else(|| center.distance_meters_to(&coordinates));

        let mut fields = IndexMap::new();
        let mut put = |key: &str, value: Option<String>| {
            if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
                fields.insert(key.to_owned(), Value::from(value));
            }
        };
        put(metadata::NAME, address.title);
        put(metadata::ADDRESS, address.address_line1);
        put(metadata::TOWN, address.town);
        put(metadata::COUNTRY, address.country.and_then(|c| c.title));
        put(metadata::OPERATOR, self.operator_info.and_then(|o| o.title));
        put(metadata::USAGE_COST, self.usage_cost);
        put(metadata::STATUS, self.status_type.and_then(|s| s.title));

        let connection_types = self
            .connections
            .into_iter()
            .filter_map(|connection| connection.connection_type.and_then(|t| t.title))
            .collect::<Vec<_>>();
        if !connection_types.is_empty() {
            fields.insert(
                metadata::CONNECTION_TYPES.to_owned(),
                Value::from(connection_types),
            );
        }

        Some(ChargingStation {
            id: Id::new(self.id.to_string()),
            coordinates,
            distance_meters,
            metadata: fields,
        })
    }
}

/// Parses a POI list into stations ordered by ascending distance. Stations at
/// equal distance keep the provider's order.
pub fn parse_stations(body: &str, center: &Coordinates) -> Result<Vec<ChargingStation>, ApiError> {
    let pois: Vec<Poi> = serde_json::from_str(body)?;
    let total = pois.len();
    let mut stations = pois
        .into_iter()
        .filter_map(|poi| poi.into_charging_station(center))
        .collect::<Vec<_>>();
    if stations.len() < total {
        log::debug!(
            "dropped {} charging stations without valid coordinates",
            total - stations.len()
        );
    }
    stations.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    Ok(stations)
}
