use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utility::id::{HasId, Id};

use crate::{same_name, Coordinates, ExampleData};

pub type ChargingStationId = Id<ChargingStation>;

/// Keys under which provider fields are stored in `ChargingStation::metadata`.
pub mod metadata {
    pub const NAME: &str = "name";
    pub const ADDRESS: &str = "address";
    pub const TOWN: &str = "town";
    pub const COUNTRY: &str = "country";
    pub const OPERATOR: &str = "operator";
    pub const USAGE_COST: &str = "usageCost";
    pub const STATUS: &str = "status";
    pub const CONNECTION_TYPES: &str = "connectionTypes";
}

/// An electric vehicle charging point returned for one lookup. Lives only as
/// long as the search result holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChargingStation {
    /// Opaque provider identifier.
    pub id: ChargingStationId,
    pub coordinates: Coordinates,
    /// Distance from the query point.
    pub distance_meters: f64,
    /// Provider specific fields, passed through untouched.
    pub metadata: IndexMap<String, Value>,
}

impl HasId for ChargingStation {
    type IdType = String;
}

impl ChargingStation {
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata_str(metadata::NAME)
    }

    pub fn operator(&self) -> Option<&str> {
        self.metadata_str(metadata::OPERATOR)
    }

    /// A station without a known operator never matches a chain.
    pub fn operated_by(&self, chain: &str) -> bool {
        self.operator().is_some_and(|own| same_name(own, chain))
    }
}

impl ExampleData for ChargingStation {
    fn example_data() -> Self {
        let mut fields = IndexMap::new();
        fields.insert(metadata::NAME.to_owned(), Value::from("Parkhaus Am Wall"));
        fields.insert(metadata::ADDRESS.to_owned(), Value::from("Am Wall 150"));
        fields.insert(metadata::TOWN.to_owned(), Value::from("Bremen"));
        fields.insert(metadata::OPERATOR.to_owned(), Value::from("swb"));
        fields.insert(
            metadata::CONNECTION_TYPES.to_owned(),
            Value::from(vec!["Type 2 (Socket Only)", "CCS (Type 2)"]),
        );
        Self {
            id: Id::new("123456".to_owned()),
            coordinates: Coordinates {
                latitude: 53.0801,
                longitude: 8.8032,
            },
            distance_meters: 130.0,
            metadata: fields,
        }
    }
}
