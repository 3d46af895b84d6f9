use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{ChargingStation, ExampleData, FitnessCenter};

/// A request for charging stations around one fitness center.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub center: FitnessCenter,
    pub radius_meters: f64,
    pub chain_filter: Option<String>,
}

impl SearchQuery {
    pub fn new(center: FitnessCenter, radius_meters: f64) -> Self {
        Self {
            center,
            radius_meters,
            chain_filter: None,
        }
    }

    pub fn with_chain_filter<S: Into<String>>(mut self, chain: S) -> Self {
        self.chain_filter = Some(chain.into());
        self
    }

    /// The chain filter, unless it is blank.
    pub fn chain(&self) -> Option<&str> {
        self.chain_filter
            .as_deref()
            .map(str::trim)
            .filter(|chain| !chain.is_empty())
    }
}

/// Stations found around `center`, in the order the upstream returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub center: FitnessCenter,
    pub stations: Vec<ChargingStation>,
}

impl ExampleData for SearchResult {
    fn example_data() -> Self {
        Self {
            center: FitnessCenter::example_data(),
            stations: vec![ChargingStation::example_data()],
        }
    }
}
