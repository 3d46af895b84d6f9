use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{same_name, Coordinates, ExampleData};

pub type FitnessCenterId = Id<FitnessCenter>;

/// A gym or sports facility. Created once when a dataset is loaded and never
/// changed afterwards.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FitnessCenter {
    /// Row index within its dataset.
    pub id: FitnessCenterId,
    pub name: Option<String>,
    /// Chain or brand, e.g. "McFit".
    pub operator: Option<String>,
    pub sport: Option<String>,
    pub city: Option<String>,
    pub coordinates: Coordinates,
    pub address: Option<String>,
    /// Phone number or other contact line.
    pub contact: Option<String>,
    pub opening_hours: Option<String>,
    pub website: Option<String>,
}

impl HasId for FitnessCenter {
    type IdType = u32;
}

impl FitnessCenter {
    pub fn in_city(&self, city: &str) -> bool {
        self.city
            .as_deref()
            .is_some_and(|own| same_name(own, city))
    }

    pub fn operated_by(&self, operator: &str) -> bool {
        self.operator
            .as_deref()
            .is_some_and(|own| same_name(own, operator))
    }
}

impl ExampleData for FitnessCenter {
    fn example_data() -> Self {
        Self {
            id: Id::new(0),
            name: Some("FitStudio".to_owned()),
            operator: Some("FitStudio GmbH".to_owned()),
            sport: Some("fitness".to_owned()),
            city: Some("Bremen".to_owned()),
            coordinates: Coordinates {
                latitude: 53.0793,
                longitude: 8.8017,
            },
            address: Some("Am Wall 120".to_owned()),
            contact: Some("+49 421 1234567".to_owned()),
            opening_hours: Some("Mo-Fr 06:00-23:00".to_owned()),
            website: None,
        }
    }
}
