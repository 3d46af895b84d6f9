use model::{Coordinates, ExampleData, FitnessCenter};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Point radius of the heatmap layer, in pixels.
pub const HEATMAP_RADIUS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapPoint {
    pub coordinates: Coordinates,
    pub weight: f64,
}

/// Every center weighs the same.
pub fn to_heatmap_weights(centers: &[FitnessCenter]) -> Vec<HeatmapPoint> {
    centers
        .iter()
        .map(|center| HeatmapPoint {
            coordinates: center.coordinates,
            weight: 1.0,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapLayer {
    pub radius: u32,
    pub points: Vec<HeatmapPoint>,
}

impl HeatmapLayer {
    pub fn from_centers(centers: &[FitnessCenter]) -> Self {
        Self {
            radius: HEATMAP_RADIUS,
            points: to_heatmap_weights(centers),
        }
    }
}

impl ExampleData for HeatmapLayer {
    fn example_data() -> Self {
        Self::from_centers(&[FitnessCenter::example_data()])
    }
}
