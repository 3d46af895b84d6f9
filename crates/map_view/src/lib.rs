//! Turns fitness centers and search results into what the map frontend draws.
//! Nothing here renders; the frontend's map library does.

pub mod details;
pub mod heatmap;
pub mod markers;
pub mod viewport;

pub use details::{ChargingStationDetails, FitnessCenterDetails};
pub use heatmap::{to_heatmap_weights, HeatmapLayer, HeatmapPoint, HEATMAP_RADIUS};
pub use markers::ToMarkers;
pub use viewport::{BoundingBox, MapView};
