use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum MarkerKind {
    FitnessCenter,
    ChargingStation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Green,
    Red,
    Blue,
}

/// Font Awesome glyph names understood by the map frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MarkerGlyph {
    Dumbbell,
    Star,
    Plug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkerIcon {
    pub color: MarkerColor,
    pub glyph: MarkerGlyph,
}

impl MarkerIcon {
    pub const FITNESS_CENTER: MarkerIcon = MarkerIcon {
        color: MarkerColor::Green,
        glyph: MarkerGlyph::Dumbbell,
    };
    pub const SELECTED_FITNESS_CENTER: MarkerIcon = MarkerIcon {
        color: MarkerColor::Red,
        glyph: MarkerGlyph::Star,
    };
    pub const CHARGING_STATION: MarkerIcon = MarkerIcon {
        color: MarkerColor::Blue,
        glyph: MarkerGlyph::Plug,
    };
}

/// Renderable projection of either a fitness center or a charging station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub kind: MarkerKind,
    pub coordinates: Coordinates,
    /// Popup title.
    pub label: String,
    /// Popup body, one item per line.
    pub detail: String,
    pub icon: MarkerIcon,
    /// Set for the anchor of a charging station search.
    pub highlighted: bool,
}
