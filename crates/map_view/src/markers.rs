use model::{
    marker::MarkerIcon, ChargingStation, FitnessCenter, MapMarker, MarkerKind, SearchResult,
};

use crate::details::{ChargingStationDetails, FitnessCenterDetails, UNKNOWN_STATION};

const UNNAMED_FITNESS_CENTER: &str = "Fitness Center";

pub trait ToMarkers {
    fn to_markers(&self) -> Vec<MapMarker>;
}

/// One green marker per center, in input order.
impl ToMarkers for [FitnessCenter] {
    fn to_markers(&self) -> Vec<MapMarker> {
        self.iter()
            .map(|center| fitness_center_marker(center, false))
            .collect()
    }
}

impl ToMarkers for Vec<FitnessCenter> {
    fn to_markers(&self) -> Vec<MapMarker> {
        self.as_slice().to_markers()
    }
}

/// The searched center as a highlighted marker, followed by one marker per
/// station in result order.
impl ToMarkers for SearchResult {
    fn to_markers(&self) -> Vec<MapMarker> {
        std::iter::once(fitness_center_marker(&self.center, true))
            .chain(self.stations.iter().map(charging_station_marker))
            .collect()
    }
}

pub fn fitness_center_marker(center: &FitnessCenter, highlighted: bool) -> MapMarker {
    let name = center
        .name
        .as_deref()
        .unwrap_or(UNNAMED_FITNESS_CENTER);
    let (label, icon) = if highlighted {
        (format!("⭐ {name}"), MarkerIcon::SELECTED_FITNESS_CENTER)
    } else {
        (name.to_owned(), MarkerIcon::FITNESS_CENTER)
    };
    MapMarker {
        kind: MarkerKind::FitnessCenter,
        coordinates: center.coordinates,
        label,
        detail: FitnessCenterDetails::from(center).lines().join("\n"),
        icon,
        highlighted,
    }
}

pub fn charging_station_marker(station: &ChargingStation) -> MapMarker {
    MapMarker {
        kind: MarkerKind::ChargingStation,
        coordinates: station.coordinates,
        label: format!("🔌 {}", station.name().unwrap_or(UNKNOWN_STATION)),
        detail: ChargingStationDetails::from(station).lines().join("\n"),
        icon: MarkerIcon::CHARGING_STATION,
        highlighted: false,
    }
}
