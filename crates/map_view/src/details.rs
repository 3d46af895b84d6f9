use model::{charging_station::metadata, ChargingStation, ExampleData, FitnessCenter};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_STUDIO: &str = "Unbekanntes Studio";
pub const NOT_SPECIFIED: &str = "Keine Angabe";
pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN_STATION: &str = "Ladestation";

fn or_default(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
        .to_owned()
}

/// Card shown for a fitness center in the results list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FitnessCenterDetails {
    pub title: String,
    pub address: String,
    pub opening_hours: String,
    pub phone: String,
    pub website: String,
}

impl From<&FitnessCenter> for FitnessCenterDetails {
    fn from(center: &FitnessCenter) -> Self {
        let address = [center.address.as_deref(), center.city.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            title: or_default(center.name.as_deref(), UNKNOWN_STUDIO),
            address: or_default(Some(&address), NOT_AVAILABLE),
            opening_hours: or_default(center.opening_hours.as_deref(), NOT_SPECIFIED),
            phone: or_default(center.contact.as_deref(), NOT_AVAILABLE),
            website: or_default(center.website.as_deref(), NOT_AVAILABLE),
        }
    }
}

impl FitnessCenterDetails {
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("📍 {}", self.address),
            format!("⏰ {}", self.opening_hours),
            format!("📞 {}", self.phone),
            format!("🌍 {}", self.website),
        ]
    }
}

impl ExampleData for FitnessCenterDetails {
    fn example_data() -> Self {
        Self::from(&FitnessCenter::example_data())
    }
}

/// Card shown for a charging station found around a fitness center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChargingStationDetails {
    pub name: String,
    pub address: String,
    pub town: String,
    pub operator: String,
    /// Human readable, e.g. "350 m" or "1.2 km".
    pub distance: String,
}

impl From<&ChargingStation> for ChargingStationDetails {
    fn from(station: &ChargingStation) -> Self {
        Self {
            name: or_default(station.name(), UNKNOWN_STATION),
            address: or_default(station.metadata_str(metadata::ADDRESS), NOT_AVAILABLE),
            town: or_default(station.metadata_str(metadata::TOWN), NOT_AVAILABLE),
            operator: or_default(station.operator(), NOT_AVAILABLE),
            distance: format_distance(station.distance_meters),
        }
    }
}

impl ChargingStationDetails {
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("📍 {}, {}", self.address, self.town),
            format!("🏢 {}", self.operator),
            format!("📏 {}", self.distance),
        ]
    }
}

impl ExampleData for ChargingStationDetails {
    fn example_data() -> Self {
        Self::from(&ChargingStation::example_data())
    }
}

pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use utility::id::Id;

    use super::*;

    #[test]
    fn fitness_card_uses_fallbacks() {
        let center = FitnessCenter {
            id: Id::new(3),
            name: None,
            operator: None,
            sport: None,
            city: None,
            coordinates: model::Coordinates {
                latitude: 48.8566,
                longitude: 2.3522,
            },
            address: Some("  ".to_owned()),
            contact: None,
            opening_hours: None,
            website: None,
        };
        let details = FitnessCenterDetails::from(&center);
        assert_eq!(details.title, UNKNOWN_STUDIO);
        assert_eq!(details.address, NOT_AVAILABLE);
        assert_eq!(details.opening_hours, NOT_SPECIFIED);
        assert_eq!(details.phone, NOT_AVAILABLE);
        assert_eq!(details.website, NOT_AVAILABLE);
    }

    #[test]
    fn fitness_card_joins_address_and_city() {
        let details = FitnessCenterDetails::example_data();
        assert_eq!(details.title, "FitStudio");
        assert_eq!(details.address, "Am Wall 120, Bremen");
        assert_eq!(details.lines()[0], "📍 Am Wall 120, Bremen");
    }

    #[test]
    fn station_card() {
        let details = ChargingStationDetails::example_data();
        assert_eq!(details.name, "Parkhaus Am Wall");
        assert_eq!(details.operator, "swb");
        assert_eq!(details.distance, "130 m");
    }

    #[test]
    fn distances_switch_to_kilometers() {
        assert_eq!(format_distance(999.4), "999 m");
        assert_eq!(format_distance(1240.0), "1.2 km");
        assert_eq!(format_distance(15_000.0), "15.0 km");
    }
}
