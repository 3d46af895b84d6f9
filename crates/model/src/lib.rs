pub use serde_with;

pub mod charging_station;
pub mod coordinates;
pub mod country;
pub mod fitness_center;
pub mod marker;
pub mod search;

pub use charging_station::ChargingStation;
pub use coordinates::Coordinates;
pub use country::Country;
pub use fitness_center::FitnessCenter;
pub use marker::{MapMarker, MarkerKind};
pub use search::{SearchQuery, SearchResult};

pub trait ExampleData {
    fn example_data() -> Self;
}

/// Case-insensitive comparison used by every name based filter (city,
/// operator, chain). Surrounding whitespace is ignored.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::same_name;

    #[test]
    fn names_compare_case_insensitively() {
        assert!(same_name("Bremen", "bremen"));
        assert!(same_name(" McFit ", "MCFIT"));
        assert!(same_name("Düsseldorf", "DÜSSELDORF"));
        assert!(!same_name("Bremen", "Bremerhaven"));
    }
}
