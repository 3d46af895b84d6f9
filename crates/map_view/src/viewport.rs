use model::{Coordinates, Country, ExampleData, FitnessCenter};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::geo;

/// Zoom showing a whole country.
pub const DEFAULT_ZOOM: u8 = 5;
/// Zoom showing the surroundings of one fitness center.
pub const SELECTED_ZOOM: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl BoundingBox {
    /// Box enclosing the circle of `radius_meters` around `center`.
    pub fn around(center: &Coordinates, radius_meters: f64) -> Self {
        let ((min_lat, min_lon), (max_lat, max_lon)) = geo::calculate_bounding_box(
            center.latitude,
            center.longitude,
            geo::meters_to_km(radius_meters),
        );
        Self {
            south_west: Coordinates {
                latitude: min_lat,
                longitude: min_lon,
            },
            north_east: Coordinates {
                latitude: max_lat,
                longitude: max_lon,
            },
        }
    }

    /// Smallest box holding every point, `None` without points.
    pub fn enclosing<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinates>,
    {
        points.into_iter().fold(None, |bounds, point| {
            let bounds = bounds.unwrap_or(Self {
                south_west: *point,
                north_east: *point,
            });
            Some(Self {
                south_west: Coordinates {
                    latitude: bounds.south_west.latitude.min(point.latitude),
                    longitude: bounds.south_west.longitude.min(point.longitude),
                },
                north_east: Coordinates {
                    latitude: bounds.north_east.latitude.max(point.latitude),
                    longitude: bounds.north_east.longitude.max(point.longitude),
                },
            })
        })
    }

    pub fn contains(&self, point: &Coordinates) -> bool {
        (self.south_west.latitude..=self.north_east.latitude).contains(&point.latitude)
            && (self.south_west.longitude..=self.north_east.longitude).contains(&point.longitude)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    /// Area the map should fit, if any.
    pub bounds: Option<BoundingBox>,
}

impl MapView {
    pub fn for_country(country: Country) -> Self {
        Self {
            center: country.default_center(),
            zoom: DEFAULT_ZOOM,
            bounds: None,
        }
    }

    /// Centered on a selected fitness center, fitting the search radius.
    pub fn around(center: &FitnessCenter, radius_meters: f64) -> Self {
        Self {
            center: center.coordinates,
            zoom: SELECTED_ZOOM,
            bounds: Some(BoundingBox::around(&center.coordinates, radius_meters)),
        }
    }

    /// Country view that fits the given centers, if there are any.
    pub fn fitting(country: Country, centers: &[FitnessCenter]) -> Self {
        Self {
            bounds: BoundingBox::enclosing(centers.iter().map(|center| &center.coordinates)),
            ..Self::for_country(country)
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::for_country(Country::default())
    }
}

impl ExampleData for MapView {
    fn example_data() -> Self {
        Self::around(&FitnessCenter::example_data(), 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_views() {
        let germany = MapView::for_country(Country::Germany);
        assert_eq!(germany.center.latitude, 51.1657);
        assert_eq!(germany.center.longitude, 10.4515);
        assert_eq!(germany.zoom, DEFAULT_ZOOM);
        assert_eq!(germany.bounds, None);

        let france = MapView::for_country(Country::France);
        assert_eq!(france.center.latitude, 46.6034);
        assert_eq!(france.center.longitude, 1.8883);
        assert_eq!(MapView::default(), germany);
    }

    #[test]
    fn view_fitting_centers() {
        let bremen = FitnessCenter::example_data();
        let mut hamburg = FitnessCenter::example_data();
        hamburg.coordinates = Coordinates {
            latitude: 53.5511,
            longitude: 9.9937,
        };

        let view = MapView::fitting(Country::Germany, &[bremen.clone(), hamburg.clone()]);
        let bounds = view.bounds.unwrap();
        assert_eq!(bounds.south_west, bremen.coordinates);
        assert_eq!(bounds.north_east, hamburg.coordinates);

        assert_eq!(
            MapView::fitting(Country::France, &[]),
            MapView::for_country(Country::France)
        );
    }

    #[test]
    fn view_around_center_fits_radius() {
        let center = FitnessCenter::example_data();
        let view = MapView::around(&center, 500.0);
        assert_eq!(view.zoom, SELECTED_ZOOM);
        assert_eq!(view.center, center.coordinates);

        let bounds = view.bounds.unwrap();
        assert!(bounds.contains(&center.coordinates));
        // roughly 4.5 thousandths of a degree latitude each way
        let height = bounds.north_east.latitude - bounds.south_west.latitude;
        assert!((height - 0.009).abs() < 0.0005, "got {height}");

        let far = Coordinates {
            latitude: center.coordinates.latitude + 0.01,
            longitude: center.coordinates.longitude,
        };
        assert!(!bounds.contains(&far));
    }
}
