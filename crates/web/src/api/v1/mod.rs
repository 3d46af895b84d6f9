use axum::{
    http::Method,
    routing::{get, on},
    Router,
};
use fitness_data::{CountryDatasets, FitnessCenterCollection};
use map_view::{FitnessCenterDetails, HeatmapLayer, MapView};
use model::{Country, FitnessCenter, SearchResult};

use crate::{
    common::{
        route_not_found, schema, schema_no_example, RouteErrorResponse, RouteResult,
        METHOD_FILTER_ALL,
    },
    WebState,
};

mod countries;
mod fitness_centers;

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::resource!("/v1{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema/country", get(schema_no_example::<countries::CountryDto>))
        .route("/schema/fitness-center", get(schema::<FitnessCenter>))
        .route("/schema/fitness-center-details", get(schema::<FitnessCenterDetails>))
        .route("/schema/search-result", get(schema::<SearchResult>))
        .route("/schema/search", get(schema_no_example::<fitness_centers::SearchDto>))
        .route("/schema/map", get(schema_no_example::<countries::MapDto>))
        .route("/schema/map-view", get(schema::<MapView>))
        .route("/schema/heatmap", get(schema::<HeatmapLayer>))
        .nest_service("/countries", countries::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// Resolves a country path segment to its dataset.
pub(crate) fn dataset<'a>(
    datasets: &'a CountryDatasets,
    code: &str,
    uri: &str,
) -> RouteResult<(Country, &'a FitnessCenterCollection)> {
    let country = code.parse::<Country>().map_err(|why| {
        RouteErrorResponse::from(why)
            .with_method(&Method::GET)
            .with_uri(uri)
    })?;
    Ok((country, datasets.get(country)))
}

/// Parses a comma separated chain list, dropping blank entries.
pub(crate) fn parse_chains(chains: Option<&str>) -> Vec<String> {
    chains
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|chain| !chain.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Centers of `city` (or of the whole country) run by one of `chains`. No
/// chains means every chain.
pub(crate) fn select_centers(
    collection: &FitnessCenterCollection,
    city: Option<&str>,
    chains: &[String],
) -> Vec<FitnessCenter> {
    match city.map(str::trim).filter(|city| !city.is_empty()) {
        Some(city) => collection.filter(city, chains),
        None => collection
            .all()
            .iter()
            .filter(|center| {
                chains.is_empty() || chains.iter().any(|chain| center.operated_by(chain))
            })
            .cloned()
            .collect(),
    }
}


#[cfg(test)]
mod tests {
    use model::ExampleData;

    use super::*;

    #[test]
    fn chains_are_split_and_trimmed() {
        assert_eq!(parse_chains(Some(" McFit, ,Kieser ")), vec!["McFit", "Kieser"]);
        assert!(parse_chains(Some("")).is_empty());
        assert!(parse_chains(None).is_empty());
    }

    #[test]
    fn selection_without_city_spans_the_country() {
        let mut other = FitnessCenter::example_data();
        other.city = Some("Hamburg".to_owned());
        other.operator = Some("McFit".to_owned());
        let collection =
            FitnessCenterCollection::from_centers(vec![FitnessCenter::example_data(), other]);

        assert_eq!(select_centers(&collection, None, &[]).len(), 2);
        assert_eq!(select_centers(&collection, Some(" "), &[]).len(), 2);
        assert_eq!(
            select_centers(&collection, None, &["mcfit".to_owned()]).len(),
            1
        );
        assert_eq!(select_centers(&collection, Some("bremen"), &[]).len(), 1);
    }

    #[test]
    fn unknown_country_is_rejected() {
        let datasets = CountryDatasets::default();
        assert!(dataset(&datasets, "fr", "/").is_ok());
        let error = dataset(&datasets, "XX", "/api/v1/countries/XX").unwrap_err();
        assert_eq!(error.status_code, axum::http::StatusCode::NOT_FOUND);
    }
}
