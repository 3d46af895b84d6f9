use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, Query, State},
    routing::{get, on},
    Extension, Router,
};
use fitness_data::FitnessCenterCollection;
use map_view::{HeatmapLayer, MapView, ToMarkers};
use model::{Country, MapMarker};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{dataset, parse_chains, select_centers};
use crate::{
    common::{route_not_found, HateoasResult, VecResponse, METHOD_FILTER_ALL},
    hateoas::{self, rel},
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/countries{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(get_countries))
        .route("/:country", get(get_country))
        .route("/:country/cities", get(get_cities))
        .route("/:country/operators", get(get_operators))
        .route("/:country/map", get(get_map))
        .merge(super::fitness_centers::routes())
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CountryDto {
    code: Country,
    name: String,
    fitness_centers: usize,
    cities: usize,
    view: MapView,
}

/// Everything the map needs to draw a selection of fitness centers.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MapDto {
    view: MapView,
    markers: Vec<MapMarker>,
    heatmap: HeatmapLayer,
}

#[derive(Debug, Deserialize)]
struct CityQuery {
    city: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MapQuery {
    city: Option<String>,
    chains: Option<String>,
}

async fn get_countries(
    State(WebState { datasets, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<CountryDto>>> {
    let countries = Country::ALL
        .into_iter()
        .map(|country| country_hateoas(country, datasets.get(country), base_url.clone()))
        .collect::<Vec<_>>();
    Ok(VecResponse::new(countries).hateoas().json())
}

async fn get_country(
    OriginalUri(original_uri): OriginalUri,
    Path(code): Path<String>,
    State(WebState { datasets, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<CountryDto> {
    let (country, collection) = dataset(&datasets, &code, original_uri.path())?;
    Ok(country_hateoas(country, collection, base_url).json())
}

async fn get_cities(
    OriginalUri(original_uri): OriginalUri,
    Path(code): Path<String>,
    State(WebState { datasets, .. }): State<WebState>,
) -> HateoasResult<VecResponse<String>> {
    let (_, collection) = dataset(&datasets, &code, original_uri.path())?;
    Ok(VecResponse::new(collection.cities()).hateoas().json())
}

async fn get_operators(
    OriginalUri(original_uri): OriginalUri,
    Path(code): Path<String>,
    State(WebState { datasets, .. }): State<WebState>,
    Query(params): Query<CityQuery>,
) -> HateoasResult<VecResponse<String>> {
    let (_, collection) = dataset(&datasets, &code, original_uri.path())?;
    let operators = match params.city.as_deref() {
        Some(city) => collection.operators_in_city(city),
        None => collection.all_operators(),
    };
    Ok(VecResponse::new(operators.into_iter().collect())
        .hateoas()
        .json())
}

async fn get_map(
    OriginalUri(original_uri): OriginalUri,
    Path(code): Path<String>,
    State(WebState { datasets, .. }): State<WebState>,
    Query(params): Query<MapQuery>,
) -> HateoasResult<MapDto> {
    let (country, collection) = dataset(&datasets, &code, original_uri.path())?;
    let centers = select_centers(
        collection,
        params.city.as_deref(),
        &parse_chains(params.chains.as_deref()),
    );
    let view = match params.city {
        Some(_) => MapView::fitting(country, &centers),
        None => MapView::for_country(country),
    };
    Ok(hateoas::Response::new(MapDto {
        view,
        markers: centers.to_markers(),
        heatmap: HeatmapLayer::from_centers(&centers),
    })
    .json())
}

fn country_hateoas(
    country: Country,
    collection: &FitnessCenterCollection,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<CountryDto> {
    let code = country.code();
    hateoas::Response::builder(
        CountryDto {
            code: country,
            name: country.name().to_owned(),
            fitness_centers: collection.len(),
            cities: collection.cities().len(),
            view: MapView::for_country(country),
        },
        base_url,
    )
    .link(rel::SELF, resource!("/{}", code))
    .link(rel::CITIES, resource!("/{}/cities", code))
    .link(rel::OPERATORS, resource!("/{}/operators", code))
    .link(rel::FITNESS_CENTERS, resource!("/{}/fitness-centers", code))
    .link(rel::MAP, resource!("/{}/map", code))
    .debug_info("loadReport", collection.report())
    .build()
}
