use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::Method,
    routing::get,
    Extension, Router,
};
use chrono::{DateTime, Local};
use map_view::{ChargingStationDetails, FitnessCenterDetails, MapView, ToMarkers};
use model::{
    fitness_center::FitnessCenterId, ChargingStation, Country, FitnessCenter, MapMarker,
    SearchQuery,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::{countries, dataset, parse_chains, select_centers};
use crate::{
    common::{HateoasResult, RouteErrorResponse, RouteResult, VecResponse},
    hateoas::{self, rel},
    middleware::base_url::BaseUrl,
    WebState,
};

/// Search radius used when the request names none.
pub const DEFAULT_RADIUS_METERS: f64 = 10_000.0;

const OPEN_CHARGE_MAP_POI_URL: &str = "https://openchargemap.org/site/poi/details";

pub(crate) fn routes() -> Router<WebState> {
    Router::new()
        .route("/:country/fitness-centers", get(get_fitness_centers))
        .route("/:country/fitness-centers/:id", get(get_fitness_center))
        .route(
            "/:country/fitness-centers/:id/charging-stations",
            get(search_charging_stations),
        )
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FitnessCenterDto {
    #[serde(flatten)]
    fitness_center: FitnessCenter,
    details: FitnessCenterDetails,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChargingStationDto {
    #[serde(flatten)]
    charging_station: ChargingStation,
    details: ChargingStationDetails,
}

/// Charging stations around one fitness center.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchDto {
    retrieved_at: DateTime<Local>,
    radius_meters: f64,
    chain_filter: Option<String>,
    fitness_center: hateoas::Response<FitnessCenterDto>,
    charging_stations: Vec<hateoas::Response<ChargingStationDto>>,
    markers: Vec<MapMarker>,
    view: MapView,
}

#[derive(Debug, Deserialize)]
struct FitnessCentersQuery {
    city: Option<String>,
    /// Comma separated.
    chains: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    /// In meters.
    radius: Option<f64>,
    chain: Option<String>,
}

async fn get_fitness_centers(
    OriginalUri(original_uri): OriginalUri,
    Path(code): Path<String>,
    State(WebState { datasets, .. }): State<WebState>,
    Query(params): Query<FitnessCentersQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<FitnessCenterDto>>> {
    let (country, collection) = dataset(&datasets, &code, original_uri.path())?;
    let centers = select_centers(
        collection,
        params.city.as_deref(),
        &parse_chains(params.chains.as_deref()),
    )
    .into_iter()
    .map(|center| fitness_center_hateoas(country, center, base_url.clone()))
    .collect::<Vec<_>>();
    Ok(VecResponse::new(centers).hateoas().json())
}

async fn get_fitness_center(
    OriginalUri(original_uri): OriginalUri,
    Path((code, id)): Path<(String, u32)>,
    State(WebState { datasets, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<FitnessCenterDto> {
    let (country, collection) = dataset(&datasets, &code, original_uri.path())?;
    let center = find_center(collection, id, original_uri.path())?;
    Ok(fitness_center_hateoas(country, center, base_url).json())
}

async fn search_charging_stations(
    OriginalUri(original_uri): OriginalUri,
    Path((code, id)): Path<(String, u32)>,
    State(WebState {
        datasets,
        charging_client,
    }): State<WebState>,
    Query(params): Query<SearchParams>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<SearchDto> {
    let (country, collection) = dataset(&datasets, &code, original_uri.path())?;
    let center = find_center(collection, id, original_uri.path())?;

    let radius_meters = params.radius.unwrap_or(DEFAULT_RADIUS_METERS);
    let mut query = SearchQuery::new(center, radius_meters);
    if let Some(chain) = params.chain {
        query = query.with_chain_filter(chain);
    }

    let result = search::search(&query, charging_client.as_ref())
        .await
        .map_err(|why| {
            log::warn!("charging station search around {} failed: {}", query.center.id, why);
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })?;

    let markers = result.to_markers();
    let dto = SearchDto {
        retrieved_at: Local::now(),
        radius_meters,
        chain_filter: query.chain().map(str::to_owned),
        view: MapView::around(&result.center, radius_meters),
        markers,
        fitness_center: fitness_center_hateoas(country, result.center, base_url.clone()),
        charging_stations: result
            .stations
            .into_iter()
            .map(|station| charging_station_hateoas(station, base_url.clone()))
            .collect(),
    };

    let mut search_params = form_urlencoded::Serializer::new(String::new());
    search_params.append_pair("radius", &radius_meters.to_string());
    if let Some(chain) = query.chain() {
        search_params.append_pair("chain", chain);
    }
    let self_link = countries::resource!(
        "/{}/fitness-centers/{}/charging-stations?{}",
        country.code(),
        id,
        search_params.finish()
    );
    Ok(hateoas::Response::builder(dto, base_url)
        .link(rel::SELF, self_link)
        .link_extern(rel::PROVIDER, "https://openchargemap.org")
        .build()
        .json())
}

fn find_center(
    collection: &fitness_data::FitnessCenterCollection,
    id: u32,
    uri: &str,
) -> RouteResult<FitnessCenter> {
    collection
        .get(&FitnessCenterId::new(id))
        .cloned()
        .ok_or_else(|| {
            RouteErrorResponse::not_found(&Method::GET, uri)
                .with_detailed_information(format!("no fitness center with id {id}"))
        })
}

fn fitness_center_hateoas(
    country: Country,
    center: FitnessCenter,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<FitnessCenterDto> {
    let code = country.code();
    let id = center.id;
    hateoas::Response::builder(
        FitnessCenterDto {
            details: FitnessCenterDetails::from(&center),
            fitness_center: center,
        },
        base_url,
    )
    .link(rel::SELF, countries::resource!("/{}/fitness-centers/{}", code, id))
    .link(
        rel::CHARGING_STATIONS,
        countries::resource!("/{}/fitness-centers/{}/charging-stations", code, id),
    )
    .link(rel::COUNTRY, countries::resource!("/{}", code))
    .build()
}

fn charging_station_hateoas(
    station: ChargingStation,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<ChargingStationDto> {
    let provider_url = format!("{}/{}", OPEN_CHARGE_MAP_POI_URL, station.id);
    hateoas::Response::builder(
        ChargingStationDto {
            details: ChargingStationDetails::from(&station),
            charging_station: station,
        },
        base_url,
    )
    .link_extern(rel::PROVIDER, provider_url)
    .build()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use indexmap::IndexMap;
    use model::{charging_station::metadata, Coordinates, MarkerKind};
    use search::{
        stub::{CountingChargingStationClient, FailingChargingStationClient, StaticChargingStationClient},
        SearchError,
    };
    use serde_json::Value;
    use utility::id::Id;

    use super::*;
    use crate::api::v1::test_support::{base_url, state, uri};

    const SEARCH_URI: &str = "/api/v1/countries/de/fitness-centers/0/charging-stations";

    fn station(id: &str, distance_meters: f64, operator: &str) -> ChargingStation {
        let mut fields = IndexMap::new();
        fields.insert(metadata::NAME.to_owned(), Value::from(format!("Ladepunkt {id}")));
        fields.insert(metadata::OPERATOR.to_owned(), Value::from(operator));
        ChargingStation {
            id: Id::new(id.to_owned()),
            coordinates: Coordinates {
                latitude: 53.08,
                longitude: 8.80,
            },
            distance_meters,
            metadata: fields,
        }
    }

    fn stations() -> Vec<ChargingStation> {
        vec![station("1", 100.0, "swb"), station("2", 400.0, "EnBW")]
    }

    fn params(radius: Option<f64>, chain: Option<&str>) -> Query<SearchParams> {
        Query(SearchParams {
            radius,
            chain: chain.map(str::to_owned),
        })
    }

    #[tokio::test]
    async fn lists_centers_of_a_city_and_chain() {
        let response = get_fitness_centers(
            uri("/api/v1/countries/de/fitness-centers"),
            Path("de".to_owned()),
            State(state(StaticChargingStationClient::default())),
            Query(FitnessCentersQuery {
                city: Some("bremen".to_owned()),
                chains: Some("FitStudio GmbH, Kieser".to_owned()),
            }),
            base_url(),
        )
        .await
        .unwrap()
        .0;
        let centers = response.content.data;
        assert_eq!(centers.len(), 1);
        assert_eq!(centers[0].content.details.title, "FitStudio");
        assert_eq!(centers[0].content.details.opening_hours, "Mo-Fr 06:00-23:00");
        assert_eq!(
            centers[0].link(rel::CHARGING_STATIONS),
            Some("http://localhost/api/v1/countries/DE/fitness-centers/0/charging-stations")
        );
    }

    #[tokio::test]
    async fn unknown_center_is_not_found() {
        let error = get_fitness_center(
            uri("/api/v1/countries/de/fitness-centers/99"),
            Path(("de".to_owned(), 99)),
            State(state(StaticChargingStationClient::default())),
            base_url(),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status_code, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn search_around_a_center() {
        let response = search_charging_stations(
            uri(SEARCH_URI),
            Path(("de".to_owned(), 0)),
            State(state(StaticChargingStationClient::respecting_radius(stations()))),
            params(Some(500.0), None),
            base_url(),
        )
        .await
        .unwrap()
        .0;
        assert_eq!(
            response.link(rel::SELF),
            Some(concat!(
                "http://localhost/api/v1/countries/DE/fitness-centers/0/charging-stations",
                "?radius=500"
            ))
        );
        let search = response.content;
        assert_eq!(search.radius_meters, 500.0);
        assert_eq!(search.charging_stations.len(), 2);
        assert_eq!(search.charging_stations[0].content.details.distance, "100 m");
        assert_eq!(
            search.charging_stations[1].link(rel::PROVIDER),
            Some("https://openchargemap.org/site/poi/details/2")
        );
        assert_eq!(search.markers.len(), 3);
        assert_eq!(search.markers[0].kind, MarkerKind::FitnessCenter);
        assert!(search.markers[0].highlighted);
        assert_eq!(search.view.center, search.fitness_center.content.fitness_center.coordinates);
    }

    #[tokio::test]
    async fn search_with_chain_filter() {
        let response = search_charging_stations(
            uri(SEARCH_URI),
            Path(("de".to_owned(), 0)),
            State(state(StaticChargingStationClient::new(stations()))),
            params(None, Some(" enbw ")),
            base_url(),
        )
        .await
        .unwrap()
        .0;
        assert_eq!(
            response.link(rel::SELF),
            Some(concat!(
                "http://localhost/api/v1/countries/DE/fitness-centers/0/charging-stations",
                "?radius=10000&chain=enbw"
            ))
        );
        let search = response.content;
        assert_eq!(search.radius_meters, DEFAULT_RADIUS_METERS);
        assert_eq!(search.chain_filter.as_deref(), Some("enbw"));
        assert_eq!(search.charging_stations.len(), 1);
        assert_eq!(search.charging_stations[0].content.charging_station.id.raw(), "2");
    }

    #[tokio::test]
    async fn invalid_radius_is_a_bad_request() {
        let client = Arc::new(CountingChargingStationClient::new(
            StaticChargingStationClient::new(stations()),
        ));
        let error = search_charging_stations(
            uri(SEARCH_URI),
            Path(("de".to_owned(), 0)),
            State(state(client.clone())),
            params(Some(-5.0), None),
            base_url(),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn upstream_failures_keep_their_status() {
        let cases = [
            (
                SearchError::unavailable("timeout"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                SearchError::UpstreamRateLimited { retry_after: None },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (SearchError::MissingApiKey, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (failure, status) in cases {
            let error = search_charging_stations(
                uri(SEARCH_URI),
                Path(("de".to_owned(), 0)),
                State(state(FailingChargingStationClient::new(failure))),
                params(None, None),
                base_url(),
            )
            .await
            .unwrap_err();
            assert_eq!(error.status_code, status);
            assert_eq!(error.requested_uri.as_deref(), Some(SEARCH_URI));
        }
    }
}
