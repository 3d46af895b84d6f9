use axum::{
    extract::State,
    routing::{get, on},
    Json, Router,
};
use fitness_data::CountryDatasets;
use model::Country;
use serde::Serialize;
use tower_http::trace::TraceLayer;

pub mod v1;

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        format!("/api{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub fn routes(state: WebState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/status", get(status).with_state(state.clone()))
        .nest_service("/v1", v1::routes(state))
        .layer(TraceLayer::new_for_http())
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Pong {
    message: &'static str,
}

async fn ping() -> Json<Pong> {
    Json(Pong { message: "pong!" })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Status {
    version: &'static str,
    datasets: Vec<DatasetStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DatasetStatus {
    country: Country,
    fitness_centers: usize,
    skipped_rows: usize,
}

async fn status(State(datasets): State<std::sync::Arc<CountryDatasets>>) -> Json<Status> {
    Json(dataset_status(&datasets))
}

fn dataset_status(datasets: &CountryDatasets) -> Status {
    Status {
        version: env!("CARGO_PKG_VERSION"),
        datasets: Country::ALL
            .into_iter()
            .map(|country| {
                let collection = datasets.get(country);
                DatasetStatus {
                    country,
                    fitness_centers: collection.len(),
                    skipped_rows: collection.report().skipped_rows(),
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lists_every_country() {
        let status = dataset_status(&CountryDatasets::default());
        assert_eq!(status.datasets.len(), 2);
        assert!(status
            .datasets
            .iter()
            .all(|dataset| dataset.fitness_centers == 0 && dataset.skipped_rows == 0));
    }
}
