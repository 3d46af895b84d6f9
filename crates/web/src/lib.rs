pub use crate::common::RouteResult;
pub use crate::config::Config;

use std::{path::Path, sync::Arc};

use axum::{extract::FromRef, routing::get_service, Router};
use fitness_data::CountryDatasets;
use search::ChargingStationClient;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};

pub mod api;
pub mod common;
pub mod config;
pub mod hateoas;
pub mod middleware;

#[derive(Clone, FromRef)]
pub struct WebState {
    pub datasets: Arc<CountryDatasets>,
    pub charging_client: Arc<dyn ChargingStationClient>,
}

pub async fn start_web_server(state: WebState, config: &Config) -> std::io::Result<()> {
    let routes = Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(static_content_router(&config.static_dir));

    let listener = TcpListener::bind(config.bind_address).await?;
    log::info!("listening on http://{}", config.bind_address);
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}

fn static_content_router(static_dir: &Path) -> Router {
    Router::new().nest_service(
        "/",
        get_service(
            ServeDir::new(static_dir)
                .not_found_service(ServeFile::new(static_dir.join("error404.html"))),
        ),
    )
}
