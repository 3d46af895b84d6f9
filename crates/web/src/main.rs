use std::sync::Arc;

use anyhow::Context;
use fitness_data::CountryDatasets;
use open_charge_map::OpenChargeMapClient;
use web::{start_web_server, Config, WebState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;

    // fitness centers
    let datasets = CountryDatasets::load(&config.datasets)
        .context("could not load the fitness center datasets")?;

    // charging stations
    if config.open_charge_map.api_key.is_none() {
        log::warn!("OPEN_MAP_API_KEY is not set, charging station searches will fail");
    }
    let charging_client = OpenChargeMapClient::new(&config.open_charge_map)
        .context("could not create the Open Charge Map client")?;

    // web server
    start_web_server(
        WebState {
            datasets: Arc::new(datasets),
            charging_client: Arc::new(charging_client),
        },
        &config,
    )
    .await?;

    Ok(())
}
