use std::{
    env,
    net::{AddrParseError, SocketAddr},
    path::PathBuf,
};

use fitness_data::DatasetPaths;
use open_charge_map::OpenChargeMapCredentials;
use thiserror::Error;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_STATIC_DIR: &str = "./resources/www/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid BIND_ADDRESS {value:?}: {source}")]
    InvalidBindAddress {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub static_dir: PathBuf,
    pub datasets: DatasetPaths,
    pub open_charge_map: OpenChargeMapCredentials,
}

impl Config {
    /// Reads the configuration from the environment. Call `dotenvy::dotenv`
    /// first to honour a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = DatasetPaths::default();
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned());

        Ok(Self {
            bind_address: bind_address
                .parse()
                .map_err(|source| ConfigError::InvalidBindAddress {
                    value: bind_address.clone(),
                    source,
                })?,
            static_dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_owned())
                .into(),
            datasets: DatasetPaths {
                germany: env::var("FITNESS_DATA_DE")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.germany),
                france: env::var("FITNESS_DATA_FR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.france),
            },
            open_charge_map: OpenChargeMapCredentials::env(),
        })
    }
}
