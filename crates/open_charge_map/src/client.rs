use std::env;
use std::time::Duration;

use async_trait::async_trait;
use model::{ChargingStation, Coordinates};
use reqwest::{header, StatusCode};
use search::{ChargingStationClient, SearchError};
use utility::geo;

use crate::{response::parse_stations, ApiError};

pub const OPEN_CHARGE_MAP_API_URL: &str = "https://api.openchargemap.io/v3/poi/";

pub const DEFAULT_MAX_RESULTS: u32 = 100;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest radius the provider is asked for.
pub const MAX_RADIUS_KM: f64 = 100.0;

#[derive(Clone, Debug)]
pub struct OpenChargeMapCredentials {
    /// Checked when the first lookup is issued, not at construction.
    pub api_key: Option<String>,
    pub api_url: String,
    pub max_results: u32,
    pub timeout: Duration,
}

impl Default for OpenChargeMapCredentials {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: OPEN_CHARGE_MAP_API_URL.to_owned(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl OpenChargeMapCredentials {
    /// Reads `OPEN_MAP_API_KEY`, `OPEN_MAP_API_URL`, `OPEN_MAP_MAX_RESULTS`
    /// and `OPEN_MAP_TIMEOUT_SECS`. Unset or unparsable values fall back to
    /// the defaults.
    pub fn env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env::var("OPEN_MAP_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            api_url: env::var("OPEN_MAP_API_URL").unwrap_or(defaults.api_url),
            max_results: parsed_var("OPEN_MAP_MAX_RESULTS").unwrap_or(defaults.max_results),
            timeout: parsed_var("OPEN_MAP_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = env::var(name).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("ignoring unparsable {name}={value:?}");
            None
        }
    }
}

pub struct OpenChargeMapClient {
    pub credentials: OpenChargeMapCredentials,
    http: reqwest::Client,
}

impl OpenChargeMapClient {
    pub fn new(credentials: &OpenChargeMapCredentials) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(credentials.timeout)
            .build()?;
        Ok(Self {
            credentials: credentials.clone(),
            http,
        })
    }

    /// Query parameters for one lookup, without the API key.
    pub fn query_params(
        &self,
        center: &Coordinates,
        radius_meters: f64,
    ) -> Result<Vec<(&'static str, String)>, ApiError> {
        if !center.is_valid() {
            return Err(ApiError::InvalidQuery(format!(
                "invalid coordinates ({}, {})",
                center.latitude, center.longitude
            )));
        }
        let radius_km = geo::meters_to_km(radius_meters);
        if !radius_km.is_finite() || radius_km <= 0.0 || radius_km > MAX_RADIUS_KM {
            return Err(ApiError::InvalidQuery(format!(
                "radius must be within (0, {MAX_RADIUS_KM}] km, got {radius_km} km"
            )));
        }

        Ok(vec![
            ("output", "json".to_owned()),
            ("maxresults", self.credentials.max_results.to_string()),
            // full output, so operator and connection data are included
            ("compact", "false".to_owned()),
            ("verbose", "false".to_owned()),
            ("latitude", center.latitude.to_string()),
            ("longitude", center.longitude.to_string()),
            ("distance", radius_km.to_string()),
            ("distanceunit", "KM".to_owned()),
        ])
    }

    /// Fetch the stations around `center`.
    pub async fn get_stations(
        &self,
        center: &Coordinates,
        radius_meters: f64,
    ) -> Result<Vec<ChargingStation>, ApiError> {
        let params = self.query_params(center, radius_meters)?;
        let api_key = self
            .credentials
            .api_key
            .as_deref()
            .ok_or(ApiError::MissingApiKey)?;

        let url = &self.credentials.api_url;
        log::debug!("Requesting '{url}' with {params:?}.");
        let response = self
            .http
            .get(url)
            .query(&params)
            .query(&[("key", api_key)])
            .send()
            .await
            .inspect_err(|why| log::warn!("request to '{url}' failed: {why}"))?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                parse_stations(&body, center)
            }
            other => {
                let retry_after = response
                    .headers()
                    .get(header::RETRY_AFTER)
                    .and_then(|value| value.to_str().ok())
                    .and_then(parse_retry_after);
                let text = response.text().await.ok();
                let error = status_error(other, retry_after, url, text);
                log::warn!("{error}");
                Err(error)
            }
        }
    }
}

/// Only the delay-seconds form of `Retry-After` is understood.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse().ok().map(Duration::from_secs)
}

pub fn status_error(
    status_code: StatusCode,
    retry_after: Option<Duration>,
    url: &str,
    response: Option<String>,
) -> ApiError {
    match status_code {
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimitReached { retry_after },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::BadRequest {
            status_code,
            response,
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized {
            status_code,
            response,
        },
        status_code => ApiError::InvalidResponse {
            status_code,
            url: url.to_owned(),
            response,
        },
    }
}

#[async_trait]
impl ChargingStationClient for OpenChargeMapClient {
    async fn find_nearby(
        &self,
        center: Coordinates,
        radius_meters: f64,
    ) -> Result<Vec<ChargingStation>, SearchError> {
        Ok(self.get_stations(&center, radius_meters).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BREMEN: Coordinates = Coordinates {
        latitude: 53.0793,
        longitude: 8.8017,
    };

    fn client(credentials: OpenChargeMapCredentials) -> OpenChargeMapClient {
        OpenChargeMapClient::new(&credentials).unwrap()
    }

    #[test]
    fn params_request_kilometers() {
        let client = client(OpenChargeMapCredentials::default());
        let params = client.query_params(&BREMEN, 2500.0).unwrap();
        let get = |name: &'static str| {
            params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.as_str())
        };
        assert_eq!(get("distance"), Some("2.5"));
        assert_eq!(get("distanceunit"), Some("KM"));
        assert_eq!(get("latitude"), Some("53.0793"));
        assert_eq!(get("longitude"), Some("8.8017"));
        assert_eq!(get("maxresults"), Some("100"));
        assert_eq!(get("key"), None);
    }

    #[test]
    fn params_reject_out_of_range_radius() {
        let client = client(OpenChargeMapCredentials::default());
        for radius in [0.0, -10.0, 100_001.0, f64::INFINITY] {
            assert!(matches!(
                client.query_params(&BREMEN, radius),
                Err(ApiError::InvalidQuery(_))
            ));
        }
        assert!(client.query_params(&BREMEN, 100_000.0).is_ok());
    }

    #[test]
    fn params_reject_invalid_center() {
        let client = client(OpenChargeMapCredentials::default());
        let center = Coordinates {
            latitude: 120.0,
            longitude: 8.8,
        };
        assert!(matches!(
            client.query_params(&center, 1000.0),
            Err(ApiError::InvalidQuery(_))
        ));
    }

    #[test]
    fn statuses_map_to_errors() {
        let url = OPEN_CHARGE_MAP_API_URL;
        assert!(matches!(
            status_error(
                StatusCode::TOO_MANY_REQUESTS,
                Some(Duration::from_secs(120)),
                url,
                None
            ),
            ApiError::RateLimitReached {
                retry_after: Some(after)
            } if after == Duration::from_secs(120)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, None, url, None),
            ApiError::BadRequest { .. }
        ));
        for rejected in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            assert!(matches!(
                status_error(rejected, None, url, None),
                ApiError::Unauthorized { .. }
            ));
        }
        assert!(matches!(
            status_error(StatusCode::SERVICE_UNAVAILABLE, None, url, None),
            ApiError::InvalidResponse { .. }
        ));
    }

    #[test]
    fn retry_after_in_seconds() {
        assert_eq!(parse_retry_after(" 30 "), Some(Duration::from_secs(30)));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2026 07:28:00 GMT"), None);
    }

    #[tokio::test]
    async fn missing_key_fails_without_request() {
        let client = client(OpenChargeMapCredentials {
            // nothing listens here; reaching the network would fail differently
            api_url: "http://127.0.0.1:9/".to_owned(),
            ..Default::default()
        });
        assert_eq!(
            client.find_nearby(BREMEN, 1000.0).await,
            Err(SearchError::MissingApiKey)
        );
    }

    #[tokio::test]
    async fn stalled_upstream_times_out_as_unavailable() {
        // accepts the connection but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let upstream = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        });

        let client = client(OpenChargeMapCredentials {
            api_key: Some("test-key".to_owned()),
            api_url: format!("http://{address}/"),
            timeout: Duration::from_millis(200),
            ..Default::default()
        });
        let result = client.find_nearby(BREMEN, 1000.0).await;
        upstream.abort();

        assert!(
            matches!(result, Err(SearchError::UpstreamUnavailable(_))),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn invalid_radius_fails_before_key_check() {
        let client = client(OpenChargeMapCredentials::default());
        assert!(matches!(
            client.find_nearby(BREMEN, 0.0).await,
            Err(SearchError::InvalidQuery(_))
        ));
    }
}
