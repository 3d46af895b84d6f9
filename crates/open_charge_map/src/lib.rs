use std::error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use search::SearchError;

pub mod client;
pub mod response;

pub use client::{OpenChargeMapClient, OpenChargeMapCredentials};

#[derive(Debug, Clone)]
pub enum ApiError {
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
    /// The provider rejected the query parameters.
    BadRequest {
        status_code: reqwest::StatusCode,
        response: Option<String>,
    },
    RateLimitReached {
        retry_after: Option<Duration>,
    },
    /// 401/403, the API key is unknown or revoked.
    Unauthorized {
        status_code: reqwest::StatusCode,
        response: Option<String>,
    },
    MissingApiKey,
    InvalidQuery(String),
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            ApiError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            ApiError::InvalidResponse {
                status_code,
                url,
                response,
            } => match response {
                Some(text) => {
                    write!(f, "Invalid Response ({}) {}: {}", status_code, text, url)
                }
                None => write!(f, "Invalid Response ({}) {}", status_code, url),
            },
            ApiError::BadRequest {
                status_code,
                response,
            } => match response {
                Some(text) => write!(f, "Rejected query ({}): {}", status_code, text),
                None => write!(f, "Rejected query ({})", status_code),
            },
            ApiError::RateLimitReached { retry_after } => match retry_after {
                Some(after) => write!(f, "Rate limit reached, retry after {}s.", after.as_secs()),
                None => write!(f, "Rate limit reached."),
            },
            ApiError::Unauthorized {
                status_code,
                response,
            } => match response {
                Some(text) => write!(f, "API key rejected ({}): {}", status_code, text),
                None => write!(f, "API key rejected ({})", status_code),
            },
            ApiError::MissingApiKey => write!(f, "No Open Charge Map API key configured."),
            ApiError::InvalidQuery(why) => write!(f, "Invalid query: {why}"),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::RequestError(Arc::new(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::JsonError(Arc::new(e))
    }
}

impl From<ApiError> for SearchError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::RateLimitReached { retry_after } => {
                SearchError::UpstreamRateLimited { retry_after }
            }
            ApiError::MissingApiKey => SearchError::MissingApiKey,
            ApiError::InvalidQuery(why) => SearchError::InvalidQuery(why),
            ApiError::BadRequest { .. } => SearchError::InvalidQuery(e.to_string()),
            ApiError::Unauthorized { .. } => SearchError::ApiKeyRejected(e.to_string()),
            ApiError::RequestError(_)
            | ApiError::JsonError(_)
            | ApiError::InvalidResponse { .. } => SearchError::UpstreamUnavailable(e.to_string()),
        }
    }
}
