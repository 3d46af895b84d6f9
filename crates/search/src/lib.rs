use std::{result, time::Duration};

use thiserror::Error;

pub mod aggregator;
pub mod client;
pub mod stub;

pub use aggregator::{filter_by_chain, search};
pub use client::ChargingStationClient;

/// Backoff suggested to the user when the upstream does not name one.
pub const DEFAULT_RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Bad user input. Detected before any network call is made.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Network failure, timeout or unexpected upstream response.
    #[error("charging station service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The upstream quota is exhausted. Not retried automatically.
    #[error("charging station service rate limit reached")]
    UpstreamRateLimited { retry_after: Option<Duration> },

    /// No API key was configured when the first lookup was issued.
    #[error("no API key configured for the charging station service")]
    MissingApiKey,

    /// The upstream refused the configured API key. Repeating the search
    /// cannot succeed until the key is changed.
    #[error("charging station service rejected the API key: {0}")]
    ApiKeyRejected(String),
}

impl SearchError {
    pub fn invalid_query<S: Into<String>>(why: S) -> Self {
        Self::InvalidQuery(why.into())
    }

    pub fn unavailable<S: Into<String>>(why: S) -> Self {
        Self::UpstreamUnavailable(why.into())
    }

    /// Whether offering the user a retry makes sense.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_))
    }

    /// How long the user should wait before searching again, if at all.
    pub fn suggested_backoff(&self) -> Option<Duration> {
        match self {
            Self::UpstreamRateLimited { retry_after } => {
                Some(retry_after.unwrap_or(DEFAULT_RATE_LIMIT_BACKOFF))
            }
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unavailable_is_retryable() {
        assert!(SearchError::unavailable("timeout").is_retryable());
        assert!(!SearchError::invalid_query("radius").is_retryable());
        assert!(!SearchError::UpstreamRateLimited { retry_after: None }.is_retryable());
        assert!(!SearchError::MissingApiKey.is_retryable());
        assert!(!SearchError::ApiKeyRejected("401".to_owned()).is_retryable());
    }

    #[test]
    fn rate_limit_suggests_backoff() {
        let limited = SearchError::UpstreamRateLimited {
            retry_after: Some(Duration::from_secs(5)),
        };
        assert_eq!(limited.suggested_backoff(), Some(Duration::from_secs(5)));

        let limited = SearchError::UpstreamRateLimited { retry_after: None };
        assert_eq!(limited.suggested_backoff(), Some(DEFAULT_RATE_LIMIT_BACKOFF));

        assert_eq!(SearchError::unavailable("down").suggested_backoff(), None);
    }
}
