use axum::{
    extract::{OriginalUri, Query, Request},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::MethodFilter,
    Json,
};
use model::{country::UnknownCountry, ExampleData};
use schemars::{schema_for, schema_for_value, JsonSchema};
use search::SearchError;
use serde::{Deserialize, Serialize};

use crate::hateoas;

pub type RouteResult<O> = Result<O, RouteErrorResponse>;
pub type HateoasResult<O> = RouteResult<Json<hateoas::Response<O>>>;

/// A `MethodFilter` that matches all http methods.
pub(crate) const METHOD_FILTER_ALL: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE);

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VecResponse<T> {
    pub data: Vec<T>,
    pub total_items: usize,
}

impl<T> VecResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            total_items: data.len(),
            data,
        }
    }

    pub fn hateoas(self) -> hateoas::Response<Self> {
        hateoas::Response::new(self)
    }
}

// - Services returning commonly used responses -

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SchemaParams {
    #[serde(default = "Default::default")]
    example_data: bool,
}

pub(crate) async fn schema<T: ExampleData + JsonSchema + Serialize>(
    Query(params): Query<SchemaParams>,
) -> impl IntoResponse {
    if params.example_data {
        Json(schema_for_value!(T::example_data()))
    } else {
        Json(schema_for!(T))
    }
}

pub(crate) async fn schema_no_example<T: JsonSchema>() -> impl IntoResponse {
    Json(schema_for!(T))
}

pub(crate) async fn route_not_found(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    RouteErrorResponse::not_found(req.method(), original_uri.path())
}

// - Commonly used responeses -

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteErrorResponse {
    #[serde(skip)]
    pub status_code: StatusCode,
    pub http_method: Option<String>,
    pub requested_uri: Option<String>,
    pub message: Option<String>,
    pub detailed_information: Option<String>,
    /// Whether repeating the same request may succeed.
    pub retryable: Option<bool>,
    pub retry_after_secs: Option<u64>,
}

impl RouteErrorResponse {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            http_method: None,
            requested_uri: None,
            message: None,
            detailed_information: None,
            retryable: None,
            retry_after_secs: None,
        }
    }

    pub fn not_found(method: &Method, uri: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND)
            .with_method(method)
            .with_uri(uri)
            .with_default_message()
    }

    pub fn with_method(mut self, method: &Method) -> Self {
        self.http_method = Some(method.to_string());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.requested_uri = Some(uri.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_default_message(self) -> Self {
        let message = self
            .status_code
            .canonical_reason()
            .unwrap_or("i dunno what happened here :/");
        self.with_message(message)
    }

    pub fn with_detailed_information(mut self, message: impl Into<String>) -> Self {
        self.detailed_information = Some(message.into());
        self
    }
}

impl From<SearchError> for RouteErrorResponse {
    fn from(value: SearchError) -> Self {
        let detail = value.to_string();
        let response = match &value {
            SearchError::InvalidQuery(_) => Self::new(StatusCode::BAD_REQUEST)
                .with_message("The search parameters are invalid."),
            SearchError::UpstreamUnavailable(_) => Self::new(StatusCode::SERVICE_UNAVAILABLE)
                .with_message("The charging station service is unavailable, please retry."),
            SearchError::UpstreamRateLimited { .. } => Self::new(StatusCode::TOO_MANY_REQUESTS)
                .with_message("Too many searches, please try again later."),
            SearchError::MissingApiKey => Self::new(StatusCode::INTERNAL_SERVER_ERROR)
                .with_message("The charging station service is not configured."),
            SearchError::ApiKeyRejected(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR)
                .with_message("The charging station service rejected the configured API key."),
        };
        Self {
            retryable: Some(value.is_retryable()),
            retry_after_secs: value.suggested_backoff().map(|after| after.as_secs()),
            ..response.with_detailed_information(detail)
        }
    }
}

impl From<UnknownCountry> for RouteErrorResponse {
    fn from(value: UnknownCountry) -> Self {
        Self::new(StatusCode::NOT_FOUND)
            .with_message("The requested country does not exist.")
            .with_detailed_information(value.to_string())
    }
}

impl IntoResponse for RouteErrorResponse {
    fn into_response(self) -> axum::response::Response {
        let retry_after = self.retry_after_secs.map(HeaderValue::from);
        let mut response = (self.status_code, Json(self)).into_response();
        if let Some(retry_after) = retry_after {
            response.headers_mut().insert(header::RETRY_AFTER, retry_after);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn search_errors_map_to_statuses() {
        let cases = [
            (SearchError::invalid_query("radius"), StatusCode::BAD_REQUEST),
            (
                SearchError::unavailable("timeout"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                SearchError::UpstreamRateLimited { retry_after: None },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (SearchError::MissingApiKey, StatusCode::INTERNAL_SERVER_ERROR),
            (
                SearchError::ApiKeyRejected("401".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(RouteErrorResponse::from(error).status_code, status);
        }
    }

    #[test]
    fn unavailable_is_retryable() {
        let response = RouteErrorResponse::from(SearchError::unavailable("timeout"));
        assert_eq!(response.retryable, Some(true));
        assert_eq!(response.retry_after_secs, None);
    }

    #[test]
    fn rejected_key_is_not_retryable() {
        let response = RouteErrorResponse::from(SearchError::ApiKeyRejected("403".to_owned()));
        assert_eq!(response.retryable, Some(false));
        assert_eq!(response.retry_after_secs, None);
    }

    #[test]
    fn rate_limit_sets_retry_after_header() {
        let response = RouteErrorResponse::from(SearchError::UpstreamRateLimited {
            retry_after: Some(Duration::from_secs(42)),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER),
            Some(&HeaderValue::from(42u64))
        );
    }

    #[test]
    fn rate_limit_without_hint_suggests_default_backoff() {
        let response =
            RouteErrorResponse::from(SearchError::UpstreamRateLimited { retry_after: None });
        assert_eq!(
            response.retry_after_secs,
            Some(search::DEFAULT_RATE_LIMIT_BACKOFF.as_secs())
        );
    }

    #[test]
    fn unknown_country_is_not_found() {
        let response = RouteErrorResponse::from(UnknownCountry("XX".to_owned()));
        assert_eq!(response.status_code, StatusCode::NOT_FOUND);
    }
}
