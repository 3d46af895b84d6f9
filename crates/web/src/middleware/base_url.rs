use axum::{
    extract::{self},
    http::HeaderMap,
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;

/// Public address of the API as seen by the client, honouring reverse proxy
/// headers, so that links point back through the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    proto: String,
    host: String,
    prefix: String,
}

impl BaseUrl {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        BaseUrl {
            proto: header("x-forwarded-proto").unwrap_or("http").to_owned(),
            host: header("x-forwarded-host")
                .or_else(|| header("host"))
                .unwrap_or("localhost")
                .to_owned(),
            prefix: header("x-forwarded-prefix")
                .unwrap_or("")
                .trim_end_matches('/')
                .to_owned(),
        }
    }

    pub fn full_url<S: Into<String>>(&self, path: S) -> String {
        format!(
            "{}://{}{}{}",
            self.proto,
            self.host,
            self.prefix,
            path.into()
        )
    }
}

pub async fn base_url_middleware(mut req: extract::Request, next: Next) -> impl IntoResponse {
    let base_url = BaseUrl::from_headers(req.headers());
    req.extensions_mut().insert(Arc::new(base_url));

    next.run(req).await
}
