//! Pass-through of `/api/*` and `/uploads/*` to the content backend.
//!
//! DESIGN
//! ======
//! Requests keep their method, path, query, body and end-to-end headers;
//! upstream responses come back with their status and body untouched.
//! Hop-by-hop headers describe a single connection and are dropped in both
//! directions. Transport failures never leak upstream details to the
//! browser: they surface as `502 {"message": "backend unavailable"}`.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::Json;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Connection-scoped headers (RFC 9110 §7.6.1) plus the ones reqwest and
/// hyper recompute for the new hop.
const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
    "content-length",
];

/// Errors produced while forwarding a request.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The request body could not be read within the configured limit.
    #[error("request body rejected: {0}")]
    RequestBody(String),

    /// The backend could not be reached or its response could not be read.
    #[error("backend request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match &self {
            Self::RequestBody(_) => {
                tracing::debug!(error = %self, "proxy request body rejected");
                (StatusCode::PAYLOAD_TOO_LARGE, Json(serde_json::json!({ "message": "request body too large" })))
                    .into_response()
            }
            Self::Upstream(_) => {
                tracing::warn!(error = %self, "backend unavailable");
                (StatusCode::BAD_GATEWAY, Json(serde_json::json!({ "message": "backend unavailable" }))).into_response()
            }
        }
    }
}

/// Whether `name` may cross the proxy.
pub fn is_forwardable_header(name: &HeaderName) -> bool {
    !HOP_BY_HOP_HEADERS.contains(&name.as_str())
}

/// Backend URL for an incoming request URI: same path and query.
pub fn upstream_url(backend_url: &str, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map_or("/", |pq| pq.as_str());
    format!("{}{path_and_query}", backend_url.trim_end_matches('/'))
}

fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| is_forwardable_header(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Forward one request to the backend and relay its response.
///
/// # Errors
///
/// Returns [`ProxyError::RequestBody`] when the body exceeds the configured
/// limit and [`ProxyError::Upstream`] when the backend cannot be reached.
pub async fn forward(State(state): State<AppState>, request: Request) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, state.body_limit_bytes)
        .await
        .map_err(|e| ProxyError::RequestBody(e.to_string()))?;

    let url = upstream_url(&state.backend_url, &parts.uri);
    tracing::debug!(method = %parts.method, %url, "forwarding to backend");

    let upstream = state
        .http
        .request(parts.method, url)
        .headers(forwardable_headers(&parts.headers))
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let headers = forwardable_headers(upstream.headers());
    let bytes = upstream.bytes().await?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
