//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the pooled HTTP client used to reach the content backend and the
//! forwarding limits taken from `ServerConfig`.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS, ServerConfig};

/// Clone is required by Axum; the client is internally reference counted.
#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub backend_url: Arc<str>,
    pub body_limit_bytes: usize,
}

impl AppState {
    /// Build state for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        // Redirects are relayed to the browser rather than followed here.
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { http, backend_url: Arc::from(config.backend_url.as_str()), body_limit_bytes: config.body_limit_bytes })
    }
}
