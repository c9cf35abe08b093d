//! REST client for the content backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): the transport helpers fail with
//! [`ApiError::Unavailable`] since these endpoints are only meaningful in the
//! browser.
//!
//! DESIGN
//! ======
//! Call groups are traits (`AuthApi`, `SettingsApi`) so the state stores can
//! be driven by in-memory fakes in tests. `HttpApi` is the one production
//! implementation; it reads the session token from its `TokenStore` on every
//! request and sends it as a bearer `Authorization` header.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics. Non-2xx statuses and
//! `success: false` envelopes become `ApiError::Rejected` carrying the
//! backend's `message`; bodies that fail to decode become `Malformed`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use serde::Serialize;
#[cfg(any(test, feature = "hydrate"))]
use serde::de::DeserializeOwned;

use super::error::ApiError;
#[cfg(any(test, feature = "hydrate"))]
use super::types::{Envelope, ErrorBody};
use super::types::{AdminIdentity, Credentials, CurrentAdmin, Session, SettingsUpdate, SiteSettings};
use crate::util::token_store::{BrowserTokenStore, TokenStore};

/// Base path of the backend API, overridable at build time.
pub const API_BASE: &str = match option_env!("FISHERY_API_BASE") {
    Some(base) => base,
    None => "/api",
};

pub const LOGIN_PATH: &str = "/auth/login";
pub const CURRENT_ADMIN_PATH: &str = "/auth/me";
pub const PUBLIC_SETTINGS_PATH: &str = "/settings/public";
pub const SETTINGS_PATH: &str = "/settings";

/// Authentication calls used by the auth store.
#[async_trait(?Send)]
pub trait AuthApi {
    /// Exchange credentials for a session via `POST /auth/login`.
    async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError>;

    /// Resolve the stored token to its admin via `GET /auth/me`.
    async fn current_admin(&self) -> Result<AdminIdentity, ApiError>;
}

/// Site settings calls used by the settings store.
#[async_trait(?Send)]
pub trait SettingsApi {
    /// Fetch the public settings snapshot via `GET /settings/public`.
    async fn public_settings(&self) -> Result<SiteSettings, ApiError>;

    /// Submit a (partial) update via `PUT /settings` and return the server's
    /// canonical snapshot.
    async fn update_settings(&self, update: &SettingsUpdate) -> Result<SiteSettings, ApiError>;
}

/// HTTP implementation of the backend call groups.
#[derive(Clone, Debug)]
pub struct HttpApi<S = BrowserTokenStore> {
    base: String,
    tokens: S,
}

impl Default for HttpApi {
    fn default() -> Self {
        Self::new(API_BASE, BrowserTokenStore)
    }
}

impl<S: TokenStore> HttpApi<S> {
    pub fn new(base: &str, tokens: S) -> Self {
        Self { base: base.trim_end_matches('/').to_owned(), tokens }
    }

    /// Absolute request URL for an API `path`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// `Authorization` header value for the stored token, if any.
    pub fn authorization(&self) -> Option<String> {
        self.tokens.get().map(|token| bearer_header(&token))
    }

    #[cfg(feature = "hydrate")]
    fn authorize(&self, builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        match self.authorization() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }
}

fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Decode a backend response into the envelope's `data`.
#[cfg(any(test, feature = "hydrate"))]
fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_default();
        return Err(ApiError::Rejected { status, message });
    }
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
    if !envelope.success {
        return Err(ApiError::Rejected { status, message: envelope.message.unwrap_or_default() });
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Malformed("response has no data".to_owned()))
}

/// Write verbs used by the backend API.
#[derive(Clone, Copy, Debug)]
enum WriteMethod {
    Post,
    Put,
}

#[cfg(feature = "hydrate")]
async fn fetch<T: DeserializeOwned>(request: gloo_net::http::Request) -> Result<T, ApiError> {
    let resp = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let status = resp.status();
    let body = resp.text().await.map_err(|e| ApiError::Malformed(e.to_string()))?;
    decode_envelope(status, &body)
}

#[cfg(feature = "hydrate")]
impl<S: TokenStore> HttpApi<S> {
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self
            .authorize(gloo_net::http::Request::get(&self.endpoint(path)))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        fetch(request).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: WriteMethod,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        let builder = match method {
            WriteMethod::Post => gloo_net::http::Request::post(&url),
            WriteMethod::Put => gloo_net::http::Request::put(&url),
        };
        let request = self
            .authorize(builder)
            .json(body)
            .map_err(|e| ApiError::Malformed(e.to_string()))?;
        fetch(request).await
    }
}

#[cfg(not(feature = "hydrate"))]
impl<S: TokenStore> HttpApi<S> {
    async fn get_json<T>(&self, _path: &str) -> Result<T, ApiError> {
        Err(ApiError::Unavailable)
    }

    async fn send_json<B: Serialize, T>(&self, _method: WriteMethod, _path: &str, _body: &B) -> Result<T, ApiError> {
        Err(ApiError::Unavailable)
    }
}

#[async_trait(?Send)]
impl<S: TokenStore> AuthApi for HttpApi<S> {
    async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        self.send_json(WriteMethod::Post, LOGIN_PATH, credentials).await
    }

    async fn current_admin(&self) -> Result<AdminIdentity, ApiError> {
        let current: CurrentAdmin = self.get_json(CURRENT_ADMIN_PATH).await?;
        Ok(current.admin)
    }
}

#[async_trait(?Send)]
impl<S: TokenStore> SettingsApi for HttpApi<S> {
    async fn public_settings(&self) -> Result<SiteSettings, ApiError> {
        self.get_json(PUBLIC_SETTINGS_PATH).await
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<SiteSettings, ApiError> {
        self.send_json(WriteMethod::Put, SETTINGS_PATH, update).await
    }
}
