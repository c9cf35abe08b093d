//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module stitches the backend pass-through routes and Leptos SSR
//! rendering under a single Axum router, so the browser only ever talks to
//! one origin. `/api/*` and `/uploads/*` are forwarded to the content
//! backend; everything else is rendered by the Leptos app.

pub mod proxy;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{any, get};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Health check and backend pass-through routes.
pub fn backend_routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/{*path}", any(proxy::forward))
        .route("/uploads/{*path}", any(proxy::forward))
        .with_state(state)
}

/// Full host router: pass-through routes, Leptos SSR and the `/pkg` assets.
pub fn app(state: AppState, leptos_options: LeptosOptions) -> Router {
    let routes = generate_route_list(fishery_client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || fishery_client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Compiled WASM, JS glue and CSS live under `<site_root>/pkg`.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    backend_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
