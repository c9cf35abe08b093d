//! # fishery-client
//!
//! Leptos + WASM frontend for the College of Fishery, Jabalpur website.
//!
//! This crate contains the admin session lifecycle (token storage, the auth
//! store, the protected route gate), the site settings store, the REST client
//! for the content backend, and the page shells hosting them. The `hydrate`
//! feature builds the browser bundle; `ssr` links the same app into the host
//! server for rendering.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    leptos::mount::hydrate_body(app::App);
}
