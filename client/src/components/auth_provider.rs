//! Auth context provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps the whole app. Builds the session store over the HTTP API and browser
//! token storage, shares it through context, and runs startup verification
//! once the app is mounted in the browser. Effects never run during SSR, so
//! the server always renders the "session pending" state.

use leptos::prelude::*;

use crate::net::api::HttpApi;
use crate::state::auth::AuthStore;
use crate::util::token_store::BrowserTokenStore;

/// Session store type shared through context.
pub type AppAuth = AuthStore<HttpApi, BrowserTokenStore>;

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let store: AppAuth = AuthStore::new(HttpApi::default(), BrowserTokenStore);
    provide_context(store.clone());

    Effect::new(move |_| {
        let store = store.clone();
        leptos::task::spawn_local(async move {
            store.bootstrap().await;
        });
    });

    children()
}
