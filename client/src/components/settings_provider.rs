//! Settings context provider.
//!
//! Shares one `SettingsStore` with every page and loads the public settings
//! once after mount. Until that load lands (or if it fails) consumers see the
//! built-in defaults.

use leptos::prelude::*;

use crate::net::api::HttpApi;
use crate::state::settings::SettingsStore;

/// Settings store type shared through context.
pub type AppSettings = SettingsStore<HttpApi>;

#[component]
pub fn SettingsProvider(children: Children) -> impl IntoView {
    let store: AppSettings = SettingsStore::new(HttpApi::default());
    provide_context(store.clone());

    Effect::new(move |_| {
        let store = store.clone();
        leptos::task::spawn_local(async move {
            store.load().await;
        });
    });

    children()
}
