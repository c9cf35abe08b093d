//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{auth_provider::AuthProvider, protected_route::ProtectedRoute, settings_provider::SettingsProvider};
use crate::net::types::DEFAULT_SITE_NAME;
use crate::pages::{admin::AdminPage, home::HomePage, login::LoginPage, not_found::NotFoundPage};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// The auth and settings providers wrap the router so every route, the
/// protected ones included, sees the same stores.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/fishery.css"/>
        <Title text=DEFAULT_SITE_NAME/>

        <AuthProvider>
            <SettingsProvider>
                <Router>
                    <Routes fallback=NotFoundPage>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route path=(StaticSegment("admin"), StaticSegment("login")) view=LoginPage/>
                        <Route
                            path=StaticSegment("admin")
                            view=|| view! { <ProtectedRoute><AdminPage/></ProtectedRoute> }
                        />
                    </Routes>
                </Router>
            </SettingsProvider>
        </AuthProvider>
    }
}
