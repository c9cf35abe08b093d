//! Access gate for admin-only views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the session signal on every change: while the session is settling it
//! renders a neutral placeholder (never the protected content, never a
//! redirect); once settled it either renders its children or sends the user
//! to the login page. A logout anywhere in the app evicts the view at once.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::hooks::use_navigate;

use crate::components::auth_provider::AppAuth;
use crate::util::auth::{Gate, gate, install_unauth_redirect};

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AppAuth>().state();
    install_unauth_redirect(auth, use_navigate());

    move || match gate(&auth.get()) {
        Gate::Pending => view! {
            <div class="route-loading" aria-busy="true">
                <span class="route-loading__spinner"></span>
                "Loading..."
            </div>
        }
        .into_any(),
        Gate::Allow => children(),
        Gate::Deny => ().into_any(),
    }
}
