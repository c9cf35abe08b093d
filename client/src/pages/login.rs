//! Admin login page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Submits credentials through the session store and shows its error inline.
//! Editing either field clears the previous error so it is not shown again.
//! An already-established session is forwarded to the dashboard.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::auth_provider::AppAuth;
use crate::net::types::Credentials;
use crate::util::auth::{ADMIN_ROUTE, install_authed_redirect};

pub(crate) const MISSING_FIELDS_MESSAGE: &str = "Enter both username and password.";

/// Trim the username and require both fields. The password is sent as typed.
pub(crate) fn validate_credentials(username: &str, password: &str) -> Result<Credentials, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS_MESSAGE);
    }
    Ok(Credentials::new(username, password))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AppAuth>();
    let state = auth.state();
    let navigate = use_navigate();
    install_authed_redirect(state, navigate.clone());

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let hint = RwSignal::new(None::<&'static str>);

    let clear_messages = {
        let auth = auth.clone();
        move || {
            hint.set(None);
            auth.clear_error();
        }
    };

    let on_submit = {
        let auth = auth.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if state.get_untracked().loading {
                return;
            }
            let credentials = match validate_credentials(&username.get_untracked(), &password.get_untracked()) {
                Ok(credentials) => credentials,
                Err(message) => {
                    hint.set(Some(message));
                    return;
                }
            };
            hint.set(None);
            let auth = auth.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                if auth.login(credentials).await.is_ok() {
                    password.set(String::new());
                    navigate(ADMIN_ROUTE, NavigateOptions::default());
                }
            });
        }
    };

    let message = move || hint.get().map(str::to_owned).or_else(|| state.get().error);
    let on_username = {
        let clear_messages = clear_messages.clone();
        move |ev: leptos::ev::Event| {
            username.set(event_target_value(&ev));
            clear_messages();
        }
    };
    let on_password = move |ev: leptos::ev::Event| {
        password.set(event_target_value(&ev));
        clear_messages();
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Admin Login"</h1>
                <p class="login-card__subtitle">"College of Fishery, Jabalpur"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        name="username"
                        autocomplete="username"
                        placeholder="Username"
                        required=true
                        prop:value=move || username.get()
                        on:input=on_username
                    />
                    <input
                        class="login-input"
                        type="password"
                        name="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        required=true
                        prop:value=move || password.get()
                        on:input=on_password
                    />
                    <button class="login-button" type="submit" disabled=move || state.get().loading>
                        {move || if state.get().loading { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || message().is_some()>
                    <p class="login-message" role="alert">{move || message().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}
