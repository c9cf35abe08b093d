//! Shared auth routing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The protected route gate and the login page must agree on when a session
//! is settled, so both derive their decisions from [`gate`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// Admin login entry point.
pub const LOGIN_ROUTE: &str = "/admin/login";
/// Admin dashboard, the landing route after login.
pub const ADMIN_ROUTE: &str = "/admin";

/// Access decision for an admin-only view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Session not settled yet; render neither content nor redirect.
    Pending,
    Allow,
    Deny,
}

pub fn gate(state: &AuthState) -> Gate {
    if state.loading {
        Gate::Pending
    } else if state.is_authenticated() {
        Gate::Allow
    } else {
        Gate::Deny
    }
}

pub fn should_redirect_unauth(state: &AuthState) -> bool {
    gate(state) == Gate::Deny
}

/// True when the login page should hand an established session over to the
/// dashboard.
pub fn should_redirect_authed(state: &AuthState) -> bool {
    gate(state) == Gate::Allow
}

fn replace_history() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Redirect to the login page whenever auth has settled without a session.
pub fn install_unauth_redirect<F>(auth: ReadSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(LOGIN_ROUTE, replace_history());
        }
    });
}

/// Redirect to the dashboard whenever auth has settled with a session.
pub fn install_authed_redirect<F>(auth: ReadSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_authed(&auth.get()) {
            navigate(ADMIN_ROUTE, replace_history());
        }
    });
}
