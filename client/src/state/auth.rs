//! Auth-session state for the admin area.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthStore` owns the session token and the reactive `AuthState` read by the
//! protected route gate, the login page and the dashboard. It is provided
//! through context by `AuthProvider`; tests build isolated stores over fake
//! APIs and in-memory token storage.
//!
//! CONCURRENCY
//! ===========
//! Every `login` and `verify_token` call draws a ticket. A success is applied
//! only when its ticket is newer than the last applied success, so among
//! overlapping attempts the newest-issued success wins whatever order the
//! responses arrive in. A failure never displaces an established session.
//! `logout` invalidates every ticket issued before it, so a response that
//! lands after logout cannot resurrect the session. `loading` stays true while
//! any valid ticket is outstanding.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use leptos::prelude::*;

use crate::net::api::AuthApi;
use crate::net::types::{AdminIdentity, Credentials};
use crate::util::token_store::TokenStore;

/// Message shown when a login fails without a backend-provided reason.
pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed";

/// Authentication state for the current browser session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub admin: Option<AdminIdentity>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Coarse lifecycle phase derived from [`AuthState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    Unauthenticated,
    Authenticating,
    Authenticated,
    Error,
}

impl AuthState {
    /// State before startup verification has settled.
    pub fn starting() -> Self {
        Self { loading: true, ..Self::default() }
    }

    /// The only predicate that gates admin access.
    pub fn is_authenticated(&self) -> bool {
        self.admin.is_some() && self.token.is_some()
    }

    pub fn phase(&self) -> AuthPhase {
        if self.loading {
            AuthPhase::Authenticating
        } else if self.is_authenticated() {
            AuthPhase::Authenticated
        } else if self.error.is_some() {
            AuthPhase::Error
        } else {
            AuthPhase::Unauthenticated
        }
    }
}

#[derive(Debug, Default)]
struct Tickets {
    issued: u64,
    /// Tickets below this were issued before the last logout.
    floor: u64,
    /// Ticket of the last applied success.
    applied: u64,
    in_flight: usize,
}

impl Tickets {
    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.in_flight += 1;
        self.issued
    }

    fn is_valid(&self, ticket: u64) -> bool {
        ticket >= self.floor
    }

    fn accepts_success(&self, ticket: u64) -> bool {
        self.is_valid(ticket) && ticket > self.applied
    }

    /// Retire a valid ticket; returns whether requests remain outstanding.
    fn settle(&mut self, ticket: u64) -> bool {
        if self.is_valid(ticket) {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        self.in_flight > 0
    }

    fn invalidate(&mut self) {
        self.floor = self.issued + 1;
        self.in_flight = 0;
    }
}

/// How a settled outcome wants to affect the session.
#[derive(Clone, Copy)]
enum Claim {
    /// Establish a session; recorded as the newest applied success.
    Success,
    /// Report a failure; never displaces an established session.
    Failure,
    /// End the session a request was verifying, unless a newer success won.
    Revoke,
}

/// What a settled request is allowed to do to shared state.
enum Settled {
    Stale,
    Apply { loading: bool },
    Skip { loading: bool },
}

/// Session store composing the auth API, token storage and reactive state.
#[derive(Clone)]
pub struct AuthStore<A, S> {
    api: A,
    tokens: S,
    state: RwSignal<AuthState>,
    tickets: Arc<Mutex<Tickets>>,
}

impl<A: AuthApi, S: TokenStore> AuthStore<A, S> {
    pub fn new(api: A, tokens: S) -> Self {
        Self {
            api,
            tokens,
            state: RwSignal::new(AuthState::starting()),
            tickets: Arc::new(Mutex::new(Tickets::default())),
        }
    }

    /// Reactive view of the session state.
    pub fn state(&self) -> ReadSignal<AuthState> {
        self.state.read_only()
    }

    /// Current state without tracking.
    pub fn snapshot(&self) -> AuthState {
        self.state.get_untracked()
    }

    /// Startup entry: verify a persisted token, or settle straight to
    /// unauthenticated when there is none.
    pub async fn bootstrap(&self) {
        if self.tokens.get().is_some() {
            self.verify_token().await;
        } else {
            let loading = self.lock().in_flight > 0;
            self.state.update(|s| s.loading = loading);
        }
    }

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns the backend's message, or [`LOGIN_FALLBACK_MESSAGE`], when the
    /// backend rejects the credentials or cannot be reached.
    pub async fn login(&self, credentials: Credentials) -> Result<AdminIdentity, String> {
        let ticket = self.begin();
        log::info!("admin login attempt for {}", credentials.username);
        let outcome = self.api.login(&credentials).await;

        match outcome {
            Ok(session) => {
                match self.settle(ticket, Claim::Success) {
                    Settled::Apply { loading } => {
                        self.tokens.set(&session.token);
                        self.state.set(AuthState {
                            admin: Some(session.admin.clone()),
                            token: Some(session.token),
                            loading,
                            error: None,
                        });
                        log::info!("admin {} signed in", session.admin.display_name());
                    }
                    Settled::Skip { loading } => self.state.update(|s| s.loading = loading),
                    Settled::Stale => {}
                }
                Ok(session.admin)
            }
            Err(err) => {
                let message = err.message_or(LOGIN_FALLBACK_MESSAGE);
                log::warn!("admin login failed: {err}");
                if let Settled::Apply { loading } = self.settle(ticket, Claim::Failure) {
                    self.state.update(|s| {
                        s.loading = loading;
                        if !s.is_authenticated() {
                            s.admin = None;
                            s.token = None;
                            s.error = Some(message.clone());
                        }
                    });
                }
                Err(message)
            }
        }
    }

    /// Confirm the persisted token with the backend.
    ///
    /// A rejected or unverifiable token ends the session like `logout`,
    /// except that attempts issued after verification began are left to
    /// settle on their own. Returns whether the token was accepted.
    pub async fn verify_token(&self) -> bool {
        let Some(token) = self.tokens.get() else {
            let loading = self.lock().in_flight > 0;
            self.state.update(|s| s.loading = loading);
            return false;
        };
        let ticket = self.begin();
        let outcome = self.api.current_admin().await;
        let claim = if outcome.is_ok() { Claim::Success } else { Claim::Revoke };

        match (outcome, self.settle(ticket, claim)) {
            (Ok(admin), Settled::Apply { loading }) => {
                self.state.set(AuthState { admin: Some(admin), token: Some(token), loading, error: None });
                true
            }
            (Ok(_), Settled::Skip { loading }) => {
                self.state.update(|s| s.loading = loading);
                true
            }
            (Err(err), Settled::Apply { loading }) => {
                match err.status() {
                    Some(401 | 403) => log::info!("stored session expired: {err}"),
                    _ => log::warn!("stored session could not be verified: {err}"),
                }
                if self.tokens.get().as_deref() == Some(token.as_str()) {
                    self.tokens.delete();
                }
                self.state.set(AuthState { loading, ..AuthState::default() });
                false
            }
            (Err(_), Settled::Skip { loading }) => {
                self.state.update(|s| s.loading = loading);
                false
            }
            (outcome, Settled::Stale) => outcome.is_ok(),
        }
    }

    /// Drop the session. Safe to call when already signed out.
    pub fn logout(&self) {
        self.lock().invalidate();
        self.tokens.delete();
        self.state.set(AuthState::default());
        log::info!("admin session cleared");
    }

    /// Forget the last error without touching the session.
    pub fn clear_error(&self) {
        if self.state.with_untracked(|s| s.error.is_some()) {
            self.state.update(|s| s.error = None);
        }
    }

    fn begin(&self) -> u64 {
        let ticket = self.lock().issue();
        self.state.update(|s| s.loading = true);
        ticket
    }

    /// Retire `ticket` and decide whether its outcome may touch state.
    fn settle(&self, ticket: u64, claim: Claim) -> Settled {
        let mut tickets = self.lock();
        if !tickets.is_valid(ticket) {
            return Settled::Stale;
        }
        let apply = match claim {
            Claim::Failure => true,
            Claim::Success | Claim::Revoke => tickets.accepts_success(ticket),
        };
        if apply && matches!(claim, Claim::Success) {
            tickets.applied = ticket;
        }
        let loading = tickets.settle(ticket);
        if apply { Settled::Apply { loading } } else { Settled::Skip { loading } }
    }

    fn lock(&self) -> MutexGuard<'_, Tickets> {
        self.tickets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
