//! Site-wide settings snapshot with a built-in fallback.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SettingsProvider` creates one `SettingsStore`, loads the public settings
//! once on mount, and shares the store through context. Pages read the
//! snapshot; the admin dashboard edits it through `update_settings`.
//!
//! TRADE-OFFS
//! ==========
//! A failed load is not retried: the built-in defaults stay in place until
//! the next full page load and the failure is only recorded in `load_error`.
//! Snapshots are always replaced whole with what the server returned.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::prelude::*;

use crate::net::api::SettingsApi;
use crate::net::types::{SettingsUpdate, SiteSettings};

pub const SETTINGS_LOAD_FALLBACK_MESSAGE: &str = "Failed to load settings";
pub const SETTINGS_UPDATE_FALLBACK_MESSAGE: &str = "Failed to update settings";

/// Settings snapshot plus request bookkeeping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettingsState {
    pub settings: SiteSettings,
    pub loading: bool,
    pub saving: bool,
    /// Set when the mount-time fetch failed; the defaults remain in use.
    pub load_error: Option<String>,
}

/// Store for the site settings snapshot.
#[derive(Clone)]
pub struct SettingsStore<A> {
    api: A,
    state: RwSignal<SettingsState>,
    /// Bumped by every applied update so an older load cannot overwrite it.
    revision: Arc<AtomicU64>,
}

impl<A: SettingsApi> SettingsStore<A> {
    pub fn new(api: A) -> Self {
        Self { api, state: RwSignal::new(SettingsState::default()), revision: Arc::new(AtomicU64::new(0)) }
    }

    pub fn state(&self) -> ReadSignal<SettingsState> {
        self.state.read_only()
    }

    pub fn snapshot(&self) -> SettingsState {
        self.state.get_untracked()
    }

    /// Fetch the public settings once. Failure keeps the current snapshot.
    pub async fn load(&self) {
        let started_at = self.revision.load(Ordering::SeqCst);
        self.state.update(|s| s.loading = true);
        let outcome = self.api.public_settings().await;
        let superseded = self.revision.load(Ordering::SeqCst) != started_at;

        match outcome {
            Ok(settings) if !superseded => self.state.update(|s| {
                s.settings = settings;
                s.loading = false;
                s.load_error = None;
            }),
            Ok(_) => self.state.update(|s| s.loading = false),
            Err(err) if superseded => {
                log::debug!("settings load failed after a newer update: {err}");
                self.state.update(|s| s.loading = false);
            }
            Err(err) => {
                log::warn!("settings load failed, using defaults: {err}");
                self.state.update(|s| {
                    s.loading = false;
                    s.load_error = Some(err.message_or(SETTINGS_LOAD_FALLBACK_MESSAGE));
                });
            }
        }
    }

    /// Submit an update and adopt the server's canonical snapshot.
    ///
    /// Overlapping updates are not ordered: the last one to settle wins. The
    /// dashboard submits one at a time while `saving` is set.
    ///
    /// # Errors
    ///
    /// Returns the backend's message, or [`SETTINGS_UPDATE_FALLBACK_MESSAGE`];
    /// the previous snapshot is kept.
    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<SiteSettings, String> {
        self.state.update(|s| s.saving = true);
        match self.api.update_settings(&update).await {
            Ok(canonical) => {
                self.revision.fetch_add(1, Ordering::SeqCst);
                self.state.update(|s| {
                    s.settings = canonical.clone();
                    s.saving = false;
                });
                log::info!("site settings updated");
                Ok(canonical)
            }
            Err(err) => {
                log::warn!("settings update failed: {err}");
                self.state.update(|s| s.saving = false);
                Err(err.message_or(SETTINGS_UPDATE_FALLBACK_MESSAGE))
            }
        }
    }
}
