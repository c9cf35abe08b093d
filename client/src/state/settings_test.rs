use super::*;
use crate::net::error::ApiError;
use crate::net::types::DEFAULT_SITE_NAME;
use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::block_on;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// =============================================================
// FakeSettingsApi
// =============================================================

type Reply = oneshot::Receiver<Result<SiteSettings, ApiError>>;

#[derive(Clone, Default)]
struct FakeSettingsApi {
    loads: Arc<Mutex<VecDeque<Reply>>>,
    updates: Arc<Mutex<VecDeque<Reply>>>,
    submitted: Arc<Mutex<Vec<SettingsUpdate>>>,
}

impl FakeSettingsApi {
    fn defer_load(&self) -> oneshot::Sender<Result<SiteSettings, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.loads.lock().unwrap().push_back(rx);
        tx
    }

    fn push_load(&self, reply: Result<SiteSettings, ApiError>) {
        self.defer_load().send(reply).unwrap();
    }

    fn push_update(&self, reply: Result<SiteSettings, ApiError>) {
        let (tx, rx) = oneshot::channel();
        self.updates.lock().unwrap().push_back(rx);
        tx.send(reply).unwrap();
    }
}

async fn resolve(reply: Option<Reply>) -> Result<SiteSettings, ApiError> {
    match reply {
        Some(rx) => rx.await.unwrap_or_else(|_| Err(ApiError::Network("reply dropped".to_owned()))),
        None => Err(ApiError::Network("no scripted reply".to_owned())),
    }
}

#[async_trait(?Send)]
impl SettingsApi for FakeSettingsApi {
    async fn public_settings(&self) -> Result<SiteSettings, ApiError> {
        let reply = self.loads.lock().unwrap().pop_front();
        resolve(reply).await
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<SiteSettings, ApiError> {
        self.submitted.lock().unwrap().push(update.clone());
        let reply = self.updates.lock().unwrap().pop_front();
        resolve(reply).await
    }
}

fn settings_from(value: serde_json::Value) -> SiteSettings {
    serde_json::from_value(value).unwrap()
}

fn store() -> (SettingsStore<FakeSettingsApi>, FakeSettingsApi) {
    let api = FakeSettingsApi::default();
    (SettingsStore::new(api.clone()), api)
}

// =============================================================
// load
// =============================================================

#[test]
fn new_store_serves_defaults() {
    let (store, _) = store();
    let state = store.snapshot();
    assert_eq!(state.settings, SiteSettings::default());
    assert!(!state.loading);
    assert!(state.load_error.is_none());
}

#[test]
fn load_replaces_snapshot() {
    let (store, api) = store();
    let remote = settings_from(json!({ "siteName": "CoF Jabalpur", "contactEmail": "dean@cof.in" }));
    api.push_load(Ok(remote.clone()));

    block_on(store.load());

    let state = store.snapshot();
    assert_eq!(state.settings, remote);
    assert!(!state.loading);
    assert!(state.load_error.is_none());
}

#[test]
fn failed_load_keeps_defaults_and_records_error() {
    let (store, api) = store();
    api.push_load(Err(ApiError::Network("offline".to_owned())));

    block_on(store.load());

    let state = store.snapshot();
    assert_eq!(state.settings.site_name, DEFAULT_SITE_NAME);
    assert_eq!(state.settings, SiteSettings::default());
    assert!(!state.loading);
    assert_eq!(state.load_error.as_deref(), Some(SETTINGS_LOAD_FALLBACK_MESSAGE));
}

// =============================================================
// update_settings
// =============================================================

#[test]
fn update_adopts_server_response_not_submission() {
    let (store, api) = store();
    let canonical = settings_from(json!({ "siteName": "X", "contactEmail": "unchanged@old" }));
    api.push_update(Ok(canonical.clone()));

    let update = SettingsUpdate { site_name: Some("X".to_owned()), ..SettingsUpdate::default() };
    let result = block_on(store.update_settings(update.clone()));

    assert_eq!(result, Ok(canonical.clone()));
    let state = store.snapshot();
    assert_eq!(state.settings, canonical);
    assert_eq!(state.settings.contact_email, "unchanged@old");
    assert!(!state.saving);
    assert_eq!(api.submitted.lock().unwrap().as_slice(), &[update]);
}

#[test]
fn failed_update_keeps_previous_snapshot() {
    let (store, api) = store();
    let before = settings_from(json!({ "siteName": "Before" }));
    api.push_load(Ok(before.clone()));
    block_on(store.load());

    api.push_update(Err(ApiError::Rejected { status: 403, message: "Not authorized".to_owned() }));
    let update = SettingsUpdate { site_name: Some("After".to_owned()), ..SettingsUpdate::default() };
    let result = block_on(store.update_settings(update));

    assert_eq!(result, Err("Not authorized".to_owned()));
    let state = store.snapshot();
    assert_eq!(state.settings, before);
    assert!(!state.saving);
}

#[test]
fn failed_update_without_message_uses_fallback() {
    let (store, api) = store();
    api.push_update(Err(ApiError::Malformed("eof".to_owned())));
    let result = block_on(store.update_settings(SettingsUpdate::default()));
    assert_eq!(result, Err(SETTINGS_UPDATE_FALLBACK_MESSAGE.to_owned()));
}

#[test]
fn slow_load_does_not_overwrite_newer_update() {
    let (store, api) = store();
    let load_reply = api.defer_load();
    let updated = settings_from(json!({ "siteName": "Updated" }));
    api.push_update(Ok(updated.clone()));

    let driver = async {
        store.update_settings(SettingsUpdate::default()).await.unwrap();
        load_reply.send(Ok(settings_from(json!({ "siteName": "Stale" })))).unwrap();
    };
    block_on(async { futures::join!(store.load(), driver) });

    let state = store.snapshot();
    assert_eq!(state.settings, updated);
    assert!(!state.loading);
}

#[test]
fn load_failure_after_newer_update_records_no_error() {
    let (store, api) = store();
    let load_reply = api.defer_load();
    let updated = settings_from(json!({ "siteName": "Updated" }));
    api.push_update(Ok(updated.clone()));

    let driver = async {
        store.update_settings(SettingsUpdate::default()).await.unwrap();
        load_reply.send(Err(ApiError::Network("offline".to_owned()))).unwrap();
    };
    block_on(async { futures::join!(store.load(), driver) });

    let state = store.snapshot();
    assert_eq!(state.settings, updated);
    assert_eq!(state.load_error, None);
    assert!(!state.loading);
}
