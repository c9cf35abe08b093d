//! Persistence for the admin session token.
//!
//! The auth store only needs `get/set/delete` on one fixed key, so storage is a
//! small trait. `BrowserTokenStore` keeps the token in `localStorage`, which
//! survives reloads; `MemoryTokenStore` keeps it in-process for tests and
//! non-browser hosts.
//!
//! TRADE-OFFS
//! ==========
//! Browser storage is best-effort: a missing window or a storage exception
//! reads as "no token" and writes become no-ops. Server rendering never sees
//! a token.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::sync::{Arc, Mutex, PoisonError};

/// `localStorage` key holding the admin bearer token.
pub const TOKEN_STORAGE_KEY: &str = "cof_admin_token";

/// Key-value access to the persisted session token.
pub trait TokenStore {
    /// Current token, if one is stored.
    fn get(&self) -> Option<String>;
    /// Replace the stored token.
    fn set(&self, token: &str);
    /// Remove the stored token. Removing a missing token is a no-op.
    fn delete(&self);
}

/// Token store backed by the browser's `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTokenStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStore for BrowserTokenStore {
    fn get(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let raw = local_storage()?.get_item(TOKEN_STORAGE_KEY).ok().flatten()?;
            normalize_token(&raw)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    #[cfg_attr(not(feature = "hydrate"), expect(unused_variables))]
    fn set(&self, token: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                if storage.set_item(TOKEN_STORAGE_KEY, token).is_err() {
                    log::warn!("failed to persist session token");
                }
            }
        }
    }

    fn delete(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                if storage.remove_item(TOKEN_STORAGE_KEY).is_err() {
                    log::warn!("failed to remove session token");
                }
            }
        }
    }
}

/// In-process token store. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    /// Store pre-seeded with `token`, as if persisted by an earlier session.
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.set(token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_deref().and_then(normalize_token)
    }

    fn set(&self, token: &str) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn delete(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Blank values count as "no token".
fn normalize_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}
