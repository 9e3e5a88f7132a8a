//! `window.localStorage` access, plus the credential store built on it.

use log::warn;
use stockdesk::CredentialStore;

pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    /// `None` when the key is absent or storage is unavailable.
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    /// `false` when the write failed (quota, private mode, no storage).
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// Persists the bearer token under one fixed key.
pub struct BrowserCredentialStore {
    key: String,
}

impl BrowserCredentialStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl CredentialStore for BrowserCredentialStore {
    fn get(&self) -> Option<String> {
        BrowserStorage::get(&self.key).filter(|t| !t.is_empty())
    }

    fn set(&self, token: &str) {
        if !BrowserStorage::set(&self.key, token) {
            warn!("could not persist session under \"{}\"", self.key);
        }
    }

    fn clear(&self) {
        if !BrowserStorage::delete(&self.key) {
            warn!("could not clear stored session \"{}\"", self.key);
        }
    }
}
