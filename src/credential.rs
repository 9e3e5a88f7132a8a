//! Credential store
//!
//! The only persisted client state is the bearer token. Everything that
//! reads or writes it goes through [`CredentialStore`]. Implementations
//! swallow storage failures (logging them) so an unavailable backend reads
//! as "no persisted session".

use std::cell::RefCell;
use std::rc::Rc;

pub trait CredentialStore {
    /// Stored token; `None` when absent, blank or unreadable.
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

impl<T: CredentialStore + ?Sized> CredentialStore for Rc<T> {
    fn get(&self) -> Option<String> {
        (**self).get()
    }

    fn set(&self, token: &str) {
        (**self).set(token)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// In-memory store. Clones share one slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    token: Rc<RefCell<Option<String>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        *store.token.borrow_mut() = Some(token.into());
        store
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<String> {
        self.token.borrow().clone().filter(|t| !t.is_empty())
    }

    fn set(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slot() {
        let store = MemoryCredentialStore::new();
        let other = store.clone();

        store.set("t1");
        assert_eq!(other.get().as_deref(), Some("t1"));

        other.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_blank_token_reads_as_absent() {
        let store = MemoryCredentialStore::with_token("");
        assert_eq!(store.get(), None);
    }
}
