//! Session context
//!
//! Bridges the core [`SessionManager`] into Leptos: every snapshot it
//! commits is mirrored into a signal, so the router and the pages react to
//! login, logout and restore without knowing about the manager.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;
use stockdesk::{ApiClient, Session, SessionManager};

use crate::web::{BrowserCredentialStore, FetchHttpClient};

pub type AppApi = ApiClient<FetchHttpClient>;
pub type AppSession = SessionManager<FetchHttpClient, BrowserCredentialStore>;

#[derive(Clone, Copy)]
pub struct AuthContext {
    session: ReadSignal<Session>,
    manager: StoredValue<Rc<AppSession>, LocalStorage>,
}

impl AuthContext {
    /// Mirrors `manager` into a signal. Call after `start()` so the first
    /// snapshot already reflects a stored token.
    pub fn new(manager: Rc<AppSession>) -> Self {
        let (session, set_session) = signal(manager.session());
        manager.subscribe(move |snapshot| {
            debug!("session: authenticated={}", snapshot.is_authenticated());
            set_session.set(snapshot.clone());
        });

        Self {
            session,
            manager: StoredValue::new_local(manager),
        }
    }

    pub fn session(&self) -> Signal<Session> {
        self.session.into()
    }

    pub fn manager(&self) -> Rc<AppSession> {
        self.manager.get_value()
    }

    pub fn api(&self) -> Rc<AppApi> {
        self.manager.with_value(|m| m.api())
    }

    /// Validates a stored token in the background.
    pub fn restore(&self) {
        let manager = self.manager();
        spawn_local(async move {
            manager.restore().await;
        });
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
