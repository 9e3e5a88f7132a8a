//! Session manager
//!
//! Owns the client's belief about who is signed in and the token backing it.
//!
//! ```text
//! Uninitialized ──start──▶ Restoring ──/auth/me ok──▶ Authenticated
//!       │                     │                            │
//!       └──no token──▶ Anonymous ◀──/auth/me failed────────┘◀── logout
//! ```
//!
//! Every transition writes the credential store, the API client's
//! `Authorization` slot and the in-memory [`Session`] together, so the
//! three never disagree once a call returns.

use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use stockdesk_shared::protocol::CurrentUserRequest;
use stockdesk_shared::{LoginRequest, LoginResponse, Role, User};

use crate::api::ApiClient;
use crate::credential::CredentialStore;
use crate::error::{ClientError, ClientResult};
use crate::request::HttpClient;

pub const LOGIN_FAILED: &str = "Login failed";
pub const SESSION_EXPIRED: &str = "Session expired";

/// Snapshot of the session, cheap to clone into UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    /// Present only once `token` has been validated.
    pub user: Option<User>,
    /// True while a persisted token is being validated.
    pub loading: bool,
}

impl Session {
    fn restoring(token: String) -> Self {
        Self {
            token: Some(token),
            user: None,
            loading: true,
        }
    }

    fn authenticated(token: String, user: User) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.token.is_some() && self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Uninitialized,
    Restoring,
    Authenticated,
    Anonymous,
}

type Listener = Rc<dyn Fn(&Session)>;

pub struct SessionManager<C, S> {
    api: Rc<ApiClient<C>>,
    store: S,
    state: RefCell<Session>,
    status: Cell<SessionStatus>,
    /// Bumped by login/logout/adopt; a validation started in an older epoch is dropped.
    epoch: Cell<u64>,
    /// Token whose validation pass has already been started.
    validated: RefCell<Option<String>>,
    listeners: RefCell<Vec<Listener>>,
}

impl<C: HttpClient, S: CredentialStore> SessionManager<C, S> {
    pub fn new(api: Rc<ApiClient<C>>, store: S) -> Self {
        Self {
            api,
            store,
            state: RefCell::new(Session::default()),
            status: Cell::new(SessionStatus::Uninitialized),
            epoch: Cell::new(0),
            validated: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Handle views use for their requests.
    pub fn api(&self) -> Rc<ApiClient<C>> {
        Rc::clone(&self.api)
    }

    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.status.get()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Registers a callback run with every new snapshot.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&Session) + 'static,
    {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn commit(&self, session: Session, status: SessionStatus) {
        debug_assert!(session.user.is_none() || session.token.is_some());
        *self.state.borrow_mut() = session.clone();
        self.status.set(status);

        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&session);
        }
    }

    fn bump_epoch(&self) {
        self.epoch.set(self.epoch.get().wrapping_add(1));
    }

    fn enter_restoring(&self, token: String) {
        self.api.set_bearer(&token);
        self.commit(Session::restoring(token), SessionStatus::Restoring);
    }

    // ---------------------------------------------------------
    // Transitions
    // ---------------------------------------------------------

    /// `Uninitialized → Restoring | Anonymous`, from the persisted token.
    /// A no-op once the manager has left `Uninitialized`.
    pub fn start(&self) -> SessionStatus {
        if self.status.get() != SessionStatus::Uninitialized {
            return self.status.get();
        }

        match self.store.get() {
            Some(token) => {
                debug!("persisted token found, validating");
                self.enter_restoring(token);
            }
            None => {
                debug!("no persisted session");
                self.api.clear_bearer();
                self.commit(Session::default(), SessionStatus::Anonymous);
            }
        }
        self.status.get()
    }

    /// Starts (if needed) and validates the current token against `/auth/me`.
    ///
    /// Runs at most one validation per token value. Any failure, including a
    /// network error, ends in `Anonymous` with the stored token cleared.
    pub async fn restore(&self) -> SessionStatus {
        if self.start() != SessionStatus::Restoring {
            return self.status.get();
        }

        let Some(token) = self.state.borrow().token.clone() else {
            return self.status.get();
        };

        {
            let mut validated = self.validated.borrow_mut();
            if validated.as_deref() == Some(token.as_str()) {
                debug!("validation already in flight for this token");
                return self.status.get();
            }
            *validated = Some(token.clone());
        }

        let epoch = self.epoch.get();
        let result = self.api.send(&CurrentUserRequest).await;

        if self.epoch.get() != epoch {
            debug!("session changed during validation; dropping result");
            return self.status.get();
        }

        match result {
            Ok(user) => {
                info!("session restored for {}", user.email);
                self.commit(
                    Session::authenticated(token, user),
                    SessionStatus::Authenticated,
                );
            }
            Err(e) => {
                warn!("session validation failed: {}", e);
                self.logout();
            }
        }
        self.status.get()
    }

    /// Replaces the token (e.g. one handed over out of band) and validates it.
    pub async fn adopt_token(&self, token: impl Into<String>) -> SessionStatus {
        let token = token.into();
        if token.is_empty() {
            self.logout();
            return self.status.get();
        }

        let unchanged = self.state.borrow().token.as_deref() == Some(token.as_str());
        if !unchanged {
            self.bump_epoch();
            self.store.set(&token);
            self.validated.borrow_mut().take();
            self.enter_restoring(token);
        }
        self.restore().await
    }

    /// Exchanges credentials for a token. State is untouched on failure.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let LoginResponse { token, user } = match self.api.send(&request).await {
            Ok(resp) if !resp.token.is_empty() => resp,
            Ok(_) => {
                warn!("login response carried an empty token");
                return Err(ClientError::auth(LOGIN_FAILED));
            }
            Err(e) => {
                warn!("login failed: {}", e);
                return Err(ClientError::auth(
                    e.server_message().unwrap_or(LOGIN_FAILED),
                ));
            }
        };

        self.bump_epoch();
        self.store.set(&token);
        self.api.set_bearer(&token);
        *self.validated.borrow_mut() = Some(token.clone());

        info!("signed in as {}", user.email);
        self.commit(
            Session::authenticated(token, user.clone()),
            SessionStatus::Authenticated,
        );
        Ok(user)
    }

    /// Drops the session. Synchronous and idempotent.
    pub fn logout(&self) {
        self.bump_epoch();
        self.store.clear();
        self.api.clear_bearer();
        self.validated.borrow_mut().take();

        if self.status.get() != SessionStatus::Anonymous {
            info!("signed out");
        }
        self.commit(Session::default(), SessionStatus::Anonymous);
    }

    /// Re-fetches the signed-in user. A server rejection ends the session;
    /// a transport failure leaves it as it was.
    pub async fn fetch_current_user(&self) -> ClientResult<User> {
        let token = match (self.status.get(), self.state.borrow().token.clone()) {
            (SessionStatus::Authenticated, Some(token)) => token,
            _ => return Err(ClientError::auth("Not signed in")),
        };

        let epoch = self.epoch.get();
        let result = self.api.send(&CurrentUserRequest).await;

        if self.epoch.get() != epoch {
            return Err(ClientError::auth("Session changed"));
        }

        match result {
            Ok(user) => {
                self.commit(
                    Session::authenticated(token, user.clone()),
                    SessionStatus::Authenticated,
                );
                Ok(user)
            }
            Err(e @ ClientError::Http { .. }) => {
                warn!("current user rejected: {}", e);
                self.logout();
                Err(ClientError::auth(
                    e.server_message().unwrap_or(SESSION_EXPIRED),
                ))
            }
            Err(e) => {
                warn!("current user fetch failed, keeping session: {}", e);
                Err(e)
            }
        }
    }
}
