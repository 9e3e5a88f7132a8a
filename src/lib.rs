//! Stockdesk client core
//!
//! Everything the inventory client does that is not rendering: the session
//! state machine, the shared API client and its `Authorization` slot, the
//! route guard, the fetch/mutate/refetch resource and the page controllers.
//! The browser adapters live in the `stockdesk-frontend` crate.

use std::rc::Rc;

pub mod api;
pub mod config;
pub mod credential;
pub mod csv_schema;
pub mod error;
pub mod guard;
pub mod notice;
pub mod request;
pub mod route;
pub mod session;
pub mod sync;
pub mod views;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use credential::{CredentialStore, MemoryCredentialStore};
pub use error::{ClientError, ClientResult, ValidationError};
pub use guard::{GuardDecision, Resolution};
pub use notice::{Notice, NoticeLevel};
pub use request::HttpClient;
pub use route::AppRoute;
pub use session::{Session, SessionManager, SessionStatus};
pub use stockdesk_shared as shared;

#[cfg(feature = "reqwest")]
pub use request::ReqwestHttpClient;

/// Wires one API client and one session manager around `store`.
pub fn connect<C, S>(config: &ClientConfig, client: C, store: S) -> Rc<SessionManager<C, S>>
where
    C: HttpClient,
    S: CredentialStore,
{
    let api = Rc::new(ApiClient::from_config(config, client));
    Rc::new(SessionManager::new(api, store))
}
