//! Thin wrappers over browser APIs, used instead of the gloo-* crates.

pub mod file;
mod http;
pub mod router;
mod storage;
mod timer;

pub use http::FetchHttpClient;
pub use storage::BrowserCredentialStore;
pub use timer::Timeout;
