//! Fetch / mutate / refetch
//!
//! [`Resource`] is the one place the read path of a view lives: it owns the
//! last good snapshot plus `loading`/`error` flags, applies only the newest
//! response, and ignores anything that lands after the view unmounted.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use log::{debug, error, info, warn};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use stockdesk_shared::protocol::ApiRequest;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::notice::Notice;
use crate::request::HttpClient;

type Fetcher<T> = Box<dyn Fn() -> LocalBoxFuture<'static, ClientResult<T>>>;

/// Sequence number handed out when a read is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// What happened to a completed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Fresh,
    /// A newer read was issued meanwhile.
    Stale,
    Unmounted,
}

/// Result of a mutating action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<R> {
    pub notice: Notice,
    /// `Some` only when the action succeeded.
    pub value: Option<R>,
}

impl<R> Outcome<R> {
    pub fn succeeded(&self) -> bool {
        self.value.is_some()
    }

    pub fn failed(notice: Notice) -> Self {
        Self {
            notice,
            value: None,
        }
    }
}

struct State<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    issued: u64,
    mounted: bool,
}

pub struct Resource<T> {
    label: &'static str,
    error_message: &'static str,
    fetcher: Fetcher<T>,
    state: RefCell<State<T>>,
}

impl<T: 'static> Resource<T> {
    /// `error_message` is what `error()` reports when a read fails.
    pub fn new<F, Fut>(label: &'static str, error_message: &'static str, fetcher: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = ClientResult<T>> + 'static,
    {
        Self {
            label,
            error_message,
            fetcher: Box::new(move || fetcher().boxed_local()),
            state: RefCell::new(State {
                data: None,
                loading: false,
                error: None,
                issued: 0,
                mounted: true,
            }),
        }
    }

    /// A resource that re-sends one fixed endpoint request.
    pub fn from_request<C, R>(
        api: Rc<ApiClient<C>>,
        label: &'static str,
        error_message: &'static str,
        request: R,
    ) -> Self
    where
        C: HttpClient + 'static,
        R: ApiRequest<Response = T> + Clone + 'static,
    {
        Self::new(label, error_message, move || {
            let api = Rc::clone(&api);
            let request = request.clone();
            async move { api.send(&request).await }
        })
    }

    // ---------------------------------------------------------
    // Read path
    // ---------------------------------------------------------

    /// Marks a read as in flight and returns its ticket.
    pub fn begin(&self) -> Ticket {
        let mut state = self.state.borrow_mut();
        state.issued += 1;
        state.loading = true;
        Ticket(state.issued)
    }

    /// Applies a completed read if it is still the newest one.
    /// A failure keeps the previous snapshot.
    pub fn finish(&self, ticket: Ticket, result: ClientResult<T>) -> Applied {
        let mut state = self.state.borrow_mut();
        if !state.mounted {
            debug!("{}: response after unmount dropped", self.label);
            return Applied::Unmounted;
        }
        if ticket.0 != state.issued {
            debug!("{}: stale response #{} dropped", self.label, ticket.0);
            return Applied::Stale;
        }

        match result {
            Ok(data) => {
                state.data = Some(data);
                state.error = None;
            }
            Err(e) => {
                error!("{}: {}", self.label, e);
                state.error = Some(self.error_message.to_string());
            }
        }
        state.loading = false;
        Applied::Fresh
    }

    pub async fn refresh(&self) -> Applied {
        let ticket = self.begin();
        let result = (self.fetcher)().await;
        self.finish(ticket, result)
    }

    pub async fn mount(&self) -> Applied {
        self.state.borrow_mut().mounted = true;
        self.refresh().await
    }

    pub fn unmount(&self) {
        let mut state = self.state.borrow_mut();
        state.mounted = false;
        state.loading = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.state.borrow().mounted
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        f(self.state.borrow().data.as_ref())
    }

    // ---------------------------------------------------------
    // Write path
    // ---------------------------------------------------------

    /// Awaits `action`; on success notifies `success` and refetches, on
    /// failure reports the server message or `fallback` and leaves data alone.
    pub async fn mutate<R, Fut>(&self, action: Fut, success: &str, fallback: &str) -> Outcome<R>
    where
        Fut: Future<Output = ClientResult<R>>,
    {
        match action.await {
            Ok(value) => {
                info!("{}: {}", self.label, success);
                self.refresh().await;
                Outcome {
                    notice: Notice::success(success),
                    value: Some(value),
                }
            }
            Err(e) => {
                warn!("{}: mutation failed: {}", self.label, e);
                Outcome::failed(Notice::error(e.user_message(fallback)))
            }
        }
    }
}

impl<T: Clone + 'static> Resource<T> {
    pub fn data(&self) -> Option<T> {
        self.state.borrow().data.clone()
    }
}

#[cfg(test)]
mod tests;
