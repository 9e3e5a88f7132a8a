use std::rc::Rc;
use stockdesk_shared::StockSummary;
use stockdesk_shared::protocol::StockOverviewRequest;

use crate::api::ApiClient;
use crate::notice::Notice;
use crate::request::HttpClient;
use crate::sync::{Applied, Resource};

pub const FETCH_FAILED: &str = "Failed to fetch stock overview";

pub struct StockOverviewController {
    summary: Resource<StockSummary>,
}

impl StockOverviewController {
    pub fn new<C: HttpClient + 'static>(api: Rc<ApiClient<C>>) -> Self {
        Self {
            summary: Resource::from_request(api, "stock overview", FETCH_FAILED, StockOverviewRequest),
        }
    }

    pub async fn mount(&self) -> Option<Notice> {
        match self.summary.mount().await {
            Applied::Fresh => self.summary.error().map(Notice::error),
            Applied::Stale | Applied::Unmounted => None,
        }
    }

    pub fn unmount(&self) {
        self.summary.unmount();
    }

    /// Skeletons are shown until the first response, failed or not.
    pub fn is_loading(&self) -> bool {
        self.summary.is_loading()
            || (self.summary.with(|d| d.is_none()) && self.summary.error().is_none())
    }

    pub fn summary(&self) -> Option<StockSummary> {
        self.summary.data()
    }
}
