//! Analytics page: per-product sales table plus a per-category chart.
//!
//! Sort parameters go to the server and trigger a refetch. The text filter
//! only narrows the snapshot already on hand.

use rust_decimal::prelude::ToPrimitive;
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::rc::Rc;
use stockdesk_shared::protocol::{AnalyticsStockRequest, ChartDataRequest};
use stockdesk_shared::{AnalyticsRow, ChartDatum, SortBy, SortOrder};

use crate::api::ApiClient;
use crate::request::HttpClient;
use crate::sync::{Applied, Resource};

pub const STOCK_FETCH_FAILED: &str = "Error fetching stock data";
pub const CHART_FETCH_FAILED: &str = "Error fetching chart data";

pub const REVENUE_LABEL: &str = "Total Revenue";
pub const SOLD_LABEL: &str = "Total Sold";

// =========================================================
// Pure helpers
// =========================================================

/// Case-insensitive substring match on category or name. A blank query keeps everything.
pub fn filter_rows(rows: &[AnalyticsRow], query: &str) -> Vec<AnalyticsRow> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| {
            row.category.to_lowercase().contains(&query) || row.name.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Stable sort; rows with equal keys keep their relative order.
pub fn sort_rows(rows: &mut [AnalyticsRow], sort_by: SortBy, order: SortOrder) {
    let key = |a: &AnalyticsRow, b: &AnalyticsRow| -> Ordering {
        match sort_by {
            SortBy::TotalRevenue => a.total_revenue.cmp(&b.total_revenue),
            SortBy::TotalSold => a.items_sold.cmp(&b.items_sold),
        }
    };
    match order {
        SortOrder::Asc => rows.sort_by(key),
        SortOrder::Desc => rows.sort_by(|a, b| key(b, a)),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<f64>,
}

/// Bar chart input: one label per category, one dataset per metric.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

pub fn chart_series(data: &[ChartDatum]) -> ChartSeries {
    ChartSeries {
        labels: data.iter().map(|d| d.category.clone()).collect(),
        datasets: vec![
            Dataset {
                label: REVENUE_LABEL,
                data: data
                    .iter()
                    .map(|d| d.total_revenue.to_f64().unwrap_or(0.0))
                    .collect(),
            },
            Dataset {
                label: SOLD_LABEL,
                data: data.iter().map(|d| d.total_sold as f64).collect(),
            },
        ],
    }
}

// =========================================================
// Controller
// =========================================================

pub struct AnalyticsController {
    params: Rc<Cell<AnalyticsStockRequest>>,
    filter: RefCell<String>,
    rows: Resource<Vec<AnalyticsRow>>,
    chart: Resource<Vec<ChartDatum>>,
}

impl AnalyticsController {
    pub fn new<C: HttpClient + 'static>(api: Rc<ApiClient<C>>) -> Self {
        let params = Rc::new(Cell::new(AnalyticsStockRequest::default()));

        let rows = {
            let api = Rc::clone(&api);
            let params = Rc::clone(&params);
            Resource::new("analytics rows", STOCK_FETCH_FAILED, move || {
                let api = Rc::clone(&api);
                let request = params.get();
                async move { api.send(&request).await }
            })
        };
        let chart =
            Resource::from_request(api, "analytics chart", CHART_FETCH_FAILED, ChartDataRequest);

        Self {
            params,
            filter: RefCell::new(String::new()),
            rows,
            chart,
        }
    }

    /// Loads table and chart concurrently.
    pub async fn mount(&self) {
        futures::join!(self.rows.mount(), self.chart.mount());
    }

    pub fn unmount(&self) {
        self.rows.unmount();
        self.chart.unmount();
    }

    pub fn sort(&self) -> AnalyticsStockRequest {
        self.params.get()
    }

    /// Refetches the table when the parameters actually change.
    pub async fn set_sort(&self, sort_by: SortBy, order: SortOrder) -> Option<Applied> {
        let next = AnalyticsStockRequest { sort_by, order };
        if self.params.get() == next {
            return None;
        }
        self.params.set(next);
        Some(self.rows.refresh().await)
    }

    pub async fn set_sort_by(&self, sort_by: SortBy) -> Option<Applied> {
        let order = self.params.get().order;
        self.set_sort(sort_by, order).await
    }

    pub async fn set_order(&self, order: SortOrder) -> Option<Applied> {
        let sort_by = self.params.get().sort_by;
        self.set_sort(sort_by, order).await
    }

    pub fn set_filter(&self, query: &str) {
        *self.filter.borrow_mut() = query.to_string();
    }

    pub fn filter(&self) -> String {
        self.filter.borrow().clone()
    }

    /// Table rows after the local filter, in the selected order.
    pub fn visible_rows(&self) -> Vec<AnalyticsRow> {
        let params = self.params.get();
        let query = self.filter.borrow();
        let mut rows = self
            .rows
            .with(|rows| filter_rows(rows.map(Vec::as_slice).unwrap_or_default(), &query));
        sort_rows(&mut rows, params.sort_by, params.order);
        rows
    }

    pub fn chart(&self) -> Option<ChartSeries> {
        self.chart.with(|data| data.map(|d| chart_series(d)))
    }

    pub fn is_loading(&self) -> bool {
        self.rows.is_loading()
    }

    /// Table error first, then chart error.
    pub fn error(&self) -> Option<String> {
        self.rows.error().or_else(|| self.chart.error())
    }
}
