use crate::{
    Ack, AnalyticsRow, ChartDatum, LoginRequest, LoginResponse, Product, ProductDraft,
    RegisterRequest, SaleRequest, SortBy, SortOrder, StockSummary, User,
};
use serde::{Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the request itself is sent as the JSON body.
    const HAS_BODY: bool = false;

    /// The URL path, relative to the API base.
    fn path(&self) -> String;

    /// Query parameters appended to the path.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Decodes a 2xx body into the response type.
    fn decode(body: &[u8]) -> serde_json::Result<Self::Response> {
        decode_json(body)
    }
}

/// JSON decode where an empty or blank body reads as `null`.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> serde_json::Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_str("null");
    }
    serde_json::from_slice(body)
}

pub const PATH_LOGIN: &str = "/auth/login";
pub const PATH_REGISTER: &str = "/auth/register";
pub const PATH_ME: &str = "/auth/me";
pub const PATH_PRODUCTS: &str = "/products";
pub const PATH_SELL: &str = "/sales/sell";
pub const PATH_IMPORT_CSV: &str = "/csv/import-csv";
pub const PATH_EXPORT_CSV: &str = "/csv/export-csv";
pub const PATH_STOCK_OVERVIEW: &str = "/stock-overview";
pub const PATH_ANALYTICS_STOCK: &str = "/analytics/stock";
pub const PATH_ANALYTICS_CHART: &str = "/analytics/chart-data";

/// Multipart field the import endpoint reads the file from.
pub const IMPORT_FILE_FIELD: &str = "file";

// =========================================================
// Auth
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const HAS_BODY: bool = true;

    fn path(&self) -> String {
        PATH_LOGIN.to_string()
    }
}

impl ApiRequest for RegisterRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const HAS_BODY: bool = true;

    fn path(&self) -> String {
        PATH_REGISTER.to_string()
    }

    fn decode(body: &[u8]) -> serde_json::Result<Ack> {
        Ok(Ack::from_body(body))
    }
}

/// Validate the bearer token and fetch its user
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        PATH_ME.to_string()
    }
}

// =========================================================
// Products & sales
// =========================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ListProductsRequest;

impl ApiRequest for ListProductsRequest {
    type Response = Vec<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        PATH_PRODUCTS.to_string()
    }
}

/// Create a product (the draft itself is the body)
impl ApiRequest for ProductDraft {
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Post;
    const HAS_BODY: bool = true;

    fn path(&self) -> String {
        PATH_PRODUCTS.to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateProductRequest {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub draft: ProductDraft,
}

impl ApiRequest for UpdateProductRequest {
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Put;
    const HAS_BODY: bool = true;

    fn path(&self) -> String {
        format!("{}/{}", PATH_PRODUCTS, self.id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteProductRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteProductRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", PATH_PRODUCTS, self.id)
    }

    fn decode(body: &[u8]) -> serde_json::Result<Ack> {
        Ok(Ack::from_body(body))
    }
}

impl ApiRequest for SaleRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const HAS_BODY: bool = true;

    fn path(&self) -> String {
        PATH_SELL.to_string()
    }

    fn decode(body: &[u8]) -> serde_json::Result<Ack> {
        Ok(Ack::from_body(body))
    }
}

// =========================================================
// Reporting
// =========================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StockOverviewRequest;

impl ApiRequest for StockOverviewRequest {
    type Response = StockSummary;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        PATH_STOCK_OVERVIEW.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AnalyticsStockRequest {
    #[serde(rename = "sortBy")]
    pub sort_by: SortBy,
    pub order: SortOrder,
}

impl ApiRequest for AnalyticsStockRequest {
    type Response = Vec<AnalyticsRow>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        PATH_ANALYTICS_STOCK.to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sortBy", self.sort_by.as_str().to_string()),
            ("order", self.order.as_str().to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChartDataRequest;

impl ApiRequest for ChartDataRequest {
    type Response = Vec<ChartDatum>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        PATH_ANALYTICS_CHART.to_string()
    }
}
