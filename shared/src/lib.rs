use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

pub mod protocol;

// =========================================================
// Constants
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_CSV: &str = "text/csv";

// =========================================================
// Accounts
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

// =========================================================
// Inventory
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity_in_stock: u32,
}

/// Create/update payload: a product without its server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity_in_stock: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub product_id: String,
    pub quantity: u32,
}

// =========================================================
// Reporting
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldItem {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity_sold: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub revenue_generated: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_items: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_sold: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_revenue: Decimal,
    #[serde(default)]
    pub sold_items: Vec<SoldItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRow {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items_sold: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDatum {
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_revenue: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_sold: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortBy {
    #[default]
    #[serde(rename = "totalRevenue")]
    TotalRevenue,
    #[serde(rename = "totalSold")]
    TotalSold,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::TotalRevenue => "totalRevenue",
            SortBy::TotalSold => "totalSold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

// =========================================================
// Acknowledgements
// =========================================================

/// Lenient acknowledgement body.
///
/// Mutating endpoints answer with `{ "message": ... }`, an arbitrary JSON
/// value, plain text, or nothing at all. Any of those counts as success.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "AckRepr")]
pub struct Ack {
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AckRepr {
    Message {
        #[serde(default)]
        message: Option<String>,
    },
    Other(serde::de::IgnoredAny),
}

impl From<AckRepr> for Ack {
    fn from(repr: AckRepr) -> Self {
        match repr {
            AckRepr::Message { message } => Ack { message },
            AckRepr::Other(_) => Ack::default(),
        }
    }
}

impl Ack {
    /// Reads a 2xx acknowledgement without ever failing: JSON when it
    /// parses, otherwise the trimmed text becomes the message.
    pub fn from_body(body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let text = text.trim();
        if text.is_empty() {
            return Ack::default();
        }
        serde_json::from_str(text).unwrap_or_else(|_| Ack {
            message: Some(text.to_string()),
        })
    }
}

/// Treats an explicit JSON `null` like a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn test_product_accepts_mongo_id() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Widget",
            "category": "Tools",
            "price": 12.5,
            "quantityInStock": 4
        }))
        .unwrap();

        assert_eq!(product.id, "p1");
        assert_eq!(product.price, Decimal::new(125, 1));
        assert_eq!(product.quantity_in_stock, 4);
    }

    #[test]
    fn test_analytics_row_tolerates_missing_and_null_metrics() {
        let row: AnalyticsRow = serde_json::from_value(json!({
            "name": "Widget",
            "category": "Tools",
            "totalRevenue": null
        }))
        .unwrap();

        assert_eq!(row.items_sold, 0);
        assert_eq!(row.total_revenue, Decimal::ZERO);
    }

    #[test]
    fn test_ack_accepts_any_shape() {
        let with_message: Ack = serde_json::from_value(json!({"message": "ok"})).unwrap();
        assert_eq!(with_message.message.as_deref(), Some("ok"));

        let null: Ack = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(null, Ack::default());

        let list: Ack = serde_json::from_value(json!([1, 2, 3])).unwrap();
        assert_eq!(list, Ack::default());
    }

    #[test]
    fn test_ack_from_body_never_fails() {
        assert_eq!(Ack::from_body(b""), Ack::default());
        assert_eq!(Ack::from_body(b"  \n"), Ack::default());
        assert_eq!(
            Ack::from_body(br#"{"message": "Deleted"}"#).message.as_deref(),
            Some("Deleted")
        );
        assert_eq!(
            Ack::from_body(b"Product deleted\n").message.as_deref(),
            Some("Product deleted")
        );
        assert_eq!(Ack::from_body(br#"{"ok": true}"#), Ack::default());
    }

    #[test]
    fn test_sale_request_wire_names() {
        let body = serde_json::to_value(SaleRequest {
            product_id: "p1".to_string(),
            quantity: 3,
        })
        .unwrap();
        assert_eq!(body, json!({"productId": "p1", "quantity": 3}));
    }

    #[test]
    fn test_role_wire_names() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "role": "admin"
        }))
        .unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(SortBy::TotalSold.as_str(), "totalSold");
        assert_eq!(SortOrder::default().as_str(), "desc");
    }
}
