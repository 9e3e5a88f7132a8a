use super::*;
use crate::notice::NoticeLevel;
use crate::request::{HttpMethod, MockHttpClient, RequestBody};
use serde_json::json;

const BASE: &str = "http://api.test/api";

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn product_json(id: &str, name: &str, qty: u32) -> serde_json::Value {
    json!({"_id": id, "name": name, "category": "Tools", "price": 2.5, "quantityInStock": qty})
}

fn create_controller() -> (Rc<MockHttpClient>, ProductsController<Rc<MockHttpClient>>) {
    let mock = Rc::new(MockHttpClient::new());
    let api = Rc::new(ApiClient::new(BASE, mock.clone()));
    (mock, ProductsController::new(api))
}

fn form(name: &str, category: &str, price: &str, qty: &str) -> ProductForm {
    ProductForm {
        name: name.to_string(),
        category: category.to_string(),
        price: price.to_string(),
        quantity_in_stock: qty.to_string(),
    }
}

/// Body of the most recent request that carried JSON.
fn sent_json(mock: &MockHttpClient) -> serde_json::Value {
    let body = mock.requests.borrow().iter().rev().find_map(|r| r.body.clone());
    match body {
        Some(RequestBody::Json(body)) => serde_json::from_str(&body).unwrap(),
        other => panic!("unexpected body: {:?}", other),
    }
}

// ---------------------------------------------------------
// Forms
// ---------------------------------------------------------

#[test]
fn test_product_form_validation() {
    assert_eq!(
        form("", "Tools", "1", "1").to_draft(),
        Err(ValidationError::Required { field: "Name" })
    );
    assert_eq!(
        form("Widget", "Tools", "-1", "1").to_draft(),
        Err(ValidationError::InvalidNumber { field: "Price" })
    );
    assert_eq!(
        form("Widget", "Tools", "1", "1.5").to_draft(),
        Err(ValidationError::InvalidNumber { field: "Quantity" })
    );

    let draft = form(" Widget ", "Tools", "0", "0").to_draft().unwrap();
    assert_eq!(draft.name, "Widget");
    assert_eq!(draft.price, Decimal::ZERO);
}

#[test]
fn test_sell_form_validation() {
    let sell = |id: &str, qty: &str| SellForm {
        product_id: id.to_string(),
        quantity: qty.to_string(),
    };

    assert_eq!(
        sell("", "2").to_request(),
        Err(ValidationError::Required { field: "Product" })
    );
    assert_eq!(sell("p1", "0").to_request(), Err(ValidationError::NonPositiveQuantity));
    assert_eq!(sell("p1", "-3").to_request(), Err(ValidationError::NonPositiveQuantity));
    assert!(sell("p1", "two").to_request().is_err());
    assert_eq!(
        sell("p1", "2").to_request(),
        Ok(SaleRequest {
            product_id: "p1".to_string(),
            quantity: 2
        })
    );
}

// ---------------------------------------------------------
// Read path
// ---------------------------------------------------------

#[tokio::test]
async fn test_mount_failure_notice() {
    let (mock, controller) = create_controller();
    mock.mock_json(HttpMethod::Get, &url("/products"), 500, json!({"message": "db down"}));

    let notice = controller.mount().await;
    assert_eq!(notice, Some(Notice::error(FETCH_FAILED)));
    assert!(controller.products().is_empty());
    assert!(!controller.is_loading());
}

// ---------------------------------------------------------
// Mutations
// ---------------------------------------------------------

#[tokio::test]
async fn test_create_refetches() {
    let (mock, controller) = create_controller();
    mock.mock_json(HttpMethod::Get, &url("/products"), 200, json!([]));
    mock.mock_json(HttpMethod::Get, &url("/products"), 200, json!([product_json("p1", "Widget", 4)]));
    mock.mock_json(HttpMethod::Post, &url("/products"), 201, product_json("p1", "Widget", 4));

    assert_eq!(controller.mount().await, None);

    let outcome = controller.submit(&form("Widget", "Tools", "2.5", "4")).await;
    assert_eq!(outcome.notice, Notice::success(PRODUCT_ADDED));
    assert_eq!(
        sent_json(&mock),
        json!({"name": "Widget", "category": "Tools", "price": 2.5, "quantityInStock": 4})
    );
    assert_eq!(controller.products().len(), 1);
    assert_eq!(controller.products()[0].id, "p1");
}

#[tokio::test]
async fn test_edit_uses_put_and_clears_edit_state() {
    let (mock, controller) = create_controller();
    mock.mock_json(HttpMethod::Get, &url("/products"), 200, json!([product_json("p1", "Widget", 4)]));
    mock.mock_json(HttpMethod::Put, &url("/products/p1"), 200, product_json("p1", "Widget XL", 4));
    controller.mount().await;

    let product = controller.products()[0].clone();
    let mut edit = controller.begin_edit(&product);
    assert_eq!(controller.editing().as_deref(), Some("p1"));
    assert_eq!(edit.quantity_in_stock, "4");

    edit.name = "Widget XL".to_string();
    let outcome = controller.submit(&edit).await;

    assert_eq!(outcome.notice, Notice::success(PRODUCT_UPDATED));
    assert_eq!(outcome.value.map(|p| p.name).as_deref(), Some("Widget XL"));
    assert_eq!(mock.count(HttpMethod::Put, &url("/products/p1")), 1);
    assert_eq!(controller.editing(), None);
}

#[tokio::test]
async fn test_incomplete_form_is_a_warning() {
    let (mock, controller) = create_controller();

    let outcome = controller.submit(&form("Widget", "", "1", "1")).await;
    assert_eq!(outcome.notice, Notice::warning(FORM_INCOMPLETE));
    assert!(mock.requests.borrow().is_empty());
}

#[tokio::test]
async fn test_save_failure_keeps_edit_state() {
    let (mock, controller) = create_controller();
    mock.mock_json(HttpMethod::Get, &url("/products"), 200, json!([product_json("p1", "Widget", 4)]));
    mock.mock_json(HttpMethod::Put, &url("/products/p1"), 400, json!({}));
    controller.mount().await;

    let product = controller.products()[0].clone();
    let edit = controller.begin_edit(&product);
    let outcome = controller.submit(&edit).await;

    assert_eq!(outcome.notice, Notice::error(SAVE_FAILED));
    assert_eq!(controller.editing().as_deref(), Some("p1"));
    assert_eq!(mock.count(HttpMethod::Get, &url("/products")), 1);
}

#[tokio::test]
async fn test_invalid_sale_sends_nothing() {
    let (mock, controller) = create_controller();

    for quantity in ["0", ""] {
        let outcome = controller
            .sell(&SellForm {
                product_id: "p1".to_string(),
                quantity: quantity.to_string(),
            })
            .await;
        assert_eq!(outcome.notice, Notice::warning(SELL_INVALID));
    }

    let outcome = controller
        .sell(&SellForm {
            product_id: String::new(),
            quantity: "2".to_string(),
        })
        .await;
    assert_eq!(outcome.notice.level, NoticeLevel::Warning);
    assert!(mock.requests.borrow().is_empty());
}

#[tokio::test]
async fn test_sale_refetches_stock() {
    let (mock, controller) = create_controller();
    mock.mock_json(HttpMethod::Get, &url("/products"), 200, json!([product_json("p1", "Widget", 4)]));
    mock.mock_json(HttpMethod::Get, &url("/products"), 200, json!([product_json("p1", "Widget", 2)]));
    mock.mock_json(HttpMethod::Post, &url("/sales/sell"), 200, json!({"message": "Sale recorded"}));
    controller.mount().await;

    let outcome = controller
        .sell(&SellForm {
            product_id: "p1".to_string(),
            quantity: "2".to_string(),
        })
        .await;

    assert!(outcome.succeeded());
    assert_eq!(outcome.notice, Notice::success(PRODUCT_SOLD));
    assert_eq!(controller.products()[0].quantity_in_stock, 2);
}

#[tokio::test]
async fn test_sale_failure_shows_server_message() {
    let (mock, controller) = create_controller();
    mock.mock_json(
        HttpMethod::Post,
        &url("/sales/sell"),
        400,
        json!({"message": "Insufficient stock"}),
    );

    let outcome = controller
        .sell(&SellForm {
            product_id: "p1".to_string(),
            quantity: "99".to_string(),
        })
        .await;
    assert_eq!(outcome.notice, Notice::error("Insufficient stock"));
}

#[tokio::test]
async fn test_delete() {
    let (mock, controller) = create_controller();
    mock.mock_json(HttpMethod::Get, &url("/products"), 200, json!([product_json("p1", "Widget", 4)]));
    mock.mock_json(HttpMethod::Get, &url("/products"), 200, json!([]));
    mock.mock_json(HttpMethod::Delete, &url("/products/p1"), 200, json!({"message": "Deleted"}));
    controller.mount().await;

    let outcome = controller.delete("p1").await;
    assert_eq!(outcome.notice, Notice::success(PRODUCT_DELETED));
    assert!(controller.products().is_empty());
}

#[tokio::test]
async fn test_delete_with_plain_text_reply() {
    let (mock, controller) = create_controller();
    mock.mock_json(HttpMethod::Get, &url("/products"), 200, json!([product_json("p1", "Widget", 4)]));
    mock.mock_json(HttpMethod::Get, &url("/products"), 200, json!([]));
    mock.mock_bytes(HttpMethod::Delete, &url("/products/p1"), 200, b"Product deleted");
    controller.mount().await;

    let outcome = controller.delete("p1").await;
    assert_eq!(outcome.notice, Notice::success(PRODUCT_DELETED));
    assert_eq!(mock.count(HttpMethod::Get, &url("/products")), 2);
    assert!(controller.products().is_empty());
}

#[tokio::test]
async fn test_sale_with_plain_text_reply() {
    let (mock, controller) = create_controller();
    mock.mock_json(HttpMethod::Get, &url("/products"), 200, json!([product_json("p1", "Widget", 4)]));
    mock.mock_json(HttpMethod::Get, &url("/products"), 200, json!([product_json("p1", "Widget", 3)]));
    mock.mock_bytes(HttpMethod::Post, &url("/sales/sell"), 201, b"Sale recorded");
    controller.mount().await;

    let outcome = controller
        .sell(&SellForm {
            product_id: "p1".to_string(),
            quantity: "1".to_string(),
        })
        .await;

    assert_eq!(outcome.notice, Notice::success(PRODUCT_SOLD));
    assert_eq!(controller.products()[0].quantity_in_stock, 3);
}

// ---------------------------------------------------------
// CSV
// ---------------------------------------------------------

#[tokio::test]
async fn test_import_requires_file() {
    let (mock, controller) = create_controller();

    let outcome = controller.import(None).await;
    assert_eq!(outcome.notice, Notice::warning(IMPORT_NO_FILE));
    assert!(mock.requests.borrow().is_empty());
}

#[tokio::test]
async fn test_import_rejects_malformed_file_locally() {
    let (mock, controller) = create_controller();
    let file = SelectedFile {
        name: "bad.csv".to_string(),
        bytes: b"name,category,price,quantityInStock\nWidget,Tools,abc,1\n".to_vec(),
    };

    let outcome = controller.import(Some(file)).await;
    assert_eq!(outcome.notice.level, NoticeLevel::Error);
    assert!(outcome.notice.message.starts_with("CSV line 2:"));
    assert!(mock.requests.borrow().is_empty());
}

#[tokio::test]
async fn test_import_uploads_multipart() {
    let (mock, controller) = create_controller();
    mock.mock_json(HttpMethod::Post, &url("/csv/import-csv"), 200, json!({"message": "Imported"}));
    mock.mock_json(HttpMethod::Get, &url("/products"), 200, json!([product_json("p1", "Widget", 1)]));

    let bytes = b"name,category,price,quantityInStock\nWidget,Tools,2.5,1\n".to_vec();
    let outcome = controller
        .import(Some(SelectedFile {
            name: "stock.csv".to_string(),
            bytes: bytes.clone(),
        }))
        .await;

    assert_eq!(outcome.notice, Notice::success(IMPORT_SUCCESS));
    let upload = mock.requests.borrow()[0].clone();
    assert_eq!(
        upload.body,
        Some(RequestBody::Multipart(FilePart {
            field: "file".to_string(),
            file_name: "stock.csv".to_string(),
            content_type: "text/csv".to_string(),
            bytes,
        }))
    );
    assert_eq!(controller.products().len(), 1);
}

#[tokio::test]
async fn test_import_with_plain_text_reply() {
    let (mock, controller) = create_controller();
    mock.mock_bytes(HttpMethod::Post, &url("/csv/import-csv"), 200, b"CSV imported successfully\n");
    mock.mock_json(HttpMethod::Get, &url("/products"), 200, json!([product_json("p1", "Widget", 1)]));

    let outcome = controller
        .import(Some(SelectedFile {
            name: "stock.csv".to_string(),
            bytes: b"name,category,price,quantityInStock\nWidget,Tools,2.5,1\n".to_vec(),
        }))
        .await;

    assert_eq!(outcome.notice, Notice::success(IMPORT_SUCCESS));
    assert_eq!(controller.products().len(), 1);
}

#[tokio::test]
async fn test_import_server_rejection() {
    let (mock, controller) = create_controller();
    mock.mock_bytes(HttpMethod::Post, &url("/csv/import-csv"), 500, b"");

    let outcome = controller
        .import(Some(SelectedFile {
            name: "stock.csv".to_string(),
            bytes: b"name,category,price,quantityInStock\n".to_vec(),
        }))
        .await;
    assert_eq!(outcome.notice, Notice::error(IMPORT_FAILED));
}

#[tokio::test]
async fn test_export() {
    let (mock, controller) = create_controller();
    let csv = b"name,category,price,quantityInStock\nWidget,Tools,2.5,1\n";
    mock.mock_bytes(HttpMethod::Get, &url("/csv/export-csv"), 200, csv);

    let outcome = controller.export().await;
    assert_eq!(outcome.notice, Notice::success(EXPORT_SUCCESS));
    let exported = outcome.value.unwrap();
    assert_eq!(exported.file_name, "products.csv");
    assert_eq!(decode_products(&exported.bytes).unwrap().len(), 1);
}

#[tokio::test]
async fn test_export_failure() {
    let (mock, controller) = create_controller();
    mock.mock_network_error(HttpMethod::Get, &url("/csv/export-csv"), "offline");

    let outcome = controller.export().await;
    assert_eq!(outcome.notice, Notice::error(EXPORT_FAILED));
    assert!(outcome.value.is_none());
}
