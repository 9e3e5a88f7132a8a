use super::*;
use crate::error::ClientError;
use crate::notice::NoticeLevel;
use crate::request::{HttpMethod, MockHttpClient};
use serde_json::json;
use std::cell::Cell;
use stockdesk_shared::protocol::ListProductsRequest;
use stockdesk_shared::{Product, ProductDraft};

const BASE: &str = "http://api.test/api";

fn counter_resource(calls: Rc<Cell<u32>>) -> Resource<u32> {
    Resource::new("counter", "Failed to count", move || {
        let calls = calls.clone();
        async move {
            calls.set(calls.get() + 1);
            Ok(calls.get())
        }
    })
}

fn product_json(id: &str, name: &str) -> serde_json::Value {
    json!({"_id": id, "name": name, "category": "Tools", "price": 2.5, "quantityInStock": 3})
}

#[tokio::test]
async fn test_refresh_replaces_data() {
    let calls = Rc::new(Cell::new(0));
    let resource = counter_resource(calls.clone());

    assert_eq!(resource.data(), None);
    assert_eq!(resource.mount().await, Applied::Fresh);
    assert_eq!(resource.data(), Some(1));
    assert!(!resource.is_loading());

    resource.refresh().await;
    assert_eq!(resource.data(), Some(2));
}

#[test]
fn test_stale_response_is_dropped() {
    let resource: Resource<u32> = Resource::new("rows", "Failed", || async { Ok(0) });

    let first = resource.begin();
    let second = resource.begin();
    assert!(second > first);

    assert_eq!(resource.finish(second, Ok(2)), Applied::Fresh);
    assert_eq!(resource.finish(first, Ok(1)), Applied::Stale);
    assert_eq!(resource.data(), Some(2));
    assert!(!resource.is_loading());
}

#[test]
fn test_stale_response_does_not_clear_loading() {
    let resource: Resource<u32> = Resource::new("rows", "Failed", || async { Ok(0) });

    let first = resource.begin();
    let _second = resource.begin();
    resource.finish(first, Ok(1));

    assert!(resource.is_loading());
    assert_eq!(resource.data(), None);
}

#[test]
fn test_response_after_unmount_is_dropped() {
    let resource: Resource<u32> = Resource::new("rows", "Failed", || async { Ok(0) });

    let ticket = resource.begin();
    resource.unmount();
    assert_eq!(resource.finish(ticket, Ok(7)), Applied::Unmounted);
    assert_eq!(resource.data(), None);
    assert!(!resource.is_loading());
    assert!(!resource.is_mounted());
}

#[test]
fn test_failure_keeps_previous_data() {
    let resource: Resource<u32> = Resource::new("rows", "Failed to fetch rows", || async { Ok(0) });

    let t = resource.begin();
    resource.finish(t, Ok(5));
    let t = resource.begin();
    resource.finish(t, Err(ClientError::network("offline")));

    assert_eq!(resource.data(), Some(5));
    assert_eq!(resource.error().as_deref(), Some("Failed to fetch rows"));
    assert!(!resource.is_loading());

    let t = resource.begin();
    resource.finish(t, Ok(6));
    assert_eq!(resource.error(), None);
}

#[tokio::test]
async fn test_mutation_refetches_server_list() {
    let mock = Rc::new(MockHttpClient::new());
    let api = Rc::new(ApiClient::new(BASE, mock.clone()));
    let list_url = format!("{}/products", BASE);
    mock.mock_json(HttpMethod::Get, &list_url, 200, json!([product_json("p1", "Widget")]));
    mock.mock_json(
        HttpMethod::Get,
        &list_url,
        200,
        json!([product_json("p1", "Widget"), product_json("p2", "Gadget")]),
    );
    mock.mock_json(HttpMethod::Post, &list_url, 201, product_json("p2", "Gadget"));

    let resource = Resource::from_request(
        api.clone(),
        "products",
        "Failed to fetch products. Please try again.",
        ListProductsRequest,
    );
    resource.mount().await;
    assert_eq!(resource.with(|d| d.map(Vec::len)), Some(1));

    let draft = ProductDraft {
        name: "Gadget".to_string(),
        category: "Tools".to_string(),
        price: "2.5".parse().unwrap(),
        quantity_in_stock: 3,
    };
    let outcome = resource
        .mutate(api.send(&draft), "Product added successfully!", "Error adding product.")
        .await;

    assert!(outcome.succeeded());
    assert_eq!(outcome.notice, Notice::success("Product added successfully!"));

    let ids: Vec<String> = resource
        .data()
        .unwrap_or_default()
        .into_iter()
        .map(|p: Product| p.id)
        .collect();
    assert_eq!(ids, vec!["p1", "p2"]);
    assert_eq!(mock.count(HttpMethod::Get, &list_url), 2);
}

#[tokio::test]
async fn test_failed_mutation_skips_refetch() {
    let calls = Rc::new(Cell::new(0));
    let resource = counter_resource(calls.clone());
    resource.mount().await;

    let outcome: Outcome<()> = resource
        .mutate(
            async { Err(ClientError::http(409, Some("Product already exists".into()))) },
            "Saved",
            "Error saving.",
        )
        .await;

    assert!(!outcome.succeeded());
    assert_eq!(outcome.notice.level, NoticeLevel::Error);
    assert_eq!(outcome.notice.message, "Product already exists");
    assert_eq!(calls.get(), 1);
    assert_eq!(resource.data(), Some(1));
}
