mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use common::TestApp;

#[tokio::test]
async fn create_product_defaults_to_active() {
    let app = TestApp::new().await;
    let owner = Uuid::new_v4();

    let product = app.create_product(owner, "SKU-100").await;
    assert_eq!(product["status"], "ACTIVE");
    assert_eq!(product["ownerId"], owner.to_string());
    assert_eq!(product["stockQuantity"], 10);
}

#[tokio::test]
async fn whitespace_sku_is_rejected_and_not_stored() {
    let app = TestApp::new().await;
    let owner = Uuid::new_v4();

    let (status, body) = app
        .json(
            Method::POST,
            "/api/v1/products",
            Some(json!({
                "ownerId": owner,
                "sku": "   ",
                "name": "Pallet wrap"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("blank"));

    let (_, list) = app
        .json(
            Method::GET,
            &format!("/api/v1/products?ownerId={owner}"),
            None,
        )
        .await;
    assert_eq!(list["data"]["total"], 0);
}

#[tokio::test]
async fn duplicate_sku_is_conflict() {
    let app = TestApp::new().await;
    let owner = Uuid::new_v4();
    app.create_product(owner, "SKU-DUP").await;

    let (status, body) = app
        .json(
            Method::POST,
            "/api/v1/products",
            Some(json!({
                "ownerId": owner,
                "sku": "SKU-DUP",
                "name": "Again"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn unknown_stored_status_reads_as_active() {
    let app = TestApp::new().await;
    let product = app.create_product(Uuid::new_v4(), "SKU-LEGACY").await;
    app.execute_sql("UPDATE products SET status = 42 WHERE sku = 'SKU-LEGACY'")
        .await;

    let id = product["id"].as_str().unwrap();
    let (status, body) = app
        .json(Method::GET, &format!("/api/v1/products/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ACTIVE");
}

#[tokio::test]
async fn null_stored_status_reads_as_null() {
    let app = TestApp::new().await;
    let product = app.create_product(Uuid::new_v4(), "SKU-NULL").await;
    app.execute_sql("UPDATE products SET status = NULL WHERE sku = 'SKU-NULL'")
        .await;

    let id = product["id"].as_str().unwrap();
    let (_, body) = app
        .json(Method::GET, &format!("/api/v1/products/{id}"), None)
        .await;
    assert!(body["data"]["status"].is_null());
}

#[tokio::test]
async fn status_update_persists_code() {
    let app = TestApp::new().await;
    let product = app.create_product(Uuid::new_v4(), "SKU-OOS").await;
    let id = product["id"].as_str().unwrap();

    let (status, body) = app
        .json(
            Method::PUT,
            &format!("/api/v1/products/{id}/status"),
            Some(json!({ "status": "OUT_OF_STOCK" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "OUT_OF_STOCK");

    let (_, body) = app
        .json(Method::GET, &format!("/api/v1/products/{id}"), None)
        .await;
    assert_eq!(body["data"]["status"], "OUT_OF_STOCK");
}

#[tokio::test]
async fn list_is_paginated_per_owner() {
    let app = TestApp::new().await;
    let owner = Uuid::new_v4();
    for n in 0..3 {
        app.create_product(owner, &format!("SKU-P{n}")).await;
    }
    app.create_product(Uuid::new_v4(), "SKU-OTHER").await;

    let (status, body) = app
        .json(
            Method::GET,
            &format!("/api/v1/products?ownerId={owner}&page=2&limit=2"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let page = &body["data"];
    assert_eq!(page["total"], 3);
    assert_eq!(page["page"], 2);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_product_is_not_found() {
    let app = TestApp::new().await;
    let (status, body) = app
        .json(
            Method::GET,
            &format!("/api/v1/products/{}", Uuid::new_v4()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("not found"));
}
