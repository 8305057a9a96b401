mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use common::TestApp;

async fn checklist(app: &TestApp, user: Uuid) -> Value {
    let (status, body) = app
        .json(Method::GET, &format!("/api/v1/users/{user}/checklist"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    body["data"].clone()
}

fn completed_codes(progress: &Value) -> Vec<String> {
    progress["steps"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["completed"] == true)
        .map(|s| s["stepCode"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn new_user_starts_at_zero() {
    let app = TestApp::new().await;
    let progress = checklist(&app, Uuid::new_v4()).await;

    assert_eq!(progress["totalSteps"], 5);
    assert_eq!(progress["completedSteps"], 0);
    assert_eq!(progress["percentage"], 0.0);
    assert_eq!(progress["completed"], false);
    assert_eq!(progress["steps"][0]["stepCode"], "ADD_VEHICLE");
}

#[tokio::test]
async fn progress_follows_owned_records() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();

    let vehicle = app.create_vehicle(user, "GJ-05-1").await;
    app.create_product(user, "SKU-CHK").await;
    let order = app.create_order(user, vehicle["id"].as_str()).await;

    // Records owned by someone else never count
    app.create_vehicle(Uuid::new_v4(), "GJ-05-2").await;

    let progress = checklist(&app, user).await;
    assert_eq!(progress["completedSteps"], 3);
    assert_eq!(progress["percentage"], 60.0);
    assert_eq!(progress["activeOrders"], 1);
    assert_eq!(
        completed_codes(&progress),
        ["ADD_VEHICLE", "ADD_PRODUCT", "CREATE_ORDER"]
    );

    let id = order["id"].as_str().unwrap();
    app.json(
        Method::PUT,
        &format!("/api/v1/orders/{id}/status"),
        Some(json!({ "status": "delivered" })),
    )
    .await;
    app.json(
        Method::POST,
        &format!("/api/v1/orders/{id}/delivery-proofs"),
        Some(json!({ "proofType": "DOCUMENT", "filePath": "docs/pod.pdf" })),
    )
    .await;

    let progress = checklist(&app, user).await;
    assert_eq!(progress["percentage"], 100.0);
    assert_eq!(progress["completed"], true);
    assert_eq!(progress["activeOrders"], 0);
}
