mod common;

use axum::http::{Method, StatusCode};
use logistics_api::middleware_helpers::REQUEST_ID_HEADER;

use common::{read_json, TestApp};

#[tokio::test]
async fn health_reports_database() {
    let app = TestApp::new().await;
    let (status, body) = app.json(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["checks"]["database"], "healthy");
}

#[tokio::test]
async fn status_reports_service() {
    let app = TestApp::new().await;
    let (status, body) = app.json(Method::GET, "/api/v1/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["service"], "logistics-api");
    assert_eq!(body["data"]["environment"], "test");
}

#[tokio::test]
async fn every_response_carries_a_request_id() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/api/v1/status", None).await;
    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .expect("request id header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(!header.is_empty());

    let body = read_json(response).await;
    assert_eq!(body["meta"]["requestId"], header);
}

#[tokio::test]
async fn caller_request_id_is_echoed_into_errors() {
    let app = TestApp::new().await;
    let response = app
        .request_with_headers(
            Method::GET,
            "/api/v1/orders/00000000-0000-0000-0000-000000000000",
            None,
            &[(REQUEST_ID_HEADER, "trace-42")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "trace-42");

    let body = read_json(response).await;
    assert_eq!(body["requestId"], "trace-42");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;
    let (status, body) = app
        .json(Method::GET, "/api-docs/openapi.json", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/vehicles"].is_object());
}
