mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::TestApp;

fn record(sku: &str, category: Option<&str>, stock: i32, forecast: i32, backorder: bool) -> Value {
    json!({
        "sku": sku,
        "category": category,
        "nationalInv": stock,
        "leadTime": 8,
        "inTransitQty": 0,
        "forecast3Month": forecast,
        "sales3Month": forecast / 2,
        "minBank": 5,
        "perf6MonthAvg": 0.9,
        "wentOnBackorder": backorder
    })
}

async fn seeded() -> TestApp {
    let app = TestApp::new().await;
    let (status, body) = app
        .json(
            Method::POST,
            "/api/v1/analytics/backorder-records",
            Some(json!({
                "records": [
                    record("SKU-1", Some("Electronics"), 0, 120, true),
                    record("SKU-2", Some("Electronics"), 300, 40, false),
                    record("SKU-3", Some("Garden"), 90, 100, false),
                    record("SKU-4", None, 10, 200, true)
                ]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "ingest failed: {body}");
    assert_eq!(body["data"]["stored"], 4);
    app
}

#[tokio::test]
async fn empty_batch_is_bad_request() {
    let app = TestApp::new().await;
    let (status, _) = app
        .json(
            Method::POST,
            "/api/v1/analytics/backorder-records",
            Some(json!({ "records": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn overview_reports_rate_and_groups() {
    let app = seeded().await;

    let (status, body) = app
        .json(Method::GET, "/api/v1/analytics/overview", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let overview = &body["data"];
    assert_eq!(overview["totalRecords"], 4);
    assert_eq!(overview["backorderCount"], 2);
    assert_eq!(overview["backorderRate"], 50.0);
    assert_eq!(overview["avgStockBackorder"], 5.0);
    assert_eq!(overview["avgStockNoBackorder"], 195.0);

    let (_, body) = app
        .json(Method::GET, "/api/v1/analytics/overview?detailed=false", None)
        .await;
    assert_eq!(body["data"]["backorderRate"], 50.0);
    assert!(body["data"].get("avgStockBackorder").is_none());
}

#[tokio::test]
async fn predictions_are_ranked_and_limited() {
    let app = seeded().await;

    let (status, body) = app
        .json(Method::GET, "/api/v1/analytics/predictions?limit=2", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["sku"], "SKU-1");
    assert_eq!(rows[0]["priority"], "HIGH");
    assert!(
        rows[0]["backorderProbability"].as_f64().unwrap()
            >= rows[1]["backorderProbability"].as_f64().unwrap()
    );

    let (status, _) = app
        .json(Method::GET, "/api/v1/analytics/predictions?limit=0", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .json(
            Method::GET,
            "/api/v1/analytics/predictions?minProbability=2",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn correlation_lists_categories() {
    let app = seeded().await;

    let (status, body) = app
        .json(Method::GET, "/api/v1/analytics/correlation", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let analysis = &body["data"];
    assert_eq!(analysis["sampleSize"], 4);

    let categories = analysis["categoryDistributions"].as_array().unwrap();
    let electronics = categories
        .iter()
        .find(|c| c["category"] == "Electronics")
        .expect("electronics bucket");
    assert_eq!(electronics["count"], 2);
    assert_eq!(electronics["backorderCount"], 1);
    assert_eq!(electronics["backorderRate"], 50.0);
    assert!(categories.iter().any(|c| c["category"] == "Uncategorized"));
}

#[tokio::test]
async fn feature_importance_is_normalised() {
    let app = seeded().await;

    let (status, body) = app
        .json(Method::GET, "/api/v1/analytics/feature-importance", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let features = body["data"].as_array().unwrap();
    assert!(!features.is_empty());

    let total: f64 = features
        .iter()
        .map(|f| f["importance"].as_f64().unwrap())
        .sum();
    assert!((total - 1.0).abs() < 1e-3);

    let scores: Vec<f64> = features
        .iter()
        .map(|f| f["importance"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}
