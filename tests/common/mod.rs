#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use logistics_api::{config::AppConfig, db, AppState};
use sea_orm::{ConnectionTrait, Statement};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

/// Helper harness for spinning up an application backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // One connection keeps every query on the same in-memory database
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = logistics_api::app_router(state.clone());

        Self { router, state }
    }

    /// Send a request against the router with optional JSON body and extra headers.
    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        self.request_with_headers(method, uri, body, &[]).await
    }

    /// Send a request and decode the JSON body along with the status.
    pub async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = self.request(method, uri, body).await;
        let status = response.status();
        (status, read_json(response).await)
    }

    /// Run raw SQL against the backing database.
    pub async fn execute_sql(&self, sql: &str) {
        let db = &*self.state.db;
        db.execute(Statement::from_string(
            db.get_database_backend(),
            sql.to_string(),
        ))
        .await
        .expect("raw sql should execute");
    }

    pub async fn create_vehicle(&self, owner_id: Uuid, plate: &str) -> Value {
        let (status, body) = self
            .json(
                Method::POST,
                "/api/v1/vehicles",
                Some(json!({
                    "ownerId": owner_id,
                    "licensePlate": plate,
                    "vehicleType": "van",
                    "capacity": 1200.0,
                    "volume": 8.5
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "vehicle creation failed: {body}");
        body["data"].clone()
    }

    pub async fn create_product(&self, owner_id: Uuid, sku: &str) -> Value {
        let (status, body) = self
            .json(
                Method::POST,
                "/api/v1/products",
                Some(json!({
                    "ownerId": owner_id,
                    "sku": sku,
                    "name": format!("Product {sku}"),
                    "category": "Tools",
                    "stockQuantity": 10
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "product creation failed: {body}");
        body["data"].clone()
    }

    pub async fn create_order(&self, owner_id: Uuid, vehicle_id: Option<&str>) -> Value {
        let (status, body) = self
            .json(
                Method::POST,
                "/api/v1/orders",
                Some(json!({
                    "ownerId": owner_id,
                    "customerName": "Asha Rao",
                    "deliveryAddress": "12 MG Road, Bengaluru",
                    "vehicleId": vehicle_id
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "order creation failed: {body}");
        body["data"].clone()
    }
}

pub async fn read_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("parse response body")
}
