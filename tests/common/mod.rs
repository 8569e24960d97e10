#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use litecrm_api::{
    config::AppConfig,
    db,
    entities::{seller, transaction, PaymentType},
    AppState,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tower::ServiceExt;

/// Helper harness for spinning up the application over a private in-memory
/// SQLite database.
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
        cfg.auto_migrate = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = litecrm_api::app_router(state.clone());

        Self { router, state }
    }

    /// Send a request against the router with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

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

    /// Sends a request and returns the status with the decoded JSON body
    /// (`Value::Null` for an empty body).
    pub async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = self.request(method, uri, body).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        if bytes.is_empty() {
            return (status, Value::Null);
        }
        let value = serde_json::from_slice(&bytes).expect("response body is not json");
        (status, value)
    }

    pub async fn seed_seller(
        &self,
        name: &str,
        contact_info: &str,
        registered: DateTime<Utc>,
    ) -> seller::Model {
        seller::ActiveModel {
            name: Set(name.to_string()),
            contact_info: Set(contact_info.to_string()),
            registration_date: Set(registered),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("seed seller")
    }

    pub async fn seed_transaction(
        &self,
        seller_id: i32,
        amount: &str,
        payment_type: PaymentType,
        at: DateTime<Utc>,
    ) -> transaction::Model {
        transaction::ActiveModel {
            seller_id: Set(seller_id),
            amount: Set(dec(amount)),
            payment_type: Set(payment_type),
            transaction_date: Set(at),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("seed transaction")
    }
}

pub fn dec(raw: &str) -> Decimal {
    Decimal::from_str(raw).expect("valid decimal literal")
}

pub fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .expect("valid test timestamp")
}

/// Reads a JSON decimal that may be encoded as a string or a number.
pub fn json_decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => dec(s),
        Value::Number(n) => dec(&n.to_string()),
        other => panic!("expected decimal, got {other}"),
    }
}
