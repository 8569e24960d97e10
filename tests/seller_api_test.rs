mod common;

use axum::http::{Method, StatusCode};
use common::{utc, TestApp};
use litecrm_api::entities::PaymentType;
use serde_json::json;

#[tokio::test]
async fn create_then_fetch_seller() {
    let app = TestApp::new().await;

    let (status, body) = app
        .json(
            Method::POST,
            "/api/v1/sellers",
            Some(json!({"name": "Миша", "contactInfo": "misha@mail.ru"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_i64().expect("seller id");
    assert_eq!(body["data"]["name"], "Миша");
    assert!(body["data"]["registrationDate"].is_string());

    let (status, body) = app
        .json(Method::GET, &format!("/api/v1/sellers/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["contactInfo"], "misha@mail.ru");
}

#[tokio::test]
async fn create_reports_every_violation() {
    let app = TestApp::new().await;

    let (status, body) = app
        .json(
            Method::POST,
            "/api/v1/sellers",
            Some(json!({"name": "A", "contactInfo": "   "})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_failed");

    let violations = body["violations"].as_array().expect("violations listed");
    let fields: Vec<&str> = violations
        .iter()
        .filter_map(|v| v["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["contact_info", "name"]);

    let (_, list) = app.json(Method::GET, "/api/v1/sellers", None).await;
    assert_eq!(list["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn partial_update_keeps_omitted_fields() {
    let app = TestApp::new().await;
    let seller = app
        .seed_seller("Боб", "bob@mail.ru", utc(2024, 1, 5, 9))
        .await;

    let (status, body) = app
        .json(
            Method::PUT,
            &format!("/api/v1/sellers/{}", seller.id),
            Some(json!({"contactInfo": "+7 900 123-45-67"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Боб");
    assert_eq!(body["data"]["contactInfo"], "+7 900 123-45-67");
    assert_eq!(body["data"]["registrationDate"], "2024-01-05T09:00:00Z");
}

#[tokio::test]
async fn clearing_a_required_field_fails_validation() {
    let app = TestApp::new().await;
    let seller = app
        .seed_seller("Боб", "bob@mail.ru", utc(2024, 1, 5, 9))
        .await;

    let (status, body) = app
        .json(
            Method::PUT,
            &format!("/api/v1/sellers/{}", seller.id),
            Some(json!({"name": null})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["violations"][0]["message"], "Name must not be null");

    let (_, body) = app
        .json(Method::GET, &format!("/api/v1/sellers/{}", seller.id), None)
        .await;
    assert_eq!(body["data"]["name"], "Боб");
}

#[tokio::test]
async fn unknown_seller_is_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.json(Method::GET, "/api/v1/sellers/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "seller_not_found");
    assert_eq!(body["message"], "Seller with id 42 not found");

    let (status, _) = app.json(Method::DELETE, "/api/v1/sellers/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_is_ordered_by_id() {
    let app = TestApp::new().await;
    let first = app.seed_seller("Alice", "a@x.io", utc(2024, 1, 1, 0)).await;
    let second = app.seed_seller("Bob", "b@x.io", utc(2024, 1, 2, 0)).await;

    let (status, body) = app.json(Method::GET, "/api/v1/sellers", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["data"]
        .as_array()
        .expect("seller list")
        .iter()
        .filter_map(|s| s["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![i64::from(first.id), i64::from(second.id)]);
}

#[tokio::test]
async fn delete_removes_seller_with_its_transactions() {
    let app = TestApp::new().await;
    let doomed = app.seed_seller("Alice", "a@x.io", utc(2024, 1, 1, 0)).await;
    let kept = app.seed_seller("Bob", "b@x.io", utc(2024, 1, 2, 0)).await;
    for day in 1..=3 {
        app.seed_transaction(doomed.id, "10.00", PaymentType::Cash, utc(2024, 3, day, 12))
            .await;
    }
    let survivor = app
        .seed_transaction(kept.id, "20.00", PaymentType::Card, utc(2024, 3, 1, 12))
        .await;

    let (status, body) = app
        .json(Method::DELETE, &format!("/api/v1/sellers/{}", doomed.id), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app
        .json(Method::GET, &format!("/api/v1/sellers/{}", doomed.id), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.json(Method::GET, "/api/v1/transactions", None).await;
    let remaining = body["data"].as_array().expect("transaction list");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], survivor.id);
}

#[tokio::test]
async fn seller_transactions_are_listed() {
    let app = TestApp::new().await;
    let seller = app.seed_seller("Alice", "a@x.io", utc(2024, 1, 1, 0)).await;
    let other = app.seed_seller("Bob", "b@x.io", utc(2024, 1, 2, 0)).await;
    app.seed_transaction(seller.id, "1.50", PaymentType::Card, utc(2024, 3, 1, 8))
        .await;
    app.seed_transaction(other.id, "2.00", PaymentType::Cash, utc(2024, 3, 1, 9))
        .await;
    app.seed_transaction(seller.id, "3.00", PaymentType::Transfer, utc(2024, 3, 2, 8))
        .await;

    let (status, body) = app
        .json(
            Method::GET,
            &format!("/api/v1/sellers/{}/transactions", seller.id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().expect("transactions");
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|t| t["sellerId"] == seller.id));
    assert_eq!(items[1]["paymentType"], "TRANSFER");
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::new().await;
    let response = app
        .request(Method::GET, "/api/v1/sellers", None)
        .await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn health_pings_the_database() {
    let app = TestApp::new().await;

    let (status, body) = app.json(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
    assert_eq!(body["database"], "up");

    let (status, body) = app.json(Method::GET, "/health/live", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("database").is_none());
}

#[tokio::test]
async fn status_reports_configured_environment() {
    let app = TestApp::new().await;

    let (status, body) = app.json(Method::GET, "/api/v1/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["service"], "litecrm-api");
    assert_eq!(body["data"]["environment"], "test");
}
