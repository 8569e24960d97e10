mod common;

use axum::http::{Method, StatusCode};
use common::{utc, TestApp};
use litecrm_api::entities::PaymentType;
use rstest::rstest;

/// Seller A with one large March sale, seller B with two small ones, seller
/// C with nothing, plus an April sale for B just past the month boundary.
async fn march_fixture(app: &TestApp) -> (i32, i32, i32) {
    let a = app.seed_seller("Alice", "a@x.io", utc(2024, 1, 1, 0)).await;
    let b = app.seed_seller("Bob", "b@x.io", utc(2024, 1, 2, 0)).await;
    let c = app.seed_seller("Carol", "c@x.io", utc(2024, 1, 3, 0)).await;

    app.seed_transaction(a.id, "5000.00", PaymentType::Card, utc(2024, 3, 2, 12))
        .await;
    app.seed_transaction(b.id, "150.00", PaymentType::Cash, utc(2024, 3, 3, 12))
        .await;
    app.seed_transaction(b.id, "50.00", PaymentType::Transfer, utc(2024, 3, 20, 12))
        .await;
    app.seed_transaction(b.id, "9000.00", PaymentType::Card, utc(2024, 4, 1, 0))
        .await;

    (a.id, b.id, c.id)
}

#[tokio::test]
async fn top_seller_for_month() {
    let app = TestApp::new().await;
    let (a, _, _) = march_fixture(&app).await;

    let (status, body) = app
        .json(
            Method::GET,
            "/api/v1/analytics/top-seller?period=MONTH&referenceDate=2024-03-15T00:00:00Z",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], a);
    assert_eq!(body["data"]["name"], "Alice");
}

#[rstest]
#[case("DAY", "2024-04-01T00:00:00Z", "Bob")]
#[case("QUARTER", "2024-02-10T00:00:00Z", "Alice")]
#[case("QUARTER", "2024-05-31T23:59:59Z", "Bob")]
#[case("YEAR", "2024-12-31T00:00:00Z", "Bob")]
#[tokio::test]
async fn top_seller_for_each_period(
    #[case] period: &str,
    #[case] reference: &str,
    #[case] expected: &str,
) {
    let app = TestApp::new().await;
    march_fixture(&app).await;

    let (status, body) = app
        .json(
            Method::GET,
            &format!("/api/v1/analytics/top-seller?period={period}&referenceDate={reference}"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], expected);
}

#[tokio::test]
async fn empty_period_echoes_its_bounds() {
    let app = TestApp::new().await;
    app.seed_seller("Alice", "a@x.io", utc(2024, 1, 1, 0)).await;

    let (status, body) = app
        .json(
            Method::GET,
            "/api/v1/analytics/top-seller?period=MONTH&referenceDate=2024-03-15T00:00:00Z",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "no_transactions_in_period");
    assert_eq!(
        body["message"],
        "There were no transactions in the given period: 2024-03-01T00:00:00+00:00 to 2024-04-01T00:00:00+00:00"
    );
}

#[tokio::test]
async fn unknown_period_tag_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app
        .json(
            Method::GET,
            "/api/v1/analytics/top-seller?period=WEEK&referenceDate=2024-03-15T00:00:00Z",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_period");
}

#[tokio::test]
async fn sellers_below_threshold_in_range() {
    let app = TestApp::new().await;
    let (_, b, _) = march_fixture(&app).await;

    let (status, body) = app
        .json(
            Method::GET,
            "/api/v1/analytics/sellers-max-sum?threshold=1000&start=2024-03-01T00:00:00Z&end=2024-04-01T00:00:00Z",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let sellers = body["data"].as_array().expect("seller list");
    assert_eq!(sellers.len(), 1);
    assert_eq!(sellers[0]["id"], b);
}

#[tokio::test]
async fn total_equal_to_threshold_is_excluded() {
    let app = TestApp::new().await;
    march_fixture(&app).await;

    let (status, body) = app
        .json(
            Method::GET,
            "/api/v1/analytics/sellers-max-sum?threshold=200.00&start=2024-03-01T00:00:00Z&end=2024-04-01T00:00:00Z",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn reversed_range_yields_no_sellers() {
    let app = TestApp::new().await;
    march_fixture(&app).await;

    let (status, body) = app
        .json(
            Method::GET,
            "/api/v1/analytics/sellers-max-sum?threshold=100000&start=2024-04-01T00:00:00Z&end=2024-03-01T00:00:00Z",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn best_day_counts_transactions_per_date() {
    let app = TestApp::new().await;
    let seller = app.seed_seller("Alice", "a@x.io", utc(2024, 1, 1, 0)).await;
    app.seed_transaction(seller.id, "1.00", PaymentType::Cash, utc(2024, 3, 10, 9))
        .await;
    app.seed_transaction(seller.id, "1.00", PaymentType::Cash, utc(2024, 3, 10, 18))
        .await;
    app.seed_transaction(seller.id, "999.00", PaymentType::Card, utc(2024, 3, 11, 9))
        .await;

    let (status, body) = app
        .json(
            Method::GET,
            &format!("/api/v1/analytics/best-day/{}", seller.id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["bestDay"], "2024-03-10");
    assert_eq!(body["data"]["transactionCount"], 2);
}

#[tokio::test]
async fn best_day_without_transactions() {
    let app = TestApp::new().await;
    let seller = app.seed_seller("Alice", "a@x.io", utc(2024, 1, 1, 0)).await;

    let (status, body) = app
        .json(
            Method::GET,
            &format!("/api/v1/analytics/best-day/{}", seller.id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "seller_has_no_transactions");

    let (status, body) = app
        .json(Method::GET, "/api/v1/analytics/best-day/999", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "seller_not_found");
}

#[tokio::test]
async fn malformed_query_parameters_use_the_error_body() {
    let app = TestApp::new().await;

    let (status, body) = app
        .json(
            Method::GET,
            "/api/v1/analytics/top-seller?period=MONTH&referenceDate=yesterday",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_input");

    let (status, body) = app
        .json(
            Method::GET,
            "/api/v1/analytics/sellers-max-sum?threshold=lots&start=2024-03-01T00:00:00Z&end=2024-04-01T00:00:00Z",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_input");

    let (status, body) = app
        .json(Method::GET, "/api/v1/analytics/best-day/abc", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_input");
}

#[tokio::test]
async fn overflowing_totals_are_reported_not_panicked() {
    let app = TestApp::new().await;
    let seller = app.seed_seller("Alice", "a@x.io", utc(2024, 1, 1, 0)).await;
    // written around the gate, as a legacy import might
    app.seed_transaction(
        seller.id,
        "50000000000000000000000000000",
        PaymentType::Card,
        utc(2024, 3, 2, 10),
    )
    .await;
    app.seed_transaction(
        seller.id,
        "50000000000000000000000000000",
        PaymentType::Card,
        utc(2024, 3, 2, 11),
    )
    .await;

    let (status, body) = app
        .json(
            Method::GET,
            "/api/v1/analytics/top-seller?period=DAY&referenceDate=2024-03-02T00:00:00Z",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "amount_overflow");
}
