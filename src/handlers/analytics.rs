use crate::{
    dto::{BestDayResponse, SellerResponse, SellersBelowThresholdQuery, TopSellerQuery},
    errors::ErrorResponse,
    handlers::common::{ApiPath, ApiQuery},
    ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};

pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/top-seller", get(top_seller))
        .route("/analytics/sellers-max-sum", get(sellers_below_threshold))
        .route("/analytics/best-day/:id", get(best_day))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/top-seller",
    params(TopSellerQuery),
    responses(
        (status = 200, description = "Seller with the highest total in the period", body = ApiResponse<SellerResponse>),
        (status = 400, description = "Unknown period", body = ErrorResponse),
        (status = 404, description = "No transactions in the period", body = ErrorResponse)
    ),
    tag = "analytics"
)]
pub async fn top_seller(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TopSellerQuery>,
) -> ApiResult<SellerResponse> {
    let seller = state
        .services
        .analytics
        .top_seller(&query.period, query.reference_date)
        .await?;
    Ok(Json(ApiResponse::success(seller)))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/sellers-max-sum",
    params(SellersBelowThresholdQuery),
    responses(
        (status = 200, description = "Sellers whose total in the range is below the threshold", body = ApiResponse<Vec<SellerResponse>>)
    ),
    tag = "analytics"
)]
pub async fn sellers_below_threshold(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SellersBelowThresholdQuery>,
) -> ApiResult<Vec<SellerResponse>> {
    let sellers = state
        .services
        .analytics
        .sellers_below_threshold(query.threshold, query.start, query.end)
        .await?;
    Ok(Json(ApiResponse::success(sellers)))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/best-day/{id}",
    params(("id" = i32, Path, description = "Seller ID")),
    responses(
        (status = 200, description = "Busiest calendar day for the seller", body = ApiResponse<BestDayResponse>),
        (status = 404, description = "Seller not found or has no transactions", body = ErrorResponse)
    ),
    tag = "analytics"
)]
pub async fn best_day(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<BestDayResponse> {
    let best = state.services.analytics.best_day(id).await?;
    Ok(Json(ApiResponse::success(best)))
}
