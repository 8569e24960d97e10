use crate::{
    dto::{CreateSellerRequest, SellerResponse, TransactionResponse, UpdateSellerRequest},
    errors::{ErrorResponse, ServiceError},
    handlers::common::{created, no_content, ApiJson, ApiPath},
    ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

pub fn seller_routes() -> Router<AppState> {
    Router::new()
        .route("/sellers", get(list_sellers).post(create_seller))
        .route(
            "/sellers/:id",
            get(get_seller).put(update_seller).delete(delete_seller),
        )
        .route("/sellers/:id/transactions", get(get_seller_transactions))
}

#[utoipa::path(
    get,
    path = "/api/v1/sellers",
    responses(
        (status = 200, description = "All sellers ordered by id", body = ApiResponse<Vec<SellerResponse>>)
    ),
    tag = "sellers"
)]
pub async fn list_sellers(State(state): State<AppState>) -> ApiResult<Vec<SellerResponse>> {
    let sellers = state.services.sellers.list_sellers().await?;
    Ok(Json(ApiResponse::success(sellers)))
}

#[utoipa::path(
    get,
    path = "/api/v1/sellers/{id}",
    params(("id" = i32, Path, description = "Seller ID")),
    responses(
        (status = 200, description = "Seller fetched", body = ApiResponse<SellerResponse>),
        (status = 404, description = "Seller not found", body = ErrorResponse)
    ),
    tag = "sellers"
)]
pub async fn get_seller(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<SellerResponse> {
    let seller = state.services.sellers.get_seller(id).await?;
    Ok(Json(ApiResponse::success(seller)))
}

#[utoipa::path(
    post,
    path = "/api/v1/sellers",
    request_body = CreateSellerRequest,
    responses(
        (status = 201, description = "Seller created", body = ApiResponse<SellerResponse>),
        (status = 400, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "sellers"
)]
pub async fn create_seller(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateSellerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SellerResponse>>), ServiceError> {
    let seller = state.services.sellers.create_seller(payload).await?;
    Ok(created(seller))
}

#[utoipa::path(
    put,
    path = "/api/v1/sellers/{id}",
    params(("id" = i32, Path, description = "Seller ID")),
    request_body = UpdateSellerRequest,
    responses(
        (status = 200, description = "Seller updated", body = ApiResponse<SellerResponse>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Seller not found", body = ErrorResponse)
    ),
    tag = "sellers"
)]
pub async fn update_seller(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateSellerRequest>,
) -> ApiResult<SellerResponse> {
    let seller = state.services.sellers.update_seller(id, payload).await?;
    Ok(Json(ApiResponse::success(seller)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/sellers/{id}",
    params(("id" = i32, Path, description = "Seller ID")),
    responses(
        (status = 204, description = "Seller and its transactions deleted"),
        (status = 404, description = "Seller not found", body = ErrorResponse)
    ),
    tag = "sellers"
)]
pub async fn delete_seller(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.sellers.delete_seller(id).await?;
    Ok(no_content())
}

#[utoipa::path(
    get,
    path = "/api/v1/sellers/{id}/transactions",
    params(("id" = i32, Path, description = "Seller ID")),
    responses(
        (status = 200, description = "Transactions linked to the seller", body = ApiResponse<Vec<TransactionResponse>>),
        (status = 404, description = "Seller not found", body = ErrorResponse)
    ),
    tag = "sellers"
)]
pub async fn get_seller_transactions(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Vec<TransactionResponse>> {
    let transactions = state.services.sellers.get_seller_transactions(id).await?;
    Ok(Json(ApiResponse::success(transactions)))
}
