use crate::{
    dto::{CreateTransactionRequest, TransactionResponse, UpdateTransactionRequest},
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

pub fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route(
            "/transactions/:id",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    responses(
        (status = 200, description = "All transactions ordered by id", body = ApiResponse<Vec<TransactionResponse>>)
    ),
    tag = "transactions"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
) -> ApiResult<Vec<TransactionResponse>> {
    let transactions = state.services.transactions.list_transactions().await?;
    Ok(Json(ApiResponse::success(transactions)))
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions/{id}",
    params(("id" = i32, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Transaction fetched", body = ApiResponse<TransactionResponse>),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    tag = "transactions"
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<TransactionResponse> {
    let transaction = state.services.transactions.get_transaction(id).await?;
    Ok(Json(ApiResponse::success(transaction)))
}

#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created", body = ApiResponse<TransactionResponse>),
        (status = 400, description = "Invalid payment type, missing seller id or validation failure", body = ErrorResponse),
        (status = 404, description = "Seller not found", body = ErrorResponse)
    ),
    tag = "transactions"
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionResponse>>), ServiceError> {
    let transaction = state.services.transactions.create_transaction(payload).await?;
    Ok(created(transaction))
}

#[utoipa::path(
    put,
    path = "/api/v1/transactions/{id}",
    params(("id" = i32, Path, description = "Transaction ID")),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Transaction updated", body = ApiResponse<TransactionResponse>),
        (status = 400, description = "Invalid payment type or validation failure", body = ErrorResponse),
        (status = 404, description = "Transaction or seller not found", body = ErrorResponse)
    ),
    tag = "transactions"
)]
pub async fn update_transaction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateTransactionRequest>,
) -> ApiResult<TransactionResponse> {
    let transaction = state
        .services
        .transactions
        .update_transaction(id, payload)
        .await?;
    Ok(Json(ApiResponse::success(transaction)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{id}",
    params(("id" = i32, Path, description = "Transaction ID")),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    tag = "transactions"
)]
pub async fn delete_transaction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.transactions.delete_transaction(id).await?;
    Ok(no_content())
}
