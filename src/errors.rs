use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Which kind of record a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    Seller,
    Transaction,
}

/// A single violated field constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    #[schema(example = "name")]
    pub field: String,
    #[schema(example = "Name must have length at least 2 and at most 255")]
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error body returned for every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Bad Request",
    "code": "validation_failed",
    "message": "Validation failed for seller: name: Name must not be blank",
    "violations": [{"field": "name", "message": "Name must not be blank"}],
    "request_id": "req-abc123xyz",
    "timestamp": "2024-03-15T10:30:00+00:00"
}))]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Bad Request")
    #[schema(example = "Not Found")]
    pub error: String,
    /// Stable machine-readable error code
    #[schema(example = "seller_not_found")]
    pub code: String,
    /// Human-readable error description
    #[schema(example = "Seller with id 42 not found")]
    pub message: String,
    /// Every violated field constraint, for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<FieldViolation>>,
    /// Unique request identifier for support and debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "req-abc123xyz")]
    pub request_id: Option<String>,
    /// RFC 3339 timestamp when the error occurred
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(
        #[from]
        #[serde(skip)]
        sea_orm::error::DbErr,
    ),

    #[error("Seller with id {0} not found")]
    SellerNotFound(i32),

    #[error("Transaction with id {0} not found")]
    TransactionNotFound(i32),

    #[error("Validation failed for {entity}: {}", summarize(.violations))]
    ValidationFailed {
        entity: EntityKind,
        violations: Vec<FieldViolation>,
    },

    #[error(
        "Got invalid payment type: {0}. Available types are: {}",
        crate::entities::PaymentType::available()
    )]
    InvalidPaymentType(String),

    #[error("Seller ID must not be null when creating a new transaction")]
    MissingSellerReference,

    #[error(
        "There were no transactions in the given period: {} to {}",
        .start.to_rfc3339(),
        .end.to_rfc3339()
    )]
    NoTransactionsInPeriod {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Couldn't find the best day for seller with id: {0} because it has zero transactions")]
    SellerHasNoTransactions(i32),

    #[error("Invalid period: {0}. Available periods are: 'DAY', 'MONTH', 'QUARTER', 'YEAR'")]
    InvalidPeriodTag(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Sum of transaction amounts for seller with id {0} exceeds the supported range")]
    AmountOverflow(i32),

    #[error("Internal error: {0}")]
    InternalError(String),
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::SellerNotFound(_)
            | Self::TransactionNotFound(_)
            | Self::NoTransactionsInPeriod { .. }
            | Self::SellerHasNoTransactions(_) => StatusCode::NOT_FOUND,
            Self::ValidationFailed { .. }
            | Self::InvalidPaymentType(_)
            | Self::MissingSellerReference
            | Self::InvalidPeriodTag(_)
            | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::AmountOverflow(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::DatabaseError(_) | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code, one per variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DatabaseError(_) => "database_error",
            Self::SellerNotFound(_) => "seller_not_found",
            Self::TransactionNotFound(_) => "transaction_not_found",
            Self::ValidationFailed { .. } => "validation_failed",
            Self::InvalidPaymentType(_) => "invalid_payment_type",
            Self::MissingSellerReference => "missing_seller_reference",
            Self::NoTransactionsInPeriod { .. } => "no_transactions_in_period",
            Self::SellerHasNoTransactions(_) => "seller_has_no_transactions",
            Self::InvalidPeriodTag(_) => "invalid_period",
            Self::InvalidInput(_) => "invalid_input",
            Self::AmountOverflow(_) => "amount_overflow",
            Self::InternalError(_) => "internal_error",
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::InternalError(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    pub fn violations(&self) -> Option<&[FieldViolation]> {
        match self {
            Self::ValidationFailed { violations, .. } => Some(violations),
            _ => None,
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        ServiceError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        ServiceError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            code: self.code().to_string(),
            message: self.response_message(),
            violations: self.violations().map(<[FieldViolation]>::to_vec),
            request_id: current_request_id(),
            timestamp: Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use chrono::TimeZone;
    use rstest::rstest;

    #[tokio::test]
    async fn service_error_response_includes_request_id() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("req-123"), async {
                ServiceError::SellerNotFound(7).into_response()
            })
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.request_id.as_deref(), Some("req-123"));
        assert_eq!(payload.code, "seller_not_found");
        assert_eq!(payload.message, "Seller with id 7 not found");
    }

    #[tokio::test]
    async fn validation_failure_body_lists_every_violation() {
        let err = ServiceError::ValidationFailed {
            entity: EntityKind::Seller,
            violations: vec![
                FieldViolation::new("contact_info", "Contact info must not be blank"),
                FieldViolation::new("name", "Name must not be blank"),
            ],
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        let violations = payload.violations.unwrap();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[1].field, "name");
        assert!(payload.message.starts_with("Validation failed for seller"));
    }

    #[rstest]
    #[case(ServiceError::SellerNotFound(1), StatusCode::NOT_FOUND)]
    #[case(ServiceError::TransactionNotFound(1), StatusCode::NOT_FOUND)]
    #[case(ServiceError::SellerHasNoTransactions(1), StatusCode::NOT_FOUND)]
    #[case(ServiceError::InvalidPaymentType("BITCOIN".into()), StatusCode::BAD_REQUEST)]
    #[case(ServiceError::MissingSellerReference, StatusCode::BAD_REQUEST)]
    #[case(ServiceError::InvalidPeriodTag("WEEK".into()), StatusCode::BAD_REQUEST)]
    #[case(ServiceError::InvalidInput("x".into()), StatusCode::BAD_REQUEST)]
    #[case(ServiceError::AmountOverflow(1), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(ServiceError::InternalError("x".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn service_error_status_code_mapping(#[case] err: ServiceError, #[case] expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
    }

    #[test]
    fn empty_period_message_echoes_range() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let err = ServiceError::NoTransactionsInPeriod { start, end };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.to_string(),
            "There were no transactions in the given period: 2024-03-01T00:00:00+00:00 to 2024-04-01T00:00:00+00:00"
        );
    }

    #[test]
    fn invalid_payment_type_lists_available_types() {
        assert_eq!(
            ServiceError::InvalidPaymentType("BITCOIN".into()).to_string(),
            "Got invalid payment type: BITCOIN. Available types are: 'CARD', 'CASH', 'TRANSFER'"
        );
    }

    #[test]
    fn response_message_hides_internal_details() {
        assert_eq!(
            ServiceError::InternalError("pool exhausted".into()).response_message(),
            "Internal server error"
        );
        assert_eq!(
            ServiceError::DatabaseError(sea_orm::DbErr::Custom("boom".into())).response_message(),
            "Database error"
        );
        assert_eq!(
            ServiceError::MissingSellerReference.response_message(),
            "Seller ID must not be null when creating a new transaction"
        );
    }
}
