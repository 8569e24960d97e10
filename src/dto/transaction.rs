use super::Patch;
use crate::entities::{transaction, PaymentType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payment type arrives as free text so that an unknown value can be
/// reported as such rather than as a generic body error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "sellerId": 1,
    "amount": "5000.00",
    "paymentType": "CARD"
}))]
pub struct CreateTransactionRequest {
    #[schema(example = 1)]
    pub seller_id: Option<i32>,
    #[schema(value_type = Option<String>, example = "5000.00")]
    pub amount: Option<Decimal>,
    /// One of CARD, CASH, TRANSFER
    #[schema(example = "CARD")]
    pub payment_type: Option<String>,
}

/// Partial update. Omitted fields keep their stored value; a new `sellerId`
/// moves the transaction to that seller.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "sellerId": 2,
    "paymentType": "TRANSFER"
}))]
pub struct UpdateTransactionRequest {
    #[serde(default)]
    #[schema(value_type = Option<i32>, example = 2)]
    pub seller_id: Patch<i32>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "200.00")]
    pub amount: Patch<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "TRANSFER")]
    pub payment_type: Patch<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 10,
    "sellerId": 1,
    "amount": "5000.00",
    "paymentType": "CARD",
    "transactionDate": "2024-03-02T12:00:00Z"
}))]
pub struct TransactionResponse {
    pub id: i32,
    pub seller_id: i32,
    #[schema(value_type = String, example = "5000.00")]
    pub amount: Decimal,
    pub payment_type: PaymentType,
    /// Assigned by the server at creation
    pub transaction_date: DateTime<Utc>,
}

impl From<transaction::Model> for TransactionResponse {
    fn from(model: transaction::Model) -> Self {
        Self {
            id: model.id,
            seller_id: model.seller_id,
            amount: model.amount,
            payment_type: model.payment_type,
            transaction_date: model.transaction_date,
        }
    }
}
