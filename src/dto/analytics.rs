use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct TopSellerQuery {
    /// DAY, MONTH, QUARTER or YEAR
    #[param(example = "MONTH")]
    pub period: String,
    /// Any instant inside the wanted period (RFC 3339)
    #[param(value_type = String, example = "2024-03-15T00:00:00Z")]
    pub reference_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct SellersBelowThresholdQuery {
    /// Exclusive upper bound for the per-seller sum
    #[param(value_type = String, example = "1000.00")]
    pub threshold: Decimal,
    /// Inclusive range start (RFC 3339)
    #[param(value_type = String, example = "2024-03-01T00:00:00Z")]
    pub start: DateTime<Utc>,
    /// Exclusive range end (RFC 3339)
    #[param(value_type = String, example = "2024-04-01T00:00:00Z")]
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "bestDay": "2024-03-10",
    "transactionCount": 2
}))]
pub struct BestDayResponse {
    /// UTC calendar date with the most transactions
    #[schema(value_type = String, format = Date, example = "2024-03-10")]
    pub best_day: NaiveDate,
    pub transaction_count: u64,
}
