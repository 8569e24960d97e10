use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LiteCRM API",
        version = "0.1.0",
        description = r#"
# LiteCRM API

Sellers, their transactions, and period analytics.

## Analytics

- **Top seller**: highest summed amount within a DAY, MONTH, QUARTER or YEAR around a reference date
- **Sellers below threshold**: sellers whose summed amount in an explicit range is below a threshold
- **Best day**: the calendar day on which a seller recorded the most transactions

All ranges are half-open `[start, end)` on the UTC calendar.

## Error Handling

Failures share one body shape with a stable `code`:

```json
{
  "error": "Bad Request",
  "code": "invalid_payment_type",
  "message": "Got invalid payment type: BITCOIN. Available types are: 'CARD', 'CASH', 'TRANSFER'",
  "timestamp": "2024-03-15T10:30:00+00:00"
}
```
"#
    ),
    paths(
        crate::handlers::sellers::list_sellers,
        crate::handlers::sellers::get_seller,
        crate::handlers::sellers::create_seller,
        crate::handlers::sellers::update_seller,
        crate::handlers::sellers::delete_seller,
        crate::handlers::sellers::get_seller_transactions,
        crate::handlers::transactions::list_transactions,
        crate::handlers::transactions::get_transaction,
        crate::handlers::transactions::create_transaction,
        crate::handlers::transactions::update_transaction,
        crate::handlers::transactions::delete_transaction,
        crate::handlers::analytics::top_seller,
        crate::handlers::analytics::sellers_below_threshold,
        crate::handlers::analytics::best_day,
    ),
    components(
        schemas(
            crate::dto::CreateSellerRequest,
            crate::dto::UpdateSellerRequest,
            crate::dto::SellerResponse,
            crate::dto::CreateTransactionRequest,
            crate::dto::UpdateTransactionRequest,
            crate::dto::TransactionResponse,
            crate::dto::BestDayResponse,
            crate::entities::PaymentType,
            crate::services::PeriodType,
            crate::errors::ErrorResponse,
            crate::errors::FieldViolation,
            crate::errors::EntityKind,
        )
    ),
    tags(
        (name = "sellers", description = "Seller management"),
        (name = "transactions", description = "Transaction management"),
        (name = "analytics", description = "Period analytics"),
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
