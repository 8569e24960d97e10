use super::Patch;
use crate::entities::seller;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "name": "Миша",
    "contactInfo": "misha@mail.ru"
}))]
pub struct CreateSellerRequest {
    /// Seller name, 2 to 255 characters
    #[schema(example = "Миша")]
    pub name: Option<String>,
    /// Contact details, at most 255 characters
    #[schema(example = "misha@mail.ru")]
    pub contact_info: Option<String>,
}

/// Partial update. Omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "contactInfo": "+7 900 123-45-67"
}))]
pub struct UpdateSellerRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Боб")]
    pub name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "+7 900 123-45-67")]
    pub contact_info: Patch<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 1,
    "name": "Миша",
    "contactInfo": "misha@mail.ru",
    "registrationDate": "2024-03-01T09:00:00Z"
}))]
pub struct SellerResponse {
    pub id: i32,
    pub name: String,
    pub contact_info: String,
    /// Assigned by the server at creation
    pub registration_date: DateTime<Utc>,
}

impl From<seller::Model> for SellerResponse {
    fn from(model: seller::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            contact_info: model.contact_info,
            registration_date: model.registration_date,
        }
    }
}
