use crate::{
    dto::{CreateSellerRequest, SellerResponse, TransactionResponse, UpdateSellerRequest},
    entities::seller,
    errors::ServiceError,
    services::{
        relationship,
        validation::{SellerDraft, ValidationGate},
    },
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
    TransactionTrait,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Seller lifecycle: create, partial update, cascade delete and the
/// seller-side view of linked transactions.
///
/// Every mutation runs in its own database transaction, so a failed
/// validation or lookup leaves the store untouched.
#[derive(Clone)]
pub struct SellerService {
    db: Arc<DatabaseConnection>,
    gate: Arc<ValidationGate>,
}

impl SellerService {
    pub fn new(db: Arc<DatabaseConnection>, gate: Arc<ValidationGate>) -> Self {
        Self { db, gate }
    }

    /// All sellers ordered by id.
    #[instrument(skip(self))]
    pub async fn list_sellers(&self) -> Result<Vec<SellerResponse>, ServiceError> {
        info!("getting all sellers");
        let sellers = seller::Entity::find()
            .order_by_asc(seller::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(sellers.into_iter().map(SellerResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_seller(&self, id: i32) -> Result<SellerResponse, ServiceError> {
        info!("getting seller");
        let seller = relationship::require_seller(&*self.db, id).await?;
        Ok(seller.into())
    }

    /// Creates a seller. The registration date is the server clock at insert.
    ///
    /// # Errors
    ///
    /// `ValidationFailed` listing every violated field constraint.
    #[instrument(skip(self, request))]
    pub async fn create_seller(
        &self,
        request: CreateSellerRequest,
    ) -> Result<SellerResponse, ServiceError> {
        info!("creating a new seller");

        let draft = SellerDraft {
            name: request.name,
            contact_info: request.contact_info,
        };
        self.gate.check_seller(&draft)?;

        let (Some(name), Some(contact_info)) = (draft.name, draft.contact_info) else {
            return Err(ServiceError::InternalError(
                "validated seller draft is missing fields".to_string(),
            ));
        };

        let txn = self.db.begin().await?;
        let created = seller::ActiveModel {
            name: Set(name),
            contact_info: Set(contact_info),
            registration_date: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        info!(seller_id = created.id, "seller created");
        Ok(created.into())
    }

    /// Applies a partial update. Omitted fields keep their value and the
    /// registration date is never touched.
    ///
    /// # Errors
    ///
    /// `SellerNotFound`, or `ValidationFailed` for the merged result
    /// (including a field explicitly cleared with `null`).
    #[instrument(skip(self, request))]
    pub async fn update_seller(
        &self,
        id: i32,
        request: UpdateSellerRequest,
    ) -> Result<SellerResponse, ServiceError> {
        info!("updating seller");

        let txn = self.db.begin().await?;
        let existing = relationship::require_seller(&txn, id).await?;

        let current = SellerDraft::from(&existing);
        let draft = SellerDraft {
            name: request.name.apply(current.name),
            contact_info: request.contact_info.apply(current.contact_info),
        };
        self.gate.check_seller(&draft)?;

        let mut active = existing.into_active_model();
        if let Some(name) = draft.name {
            active.name = Set(name);
        }
        if let Some(contact_info) = draft.contact_info {
            active.contact_info = Set(contact_info);
        }
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        Ok(updated.into())
    }

    /// Deletes the seller and every transaction linked to it.
    #[instrument(skip(self))]
    pub async fn delete_seller(&self, id: i32) -> Result<(), ServiceError> {
        info!("deleting seller");

        let txn = self.db.begin().await?;
        let existing = relationship::require_seller(&txn, id).await?;
        let removed = relationship::cascade_delete_seller(&txn, existing).await?;
        txn.commit().await?;

        info!(removed_transactions = removed, "seller deleted");
        Ok(())
    }

    /// Transactions currently linked to the seller, ordered by id.
    #[instrument(skip(self))]
    pub async fn get_seller_transactions(
        &self,
        id: i32,
    ) -> Result<Vec<TransactionResponse>, ServiceError> {
        info!("getting seller transactions");
        let seller = relationship::require_seller(&*self.db, id).await?;
        let transactions = relationship::transactions_of(&*self.db, &seller).await?;
        Ok(transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect())
    }
}
