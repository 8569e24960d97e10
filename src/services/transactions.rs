use crate::{
    dto::{CreateTransactionRequest, TransactionResponse, UpdateTransactionRequest},
    entities::{transaction, PaymentType},
    errors::ServiceError,
    services::{
        relationship,
        validation::{TransactionDraft, ValidationGate},
    },
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
    TransactionTrait,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Transaction lifecycle. Seller linkage always goes through
/// [`relationship`]; the transaction date is set once at creation.
#[derive(Clone)]
pub struct TransactionService {
    db: Arc<DatabaseConnection>,
    gate: Arc<ValidationGate>,
}

/// Converts free-text input into a payment type.
pub fn parse_payment_type(raw: &str) -> Result<PaymentType, ServiceError> {
    PaymentType::from_str(raw).map_err(|_| {
        warn!(payment_type = raw, "rejected unknown payment type");
        ServiceError::InvalidPaymentType(raw.to_string())
    })
}

impl TransactionService {
    pub fn new(db: Arc<DatabaseConnection>, gate: Arc<ValidationGate>) -> Self {
        Self { db, gate }
    }

    #[instrument(skip(self))]
    pub async fn list_transactions(&self) -> Result<Vec<TransactionResponse>, ServiceError> {
        info!("getting all transactions");
        let transactions = transaction::Entity::find()
            .order_by_asc(transaction::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_transaction(&self, id: i32) -> Result<TransactionResponse, ServiceError> {
        info!("getting transaction");
        let found = relationship::require_transaction(&*self.db, id).await?;
        Ok(found.into())
    }

    /// Creates a transaction linked to `seller_id`.
    ///
    /// Checks run in a fixed order: payment type parse, seller id presence,
    /// seller lookup, then field validation. The first failing check wins.
    ///
    /// # Errors
    ///
    /// `InvalidPaymentType`, `MissingSellerReference`, `SellerNotFound` or
    /// `ValidationFailed`.
    #[instrument(skip(self, request))]
    pub async fn create_transaction(
        &self,
        request: CreateTransactionRequest,
    ) -> Result<TransactionResponse, ServiceError> {
        info!("creating a new transaction");

        let payment_type = request
            .payment_type
            .as_deref()
            .map(parse_payment_type)
            .transpose()?;
        let seller_id = request
            .seller_id
            .ok_or(ServiceError::MissingSellerReference)?;

        let txn = self.db.begin().await?;
        let seller = relationship::require_seller(&txn, seller_id).await?;

        let draft = TransactionDraft {
            seller_id: Some(seller.id),
            amount: request.amount,
            payment_type,
        };
        self.gate.check_transaction(&draft)?;

        let (Some(amount), Some(payment_type)) = (draft.amount, draft.payment_type) else {
            return Err(ServiceError::InternalError(
                "validated transaction draft is missing fields".to_string(),
            ));
        };

        let row = transaction::ActiveModel {
            amount: Set(amount),
            payment_type: Set(payment_type),
            transaction_date: Set(Utc::now()),
            ..Default::default()
        };
        let created = relationship::insert_linked(&txn, &seller, row).await?;
        txn.commit().await?;

        info!(
            transaction_id = created.id,
            seller_id = created.seller_id,
            "transaction created"
        );
        Ok(created.into())
    }

    /// Applies a partial update. A `sellerId` different from the current one
    /// moves the transaction to that seller; the same id or an omitted one
    /// leaves the link alone.
    ///
    /// # Errors
    ///
    /// `TransactionNotFound`, `InvalidPaymentType`, `SellerNotFound` for the
    /// new seller, or `ValidationFailed`.
    #[instrument(skip(self, request))]
    pub async fn update_transaction(
        &self,
        id: i32,
        request: UpdateTransactionRequest,
    ) -> Result<TransactionResponse, ServiceError> {
        info!("updating transaction");

        let txn = self.db.begin().await?;
        let existing = relationship::require_transaction(&txn, id).await?;

        let payment_type = request
            .payment_type
            .try_map(|raw| parse_payment_type(&raw))?;

        let current = TransactionDraft::from(&existing);
        let draft = TransactionDraft {
            seller_id: request.seller_id.apply(current.seller_id),
            amount: request.amount.apply(current.amount),
            payment_type: payment_type.apply(current.payment_type),
        };

        let mut active = match draft.seller_id {
            Some(new_seller_id) if new_seller_id != existing.seller_id => {
                let detached = relationship::unlink(existing);
                let new_seller = relationship::require_seller(&txn, new_seller_id).await?;
                info!(
                    from_seller = detached.previous_seller_id(),
                    to_seller = new_seller.id,
                    "moving transaction to another seller"
                );
                detached.relink(&new_seller)
            }
            _ => existing.into_active_model(),
        };

        self.gate.check_transaction(&draft)?;

        if let Some(amount) = draft.amount {
            active.amount = Set(amount);
        }
        if let Some(payment_type) = draft.payment_type {
            active.payment_type = Set(payment_type);
        }
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        Ok(updated.into())
    }

    /// Unlinks the transaction from its seller and deletes it.
    #[instrument(skip(self))]
    pub async fn delete_transaction(&self, id: i32) -> Result<(), ServiceError> {
        info!("deleting transaction");

        let txn = self.db.begin().await?;
        let existing = relationship::require_transaction(&txn, id).await?;
        relationship::unlink(existing).delete(&txn).await?;
        txn.commit().await?;

        Ok(())
    }
}
