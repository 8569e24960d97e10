//! Seller/transaction link maintenance.
//!
//! The `seller_id` foreign key is the only place the link is stored, so a
//! seller's transaction set and a transaction's seller reference can never
//! disagree. This module is the only code that writes that column. A
//! transaction released from its seller becomes a [`Detached`] value, which
//! can only be relinked to a seller or deleted, so no code path can persist
//! a transaction without an owner.

use crate::entities::{seller, transaction};
use crate::errors::ServiceError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, instrument};

/// Points `transaction` at `seller`.
pub fn link(seller: &seller::Model, transaction: &mut transaction::ActiveModel) {
    transaction.seller_id = Set(seller.id);
}

/// Releases `transaction` from its seller.
pub fn unlink(transaction: transaction::Model) -> Detached {
    Detached {
        previous_seller_id: transaction.seller_id,
        transaction,
    }
}

/// A transaction with no current owner. Must be relinked or deleted.
#[derive(Debug)]
#[must_use = "a detached transaction must be relinked or deleted"]
pub struct Detached {
    transaction: transaction::Model,
    previous_seller_id: i32,
}

impl Detached {
    pub fn previous_seller_id(&self) -> i32 {
        self.previous_seller_id
    }

    /// Links the transaction to `seller`, returning the row ready to be saved.
    pub fn relink(self, seller: &seller::Model) -> transaction::ActiveModel {
        let mut active: transaction::ActiveModel = self.transaction.into();
        link(seller, &mut active);
        active
    }

    /// Removes the transaction from the store.
    pub async fn delete<C: ConnectionTrait>(self, db: &C) -> Result<(), ServiceError> {
        let id = self.transaction.id;
        transaction::Entity::delete_by_id(id).exec(db).await?;
        debug!(
            transaction_id = id,
            seller_id = self.previous_seller_id,
            "removed detached transaction"
        );
        Ok(())
    }
}

/// Loads a seller or fails with `SellerNotFound`.
pub async fn require_seller<C: ConnectionTrait>(
    db: &C,
    seller_id: i32,
) -> Result<seller::Model, ServiceError> {
    seller::Entity::find_by_id(seller_id)
        .one(db)
        .await?
        .ok_or(ServiceError::SellerNotFound(seller_id))
}

/// Loads a transaction or fails with `TransactionNotFound`.
pub async fn require_transaction<C: ConnectionTrait>(
    db: &C,
    transaction_id: i32,
) -> Result<transaction::Model, ServiceError> {
    transaction::Entity::find_by_id(transaction_id)
        .one(db)
        .await?
        .ok_or(ServiceError::TransactionNotFound(transaction_id))
}

/// The transactions currently linked to `seller`, ordered by id.
pub async fn transactions_of<C: ConnectionTrait>(
    db: &C,
    seller: &seller::Model,
) -> Result<Vec<transaction::Model>, ServiceError> {
    Ok(seller
        .find_related(transaction::Entity)
        .order_by_asc(transaction::Column::Id)
        .all(db)
        .await?)
}

/// Deletes `seller` together with every linked transaction. Returns the
/// number of transactions removed. Callers run this inside a database
/// transaction so both deletes commit together.
#[instrument(skip(db, seller), fields(seller_id = seller.id))]
pub async fn cascade_delete_seller<C: ConnectionTrait>(
    db: &C,
    seller: seller::Model,
) -> Result<u64, ServiceError> {
    let removed = transaction::Entity::delete_many()
        .filter(transaction::Column::SellerId.eq(seller.id))
        .exec(db)
        .await?
        .rows_affected;

    seller.delete(db).await?;

    debug!(removed_transactions = removed, "seller deleted with its transactions");
    Ok(removed)
}

/// Inserts a new transaction row owned by `seller`.
pub async fn insert_linked<C: ConnectionTrait>(
    db: &C,
    seller: &seller::Model,
    mut row: transaction::ActiveModel,
) -> Result<transaction::Model, ServiceError> {
    link(seller, &mut row);
    Ok(row.insert(db).await?)
}
