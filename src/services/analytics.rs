use crate::{
    dto::{BestDayResponse, SellerResponse},
    entities::{seller, transaction},
    errors::ServiceError,
    services::{
        period::{self, PeriodRange},
        relationship,
    },
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Read-only ranking queries over the transaction set.
///
/// Transactions are range-filtered in the database and aggregated here in
/// `Decimal`, keyed by ordered maps so that ties resolve the same way on
/// every backend: lowest seller id for sums, earliest date for counts.
#[derive(Clone)]
pub struct AnalyticsService {
    db: Arc<DatabaseConnection>,
}

impl AnalyticsService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Seller with the highest summed amount in the period containing
    /// `reference`.
    ///
    /// # Errors
    ///
    /// `InvalidPeriodTag` for an unknown tag, `NoTransactionsInPeriod` with
    /// the resolved bounds when the period is empty.
    #[instrument(skip(self))]
    pub async fn top_seller(
        &self,
        period_tag: &str,
        reference: DateTime<Utc>,
    ) -> Result<SellerResponse, ServiceError> {
        info!("getting top seller");

        let range = period::resolve_tag(period_tag, reference)?;
        let totals = sum_by_seller(&self.transactions_in(range).await?)?;

        let (seller_id, total) = top_by_total(&totals).ok_or(
            ServiceError::NoTransactionsInPeriod {
                start: range.start,
                end: range.end,
            },
        )?;
        info!(seller_id, %total, "top seller resolved");

        let seller = relationship::require_seller(&*self.db, seller_id).await?;
        Ok(seller.into())
    }

    /// Sellers whose summed amount in `[start, end)` is strictly below
    /// `threshold`, ordered by id. Sellers without transactions in the range
    /// never appear.
    #[instrument(skip(self))]
    pub async fn sellers_below_threshold(
        &self,
        threshold: Decimal,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SellerResponse>, ServiceError> {
        info!("getting sellers with sum below threshold");

        let range = PeriodRange::new(start, end);
        if range.is_empty() {
            return Ok(Vec::new());
        }

        let totals = sum_by_seller(&self.transactions_in(range).await?)?;
        let ids: Vec<i32> = totals
            .into_iter()
            .filter(|(_, total)| *total < threshold)
            .map(|(seller_id, _)| seller_id)
            .collect();

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sellers = seller::Entity::find()
            .filter(seller::Column::Id.is_in(ids))
            .order_by_asc(seller::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(sellers.into_iter().map(SellerResponse::from).collect())
    }

    /// The UTC calendar date on which the seller recorded the most
    /// transactions, over all time.
    ///
    /// # Errors
    ///
    /// `SellerNotFound` for an unknown id, `SellerHasNoTransactions` when the
    /// seller exists but has none.
    #[instrument(skip(self))]
    pub async fn best_day(&self, seller_id: i32) -> Result<BestDayResponse, ServiceError> {
        info!("getting best day for seller");

        let seller = relationship::require_seller(&*self.db, seller_id).await?;
        let transactions = relationship::transactions_of(&*self.db, &seller).await?;

        let (best_day, transaction_count) = busiest_day(&count_by_day(&transactions))
            .ok_or(ServiceError::SellerHasNoTransactions(seller_id))?;

        Ok(BestDayResponse {
            best_day,
            transaction_count,
        })
    }

    async fn transactions_in(
        &self,
        range: PeriodRange,
    ) -> Result<Vec<transaction::Model>, ServiceError> {
        Ok(transaction::Entity::find()
            .filter(transaction::Column::TransactionDate.gte(range.start))
            .filter(transaction::Column::TransactionDate.lt(range.end))
            .all(&*self.db)
            .await?)
    }
}

/// Sum of amounts per seller id. Fails with `AmountOverflow` instead of
/// wrapping or panicking when a total leaves the `Decimal` range.
pub fn sum_by_seller(
    transactions: &[transaction::Model],
) -> Result<BTreeMap<i32, Decimal>, ServiceError> {
    let mut totals = BTreeMap::new();
    for t in transactions {
        let total = totals.entry(t.seller_id).or_insert(Decimal::ZERO);
        *total = total.checked_add(t.amount).ok_or_else(|| {
            warn!(seller_id = t.seller_id, "transaction total overflowed");
            ServiceError::AmountOverflow(t.seller_id)
        })?;
    }
    Ok(totals)
}

/// Highest total; the lowest seller id wins a tie.
pub fn top_by_total(totals: &BTreeMap<i32, Decimal>) -> Option<(i32, Decimal)> {
    totals
        .iter()
        .fold(None, |best: Option<(i32, Decimal)>, (&id, &total)| match best {
            Some((_, best_total)) if total <= best_total => best,
            _ => Some((id, total)),
        })
}

/// Number of transactions per UTC calendar date.
pub fn count_by_day(transactions: &[transaction::Model]) -> BTreeMap<NaiveDate, u64> {
    let mut counts = BTreeMap::new();
    for t in transactions {
        *counts.entry(t.transaction_date.date_naive()).or_insert(0) += 1;
    }
    counts
}

/// Highest count; the earliest date wins a tie.
pub fn busiest_day(counts: &BTreeMap<NaiveDate, u64>) -> Option<(NaiveDate, u64)> {
    counts
        .iter()
        .fold(None, |best: Option<(NaiveDate, u64)>, (&day, &count)| match best {
            Some((_, best_count)) if count <= best_count => best,
            _ => Some((day, count)),
        })
}
