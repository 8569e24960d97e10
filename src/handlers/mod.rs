pub mod analytics;
pub mod common;
pub mod sellers;
pub mod transactions;

use crate::db::DbPool;
use crate::services::{AnalyticsService, SellerService, TransactionService, ValidationGate};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub sellers: Arc<SellerService>,
    pub transactions: Arc<TransactionService>,
    pub analytics: Arc<AnalyticsService>,
}

impl AppServices {
    /// Builds every service over one pool. The validation gate is created
    /// once here and shared by the services that write.
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        let gate = Arc::new(ValidationGate::new());

        Self {
            sellers: Arc::new(SellerService::new(db_pool.clone(), gate.clone())),
            transactions: Arc::new(TransactionService::new(db_pool.clone(), gate)),
            analytics: Arc::new(AnalyticsService::new(db_pool)),
        }
    }
}
