//! Request and response shapes. Field names are camelCase on the wire.

pub mod analytics;
pub mod patch;
pub mod seller;
pub mod transaction;

pub use analytics::{BestDayResponse, SellersBelowThresholdQuery, TopSellerQuery};
pub use patch::Patch;
pub use seller::{CreateSellerRequest, SellerResponse, UpdateSellerRequest};
pub use transaction::{CreateTransactionRequest, TransactionResponse, UpdateTransactionRequest};
