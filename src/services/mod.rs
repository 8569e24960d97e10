pub mod analytics;
pub mod period;
pub mod relationship;
pub mod sellers;
pub mod transactions;
pub mod validation;

pub use analytics::AnalyticsService;
pub use period::{PeriodRange, PeriodType};
pub use sellers::SellerService;
pub use transactions::TransactionService;
pub use validation::ValidationGate;
