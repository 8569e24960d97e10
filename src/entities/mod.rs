pub mod seller;
pub mod transaction;

pub use seller::Entity as Seller;
pub use transaction::{Entity as Transaction, PaymentType};
