mod budget;
mod category;
mod transaction;

pub use budget::Budget;
pub use category::{Category, FALLBACK_COLOR, FALLBACK_ICON, UNKNOWN_CATEGORY};
pub use transaction::{parse_date, Transaction, TransactionDraft, TransactionType, DATE_FORMAT};
