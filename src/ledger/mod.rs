//! Ledger domain model, persistence-facing record shape, and derived views.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod summary;
pub mod transaction;

pub use ledger::{Ledger, LoadStatus};
pub use summary::{category_stats, sorted_by_date_desc};
pub use transaction::{Transaction, TransactionRecord, DATE_FORMAT};
