pub mod json_backend;

use std::path::Path;

use crate::{errors::Result, ledger::Transaction};

/// Outcome of reading persisted transactions.
#[derive(Debug)]
pub enum Loaded {
    /// Nothing has been persisted yet.
    Missing,
    Transactions(Vec<Transaction>),
}

/// Abstraction over persistence backends holding the full transaction sequence.
///
/// Every call moves the whole sequence; there is no incremental write.
pub trait LedgerStore {
    fn load(&self) -> Result<Loaded>;
    fn save(&self, transactions: &[Transaction]) -> Result<()>;
    fn location(&self) -> &Path;
}

pub use json_backend::JsonFileStore;
