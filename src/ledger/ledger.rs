use std::{collections::HashMap, fmt};

use tracing::{debug, error, info, warn};

use crate::{
    errors::{LedgerError, Result},
    storage::{JsonFileStore, LedgerStore, Loaded},
};

use super::transaction::Transaction;

/// What happened when the ledger read its persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No data file yet; starting from an empty ledger.
    Fresh,
    Loaded(usize),
    /// The data could not be used and the ledger was reset to empty.
    Recovered(String),
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStatus::Fresh => f.write_str("No data file found, starting a new ledger"),
            LoadStatus::Loaded(count) => write!(f, "Loaded {count} transactions"),
            LoadStatus::Recovered(reason) => {
                write!(f, "Could not load saved data ({reason}); starting empty")
            }
        }
    }
}

/// Ordered, persisted collection of transactions.
///
/// Insertion order is storage order. Every successful mutation has already
/// written the full sequence through the store when it returns.
pub struct Ledger<S: LedgerStore = JsonFileStore> {
    store: S,
    transactions: Vec<Transaction>,
    load_status: LoadStatus,
}

impl<S: LedgerStore> Ledger<S> {
    /// Loads whatever the store holds. A corrupt or unreadable source resets
    /// the ledger to empty; it never fails.
    pub fn open(store: S) -> Self {
        let (transactions, load_status) = match store.load() {
            Ok(Loaded::Missing) => {
                info!(path = %store.location().display(), "no ledger file, starting fresh");
                (Vec::new(), LoadStatus::Fresh)
            }
            Ok(Loaded::Transactions(transactions)) => {
                info!(
                    path = %store.location().display(),
                    count = transactions.len(),
                    "ledger loaded"
                );
                let count = transactions.len();
                (transactions, LoadStatus::Loaded(count))
            }
            Err(err) => {
                warn!(
                    path = %store.location().display(),
                    error = %err,
                    "ledger data unusable, falling back to an empty ledger"
                );
                (Vec::new(), LoadStatus::Recovered(err.to_string()))
            }
        };
        Self {
            store,
            transactions,
            load_status,
        }
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Writes the full sequence. On failure the in-memory state is left as is.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.transactions).map_err(|err| {
            error!(
                path = %self.store.location().display(),
                error = %err,
                "failed to persist ledger"
            );
            err
        })
    }

    /// Records a transaction dated today and persists the ledger.
    pub fn add(
        &mut self,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<()> {
        let transaction = Transaction::new(amount, category, description)?;
        self.add_transaction(transaction)
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<()> {
        debug!(
            amount = transaction.amount(),
            category = transaction.category(),
            "adding transaction"
        );
        self.transactions.push(transaction);
        self.save()
    }

    /// Removes the transaction at `index` in storage order (not any sorted
    /// display order) and persists the ledger.
    pub fn delete(&mut self, index: usize) -> Result<Transaction> {
        let len = self.transactions.len();
        if index >= len {
            return Err(LedgerError::IndexOutOfRange { index, len });
        }
        let removed = self.transactions.remove(index);
        debug!(index, description = removed.description(), "deleted transaction");
        self.save()?;
        Ok(removed)
    }

    pub fn balance(&self) -> f64 {
        self.transactions.iter().map(Transaction::amount).sum()
    }

    pub fn income_total(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|txn| txn.is_income())
            .map(Transaction::amount)
            .sum()
    }

    pub fn expense_total(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|txn| txn.is_expense())
            .map(Transaction::amount)
            .sum()
    }

    pub fn totals_by_category(&self) -> HashMap<String, f64> {
        let mut totals: HashMap<String, f64> = HashMap::new();
        for txn in &self.transactions {
            *totals.entry(txn.category().to_string()).or_insert(0.0) += txn.amount();
        }
        totals
    }

    pub fn by_category(&self, category: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| txn.category() == category)
            .collect()
    }
}
