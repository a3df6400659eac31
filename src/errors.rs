use std::{io, path::PathBuf};

use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("malformed record: missing required field `{field}`")]
    MalformedRecord { field: &'static str },
    #[error("unparsable ledger data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read `{}`: {source}", .path.display())]
    PersistenceRead { path: PathBuf, source: io::Error },
    #[error("failed to write `{}`: {source}", .path.display())]
    PersistenceWrite { path: PathBuf, source: io::Error },
    #[error("transaction index {index} is out of range (ledger holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("amount must be a finite number, got {0}")]
    NonFiniteAmount(f64),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
