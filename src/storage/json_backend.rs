use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::{
    errors::{LedgerError, Result},
    ledger::{Transaction, TransactionRecord},
};

use super::{LedgerStore, Loaded};

pub const DEFAULT_DATA_FILE: &str = "transactions.json";
const TMP_SUFFIX: &str = "tmp";

/// Whole-file JSON persistence: one pretty-printed array of records.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<Loaded> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Loaded::Missing),
            Err(source) => {
                return Err(LedgerError::PersistenceRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let records: Vec<TransactionRecord> = serde_json::from_str(&data)?;
        let transactions = records
            .into_iter()
            .map(Transaction::from_record)
            .collect::<Result<Vec<_>>>()?;
        Ok(Loaded::Transactions(transactions))
    }

    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        let records: Vec<TransactionRecord> =
            transactions.iter().map(Transaction::to_record).collect();
        let json = serde_json::to_string_pretty(&records)?;
        let tmp = tmp_path(&self.path);
        let staged = write_atomic(&tmp, &json).and_then(|_| {
            fs::rename(&tmp, &self.path).map_err(|err| {
                let _ = fs::remove_file(&tmp);
                err
            })
        });
        staged.map_err(|source| LedgerError::PersistenceWrite {
            path: self.path.clone(),
            source,
        })
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::dated(5000.0, "Salary", "March pay", "2025-03-01").unwrap(),
            Transaction::dated(-1200.0, "Food", "Groceries", "2025-03-02").unwrap(),
        ]
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(matches!(store.load().unwrap(), Loaded::Missing));
    }

    #[test]
    fn save_then_load_returns_same_sequence() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("transactions.json"));
        store.save(&sample()).unwrap();

        match store.load().unwrap() {
            Loaded::Transactions(loaded) => assert_eq!(loaded, sample()),
            Loaded::Missing => panic!("file should exist after save"),
        }
        assert!(!tmp_path(store.path()).exists(), "staging file is renamed away");
    }

    #[test]
    fn writes_pretty_printed_array_with_two_space_indent() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("transactions.json"));
        store.save(&sample()[..1]).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("[\n  {\n    \"amount\""), "got: {text}");
        assert!(text.contains("\"category\": \"Salary\""));
    }

    #[test]
    fn unparsable_file_surfaces_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.json");
        fs::write(&path, "{ not json").unwrap();
        let err = JsonFileStore::new(path).load().unwrap_err();
        assert!(matches!(err, LedgerError::Parse(_)));
    }

    #[test]
    fn record_without_amount_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.json");
        fs::write(
            &path,
            r#"[{"category": "Food", "description": "x", "date": "2025-01-01"}]"#,
        )
        .unwrap();
        let err = JsonFileStore::new(path).load().unwrap_err();
        assert!(matches!(
            err,
            LedgerError::MalformedRecord { field: "amount" }
        ));
    }

    #[test]
    fn failed_write_keeps_previous_file() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("transactions.json"));
        store.save(&sample()[..1]).unwrap();
        let original = fs::read_to_string(store.path()).unwrap();

        // A directory where the staging file should go makes File::create fail.
        fs::create_dir_all(tmp_path(store.path())).unwrap();
        let err = store.save(&sample()).unwrap_err();
        assert!(matches!(err, LedgerError::PersistenceWrite { .. }));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), original);
    }

    #[test]
    fn failed_rename_removes_staging_file() {
        let dir = tempdir().unwrap();
        // The target is a directory, so renaming the staged file over it fails.
        let target = dir.path().join("transactions.json");
        fs::create_dir_all(target.join("occupied")).unwrap();
        let store = JsonFileStore::new(&target);

        let err = store.save(&sample()).unwrap_err();
        assert!(matches!(err, LedgerError::PersistenceWrite { .. }));
        assert!(!tmp_path(&target).exists());
        assert!(target.is_dir());
    }

    #[test]
    fn tmp_path_appends_suffix_to_extension() {
        assert_eq!(
            tmp_path(Path::new("data/transactions.json")),
            PathBuf::from("data/transactions.json.tmp")
        );
        assert_eq!(tmp_path(Path::new("ledger")), PathBuf::from("ledger.tmp"));
    }
}
