use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// Date layout used for every stored transaction. Listing views sort these
/// strings lexicographically, which only matches chronological order for this
/// layout.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One recorded financial event. Positive amounts are income, negative amounts
/// are expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    amount: f64,
    category: String,
    description: String,
    date: String,
}

impl Transaction {
    /// Creates a transaction dated today (local calendar).
    pub fn new(
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self> {
        Self::dated(amount, category, description, today())
    }

    pub fn dated(
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
    ) -> Result<Self> {
        if !amount.is_finite() {
            return Err(LedgerError::NonFiniteAmount(amount));
        }
        Ok(Self {
            amount,
            category: category.into(),
            description: description.into(),
            date: date.into(),
        })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    pub fn to_record(&self) -> TransactionRecord {
        TransactionRecord {
            amount: Some(self.amount),
            category: Some(self.category.clone()),
            description: Some(self.description.clone()),
            date: Some(self.date.clone()),
        }
    }

    /// Rebuilds a transaction from its persisted shape. Every key is required.
    pub fn from_record(record: TransactionRecord) -> Result<Self> {
        let amount = record
            .amount
            .ok_or(LedgerError::MalformedRecord { field: "amount" })?;
        let category = record
            .category
            .ok_or(LedgerError::MalformedRecord { field: "category" })?;
        let description = record
            .description
            .ok_or(LedgerError::MalformedRecord {
                field: "description",
            })?;
        let date = record
            .date
            .ok_or(LedgerError::MalformedRecord { field: "date" })?;
        Self::dated(amount, category, description, date)
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = LedgerError;

    fn try_from(record: TransactionRecord) -> Result<Self> {
        Transaction::from_record(record)
    }
}

/// Persisted shape of a transaction. Keys are optional on the way in so a
/// missing field surfaces as [`LedgerError::MalformedRecord`] instead of a
/// generic parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn new_assigns_todays_date() {
        let txn = Transaction::new(12.5, "Food", "Lunch").unwrap();
        let parsed = NaiveDate::parse_from_str(txn.date(), DATE_FORMAT);
        assert!(parsed.is_ok(), "date `{}` should be YYYY-MM-DD", txn.date());
        assert_eq!(txn.date().len(), 10);
    }

    #[test]
    fn sign_is_not_validated() {
        assert!(Transaction::new(0.0, "Other", "").is_ok());
        assert!(Transaction::new(-3.0, "Food", "").unwrap().is_expense());
        assert!(Transaction::new(3.0, "Salary", "").unwrap().is_income());
    }

    #[test]
    fn rejects_non_finite_amounts() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Transaction::new(amount, "Food", "x").unwrap_err();
            assert!(matches!(err, LedgerError::NonFiniteAmount(_)));
        }
    }

    #[test]
    fn record_round_trip_preserves_fields() {
        let txn = Transaction::dated(-1200.0, "Food", "Groceries", "2025-03-02").unwrap();
        let restored = Transaction::from_record(txn.to_record()).unwrap();
        assert_eq!(restored, txn);
    }

    #[test]
    fn record_serializes_with_expected_keys() {
        let txn = Transaction::dated(5000.0, "Salary", "March pay", "2025-03-01").unwrap();
        let value = serde_json::to_value(txn.to_record()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, ["amount", "category", "date", "description"]);
        assert_eq!(object["amount"], 5000.0);
        assert_eq!(object["date"], "2025-03-01");
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let record: TransactionRecord = serde_json::from_str(
            r#"{"category": "Food", "description": "", "date": "2025-01-01"}"#,
        )
        .unwrap();
        let err = Transaction::try_from(record).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::MalformedRecord { field: "amount" }
        ));

        let record = TransactionRecord {
            amount: Some(1.0),
            category: Some("Food".into()),
            description: Some(String::new()),
            date: None,
        };
        assert!(matches!(
            Transaction::from_record(record),
            Err(LedgerError::MalformedRecord { field: "date" })
        ));
    }
}
