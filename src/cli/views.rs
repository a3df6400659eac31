//! Plain-text renderings of ledger views.

use crate::{
    ledger::{category_stats, sorted_by_date_desc, Ledger, Transaction},
    storage::LedgerStore,
};

pub const EMPTY_LEDGER: &str = "No transactions yet";
const SEPARATOR_WIDTH: usize = 40;

/// Two decimals with an explicit `+` on positive values.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let sign = if amount > 0.0 { "+" } else { "" };
    format!("{sign}{amount:.2} {currency}")
}

pub fn balance<S: LedgerStore>(ledger: &Ledger<S>, currency: &str) -> String {
    format!(
        "Balance:  {:.2} {currency}\nIncome:   {:.2} {currency}\nExpenses: {:.2} {currency}",
        ledger.balance(),
        ledger.income_total(),
        ledger.expense_total(),
    )
}

/// Newest first. The numbers shown here are display positions only.
pub fn transaction_list(transactions: &[Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return EMPTY_LEDGER.to_string();
    }
    sorted_by_date_desc(transactions)
        .into_iter()
        .enumerate()
        .map(|(idx, txn)| {
            format!(
                "{}. [{}] {}: {}\n   {}",
                idx + 1,
                txn.date(),
                txn.category(),
                txn.description(),
                format_amount(txn.amount(), currency)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn category_table<S: LedgerStore>(ledger: &Ledger<S>, currency: &str) -> String {
    if ledger.is_empty() {
        return EMPTY_LEDGER.to_string();
    }
    let mut lines = vec![
        format!("{:<20} | Amount", "Category"),
        "-".repeat(SEPARATOR_WIDTH),
    ];
    for (category, total) in category_stats(&ledger.totals_by_category()) {
        lines.push(format!(
            "{:<20} | {}",
            category,
            format_amount(total, currency)
        ));
    }
    lines.join("\n")
}

/// Storage order, numbered from 1, matching the positions `delete` acts on.
pub fn deletion_list(transactions: &[Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return EMPTY_LEDGER.to_string();
    }
    transactions
        .iter()
        .enumerate()
        .map(|(idx, txn)| {
            format!(
                "{}. [{}] {}: {} - {}",
                idx + 1,
                txn.date(),
                txn.category(),
                txn.description(),
                format_amount(txn.amount(), currency)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
