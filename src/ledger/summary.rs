//! Read-only views derived from a transaction sequence for display.

use std::{cmp::Ordering, collections::HashMap};

use super::transaction::Transaction;

/// Newest first, by plain string comparison of the stored dates. Equal dates
/// keep their storage order.
pub fn sorted_by_date_desc(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date().cmp(a.date()));
    sorted
}

/// Category totals ordered by absolute value, largest first. Ties fall back to
/// the category name so the output is stable.
pub fn category_stats(totals: &HashMap<String, f64>) -> Vec<(String, f64)> {
    let mut rows: Vec<(String, f64)> = totals
        .iter()
        .map(|(category, total)| (category.clone(), *total))
        .collect();
    rows.sort_by(|a, b| {
        b.1.abs()
            .partial_cmp(&a.1.abs())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    rows
}
