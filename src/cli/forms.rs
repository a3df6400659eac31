//! Prompt flows for collecting a new entry from the user.

use std::fmt;

use thiserror::Error;

use super::{io::LineSource, output, CliError};

pub const FALLBACK_CATEGORY: &str = "Other";

const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investment", FALLBACK_CATEGORY];
const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Entertainment",
    "Health",
    "Education",
    FALLBACK_CATEGORY,
];

/// Presentation-level input problems. These never reach the ledger.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("`{0}` is not a valid amount")]
    InvalidAmount(String),
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            EntryKind::Income => INCOME_CATEGORIES,
            EntryKind::Expense => EXPENSE_CATEGORIES,
        }
    }

    /// Expenses are stored as negative amounts.
    pub fn signed(self, amount: f64) -> f64 {
        match self {
            EntryKind::Income => amount,
            EntryKind::Expense => -amount,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        })
    }
}

/// A fully collected entry, amount already signed.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryForm {
    pub amount: f64,
    pub category: String,
    pub description: String,
}

/// Parses a user-entered amount. Only finite, strictly positive numbers pass.
pub fn parse_amount(input: &str) -> Result<f64, InputError> {
    let trimmed = input.trim();
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| InputError::InvalidAmount(trimmed.to_string()))?;
    if !amount.is_finite() {
        return Err(InputError::InvalidAmount(trimmed.to_string()));
    }
    if amount <= 0.0 {
        return Err(InputError::NonPositiveAmount);
    }
    Ok(amount)
}

/// Parses a whole number such as a menu position.
pub fn parse_number(input: &str) -> Result<i64, InputError> {
    let trimmed = input.trim();
    trimmed
        .parse()
        .map_err(|_| InputError::InvalidNumber(trimmed.to_string()))
}

/// Maps a category answer to a label: a list number picks from the suggestions,
/// other text is taken verbatim, and anything unusable becomes `Other`.
pub fn resolve_category(kind: EntryKind, input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return FALLBACK_CATEGORY.to_string();
    }
    if let Ok(choice) = trimmed.parse::<usize>() {
        return choice
            .checked_sub(1)
            .and_then(|idx| kind.categories().get(idx))
            .copied()
            .unwrap_or(FALLBACK_CATEGORY)
            .to_string();
    }
    if trimmed.parse::<f64>().is_ok() {
        return FALLBACK_CATEGORY.to_string();
    }
    trimmed.to_string()
}

pub fn category_menu(kind: EntryKind) -> String {
    let mut text = format!("{kind} categories:\n");
    for (idx, name) in kind.categories().iter().enumerate() {
        text.push_str(&format!("{}. {}\n", idx + 1, name));
    }
    text
}

/// Collects amount, category and description. Bad amounts are reported and
/// asked for again. Returns `None` if input ends part way.
pub fn collect_entry(
    input: &mut dyn LineSource,
    kind: EntryKind,
) -> Result<Option<EntryForm>, CliError> {
    let amount = loop {
        let Some(raw) = input.read_line("Amount: ")? else {
            return Ok(None);
        };
        match parse_amount(&raw) {
            Ok(amount) => break amount,
            Err(err) => output::error(err),
        }
    };

    output::plain(category_menu(kind));
    let prompt = format!("Choose a category (1-{}): ", kind.categories().len());
    let Some(choice) = input.read_line(&prompt)? else {
        return Ok(None);
    };
    let category = resolve_category(kind, &choice);

    let Some(description) = input.read_line("Description: ")? else {
        return Ok(None);
    };

    Ok(Some(EntryForm {
        amount: kind.signed(amount),
        category,
        description,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::io::ScriptInput;
    use std::io::Cursor;

    #[test]
    fn amounts_must_be_positive_finite_numbers() {
        assert_eq!(parse_amount(" 12.50 "), Ok(12.5));
        assert_eq!(parse_amount("0"), Err(InputError::NonPositiveAmount));
        assert_eq!(parse_amount("-4"), Err(InputError::NonPositiveAmount));
        assert!(matches!(parse_amount("abc"), Err(InputError::InvalidAmount(_))));
        assert!(matches!(parse_amount("inf"), Err(InputError::InvalidAmount(_))));
        assert!(matches!(parse_amount("NaN"), Err(InputError::InvalidAmount(_))));
    }

    #[test]
    fn category_numbers_pick_from_the_list() {
        assert_eq!(resolve_category(EntryKind::Income, "1"), "Salary");
        assert_eq!(resolve_category(EntryKind::Expense, "5"), "Education");
        assert_eq!(resolve_category(EntryKind::Expense, " 2 "), "Transport");
    }

    #[test]
    fn unusable_category_answers_fall_back_to_other() {
        assert_eq!(resolve_category(EntryKind::Income, "9"), "Other");
        assert_eq!(resolve_category(EntryKind::Income, "0"), "Other");
        assert_eq!(resolve_category(EntryKind::Income, "-1"), "Other");
        assert_eq!(resolve_category(EntryKind::Income, ""), "Other");
    }

    #[test]
    fn free_text_becomes_the_category() {
        assert_eq!(resolve_category(EntryKind::Expense, " Rent "), "Rent");
    }

    #[test]
    fn expense_entries_are_negated() {
        let mut input = ScriptInput::silent(Cursor::new("oops\n-3\n1200\n1\nGroceries\n"));
        let entry = collect_entry(&mut input, EntryKind::Expense)
            .unwrap()
            .unwrap();
        assert_eq!(
            entry,
            EntryForm {
                amount: -1200.0,
                category: "Food".into(),
                description: "Groceries".into(),
            }
        );
    }

    #[test]
    fn description_is_kept_as_typed() {
        let mut input = ScriptInput::silent(Cursor::new("50\n1\n  bonus, March  \r\n"));
        let entry = collect_entry(&mut input, EntryKind::Income)
            .unwrap()
            .unwrap();
        assert_eq!(entry.description, "  bonus, March  ");
    }

    #[test]
    fn entry_is_abandoned_when_input_ends() {
        let mut input = ScriptInput::silent(Cursor::new("100\n"));
        assert_eq!(collect_entry(&mut input, EntryKind::Income).unwrap(), None);
    }

    #[test]
    fn category_menu_lists_numbered_choices() {
        let menu = category_menu(EntryKind::Income);
        assert!(menu.starts_with("Income categories:"));
        assert!(menu.contains("3. Investment"));
    }
}
