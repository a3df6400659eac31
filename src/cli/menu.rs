/// Actions offered by the main menu, keyed by the digit the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    AddIncome,
    AddExpense,
    ShowBalance,
    ListTransactions,
    CategoryStats,
    DeleteTransaction,
    Exit,
}

impl MenuCommand {
    /// Display order of the menu. `Exit` is listed last under key `0`.
    pub const ALL: [MenuCommand; 7] = [
        MenuCommand::AddIncome,
        MenuCommand::AddExpense,
        MenuCommand::ShowBalance,
        MenuCommand::ListTransactions,
        MenuCommand::CategoryStats,
        MenuCommand::DeleteTransaction,
        MenuCommand::Exit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MenuCommand::AddIncome => "1",
            MenuCommand::AddExpense => "2",
            MenuCommand::ShowBalance => "3",
            MenuCommand::ListTransactions => "4",
            MenuCommand::CategoryStats => "5",
            MenuCommand::DeleteTransaction => "6",
            MenuCommand::Exit => "0",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::AddIncome => "Add income",
            MenuCommand::AddExpense => "Add expense",
            MenuCommand::ShowBalance => "Show balance",
            MenuCommand::ListTransactions => "Show all transactions",
            MenuCommand::CategoryStats => "Category statistics",
            MenuCommand::DeleteTransaction => "Delete a transaction",
            MenuCommand::Exit => "Exit",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let key = input.trim();
        Self::ALL.into_iter().find(|command| command.key() == key)
    }
}

pub fn render_menu() -> String {
    MenuCommand::ALL
        .iter()
        .map(|command| format!("{}. {}", command.key(), command.label()))
        .collect::<Vec<_>>()
        .join("\n")
}
