use std::io;

use tracing::debug;

use crate::{
    config::{Config, ConfigManager},
    errors::LedgerError,
    ledger::{Ledger, LoadStatus},
    storage::{JsonFileStore, LedgerStore},
};

use super::{
    forms::{self, parse_number, EntryKind},
    io::{LineSource, ReadlineInput, ScriptInput},
    menu::{render_menu, MenuCommand},
    output, views, CliError, CliMode, LoopControl,
};

const MENU_PROMPT: &str = "Choose an action: ";
const PAUSE_PROMPT: &str = "Press Enter to continue...";
const DELETE_PROMPT: &str = "Number of the transaction to delete (0 to cancel): ";

pub fn run_cli() -> Result<(), CliError> {
    let mode = CliMode::from_env();
    if mode == CliMode::Script {
        colored::control::set_override(false);
    }

    let manager = ConfigManager::new();
    if !manager.path().exists() {
        if let Err(err) = manager.save(&Config::default()) {
            output::warning(format!("Could not write default settings: {err}"));
        }
    }
    let config = match manager.load() {
        Ok(config) => config,
        Err(err) => {
            output::warning(format!("{err}; using default settings"));
            Config::default()
        }
    };
    debug!(data_file = %config.data_file.display(), ?mode, "starting shell");
    let ledger = Ledger::open(JsonFileStore::new(config.data_file.clone()));

    match mode {
        CliMode::Interactive => Shell::new(ledger, config, ReadlineInput::new()?, mode).run(),
        CliMode::Script => {
            let input = ScriptInput::new(io::stdin().lock());
            Shell::new(ledger, config, input, mode).run()
        }
    }
}

/// The menu loop. Owns the single ledger instance for the process run.
pub struct Shell<S: LedgerStore, I: LineSource> {
    ledger: Ledger<S>,
    config: Config,
    input: I,
    mode: CliMode,
}

impl<S: LedgerStore, I: LineSource> Shell<S, I> {
    pub fn new(ledger: Ledger<S>, config: Config, input: I, mode: CliMode) -> Self {
        Self {
            ledger,
            config,
            input,
            mode,
        }
    }

    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    pub fn run(&mut self) -> Result<(), CliError> {
        self.report_load_status();
        loop {
            output::section("Pocket Ledger");
            output::plain(render_menu());
            let Some(line) = self.input.read_line(MENU_PROMPT)? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            if self.handle_line(&line)? == LoopControl::Exit {
                break;
            }
            if self.should_pause() && self.input.read_line(PAUSE_PROMPT)?.is_none() {
                break;
            }
        }
        output::plain("Goodbye!");
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<LoopControl, CliError> {
        match MenuCommand::parse(line) {
            Some(command) => self.dispatch(command),
            None => {
                output::error(format!("Unknown choice `{}`, try again", line.trim()));
                Ok(LoopControl::Continue)
            }
        }
    }

    pub fn dispatch(&mut self, command: MenuCommand) -> Result<LoopControl, CliError> {
        debug!(?command, "menu command");
        match command {
            MenuCommand::AddIncome => self.add_entry(EntryKind::Income),
            MenuCommand::AddExpense => self.add_entry(EntryKind::Expense),
            MenuCommand::ShowBalance => {
                output::section("Current balance");
                output::plain(views::balance(&self.ledger, self.currency()));
                Ok(LoopControl::Continue)
            }
            MenuCommand::ListTransactions => {
                output::section("All transactions");
                output::plain(views::transaction_list(
                    self.ledger.transactions(),
                    self.currency(),
                ));
                Ok(LoopControl::Continue)
            }
            MenuCommand::CategoryStats => {
                output::section("Category statistics");
                output::plain(views::category_table(&self.ledger, self.currency()));
                Ok(LoopControl::Continue)
            }
            MenuCommand::DeleteTransaction => self.delete_transaction(),
            MenuCommand::Exit => Ok(LoopControl::Exit),
        }
    }

    fn add_entry(&mut self, kind: EntryKind) -> Result<LoopControl, CliError> {
        output::section(format!("Add {}", kind.to_string().to_lowercase()));
        let Some(entry) = forms::collect_entry(&mut self.input, kind)? else {
            return Ok(LoopControl::Exit);
        };
        let amount = views::format_amount(entry.amount, self.currency());
        let category = entry.category.clone();
        match self.ledger.add(entry.amount, entry.category, entry.description) {
            Ok(()) => output::success(format!("{kind} added: {amount} ({category})")),
            Err(err @ LedgerError::PersistenceWrite { .. }) => {
                output::error(format!("{kind} recorded but not saved: {err}"))
            }
            Err(err) => output::error(format!("Could not add transaction: {err}")),
        }
        Ok(LoopControl::Continue)
    }

    fn delete_transaction(&mut self) -> Result<LoopControl, CliError> {
        output::section("Delete a transaction");
        if self.ledger.is_empty() {
            output::info(views::EMPTY_LEDGER);
            return Ok(LoopControl::Continue);
        }
        output::plain(views::deletion_list(
            self.ledger.transactions(),
            self.currency(),
        ));

        let Some(raw) = self.input.read_line(DELETE_PROMPT)? else {
            return Ok(LoopControl::Exit);
        };
        let choice = match parse_number(&raw) {
            Ok(choice) => choice,
            Err(err) => {
                output::error(err);
                return Ok(LoopControl::Continue);
            }
        };
        if choice == 0 {
            output::info("Deletion cancelled");
            return Ok(LoopControl::Continue);
        }
        let Some(index) = choice
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
        else {
            output::error(format!("Could not delete: no transaction number {choice}"));
            return Ok(LoopControl::Continue);
        };
        match self.ledger.delete(index) {
            Ok(removed) => output::success(format!("Deleted: {}", removed.description())),
            Err(err @ LedgerError::PersistenceWrite { .. }) => {
                output::error(format!("Deleted but not saved: {err}"))
            }
            Err(err) => output::error(format!("Could not delete: {err}")),
        }
        Ok(LoopControl::Continue)
    }

    fn report_load_status(&self) {
        let status = self.ledger.load_status();
        match status {
            LoadStatus::Recovered(_) => output::warning(status),
            LoadStatus::Fresh | LoadStatus::Loaded(_) => output::info(status),
        }
    }

    fn should_pause(&self) -> bool {
        self.mode == CliMode::Interactive && self.config.pause_after_action
    }

    fn currency(&self) -> &str {
        &self.config.currency_label
    }
}
