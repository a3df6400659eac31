//! Menu-driven command line front end.

pub mod forms;
pub mod io;
pub mod menu;
pub mod output;
pub mod shell;
pub mod views;

use std::env;

use thiserror::Error;

use crate::errors::LedgerError;

pub use shell::{run_cli, Shell};
pub use io::{LineSource, ReadlineInput, ScriptInput};

/// Set to read menu input line by line from stdin instead of a terminal.
pub const SCRIPT_ENV: &str = "POCKET_LEDGER_CLI_SCRIPT";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        if env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}
