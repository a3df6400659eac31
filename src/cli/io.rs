use std::io::{self, BufRead, Write};

use rustyline::{error::ReadlineError, DefaultEditor};

use super::CliError;

/// Source of user input lines for the menu loop.
pub trait LineSource {
    /// Shows `prompt` and returns the next line without its terminator.
    /// `None` means the user is gone: end of input or an interrupt.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CliError>;
}

/// Interactive terminal input with line editing.
pub struct ReadlineInput {
    editor: DefaultEditor,
}

impl ReadlineInput {
    pub fn new() -> Result<Self, CliError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for ReadlineInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Line-by-line input from any reader, used for piped scripts and tests.
pub struct ScriptInput<R> {
    reader: R,
    echo_prompts: bool,
}

impl<R: BufRead> ScriptInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            echo_prompts: true,
        }
    }

    pub fn silent(reader: R) -> Self {
        Self {
            reader,
            echo_prompts: false,
        }
    }
}

impl<R: BufRead> LineSource for ScriptInput<R> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        if self.echo_prompts {
            let mut stdout = io::stdout();
            write!(stdout, "{prompt}")?;
            stdout.flush()?;
        }
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => {
                if self.echo_prompts {
                    println!();
                }
                Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
