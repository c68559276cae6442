//! Prompting abstraction for the interactive shell
//!
//! The shell talks to a [`Prompter`] rather than to the terminal directly.
//! [`TerminalPrompter`] drives dialoguer widgets when a user is attached;
//! [`LinePrompter`] reads plain lines from any reader, which covers piped
//! stdin and tests.

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use miette::Diagnostic;
use std::io::{self, BufRead, Write};
use thiserror::Error;

use crate::core::product::ValidationError;
use crate::exchange::ImportMode;

#[derive(Debug, Error, Diagnostic)]
pub enum PromptError {
    #[error("input closed")]
    #[diagnostic(code(invtrack::prompt::closed))]
    Closed,

    #[error("failed to read input: {0}")]
    #[diagnostic(code(invtrack::prompt::io))]
    Io(#[from] io::Error),

    #[error("terminal prompt failed: {0}")]
    #[diagnostic(code(invtrack::prompt::dialog))]
    Dialog(#[from] dialoguer::Error),
}

pub type PromptResult<T> = std::result::Result<T, PromptError>;

/// Source of user answers for the shell
pub trait Prompter {
    /// Free text; may be empty
    fn input(&mut self, prompt: &str) -> PromptResult<String>;

    /// Yes/no question; retries until a valid answer is given
    fn confirm(&mut self, prompt: &str) -> PromptResult<bool>;

    /// Pick one of `items`; returns a zero-based index that is always in range
    fn choose(&mut self, prompt: &str, items: &[&str]) -> PromptResult<usize>;

    /// Overwrite or merge; retries until one of the two is chosen
    fn import_mode(&mut self) -> PromptResult<ImportMode> {
        let overwrite = self.confirm("Overwrite current inventory? (Y = overwrite, N = merge)")?;
        Ok(if overwrite {
            ImportMode::Overwrite
        } else {
            ImportMode::Merge
        })
    }
}

/// Prompt until `parse` accepts the answer, printing each rejection
pub fn prompt_valid<P, T, F>(prompter: &mut P, prompt: &str, parse: F) -> PromptResult<T>
where
    P: Prompter + ?Sized,
    F: Fn(&str) -> Result<T, ValidationError>,
{
    loop {
        let raw = prompter.input(prompt)?;
        match parse(&raw) {
            Ok(value) => return Ok(value),
            Err(e) => println!("{} {}. Please try again.", style("✗").red(), e),
        }
    }
}

/// dialoguer-backed prompter for an attended terminal
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> PromptResult<String> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    fn confirm(&mut self, prompt: &str) -> PromptResult<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact()?)
    }

    fn choose(&mut self, prompt: &str, items: &[&str]) -> PromptResult<usize> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?)
    }

    fn import_mode(&mut self) -> PromptResult<ImportMode> {
        let selection = self.choose(
            "Load products into the current inventory",
            &["Overwrite current inventory", "Merge with current inventory"],
        )?;
        Ok(if selection == 0 {
            ImportMode::Overwrite
        } else {
            ImportMode::Merge
        })
    }
}

/// Line-oriented prompter over any reader/writer pair
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn read_line(&mut self) -> PromptResult<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter over the process stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn input(&mut self, prompt: &str) -> PromptResult<String> {
        write!(self.writer, "{}: ", prompt)?;
        self.writer.flush()?;
        self.read_line()
    }

    fn confirm(&mut self, prompt: &str) -> PromptResult<bool> {
        loop {
            write!(self.writer, "{} [y/n]: ", prompt)?;
            self.writer.flush()?;
            let answer = self.read_line()?;
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.writer, "Invalid option. Enter Y or N.")?,
            }
        }
    }

    fn choose(&mut self, prompt: &str, items: &[&str]) -> PromptResult<usize> {
        let max = items.len();
        loop {
            for (i, item) in items.iter().enumerate() {
                writeln!(self.writer, "{}. {}", i + 1, item)?;
            }
            write!(self.writer, "{} (1-{}): ", prompt, max)?;
            self.writer.flush()?;
            let answer = self.read_line()?;
            match answer.trim().parse::<usize>() {
                Ok(n) if (1..=max).contains(&n) => return Ok(n - 1),
                Ok(_) => writeln!(
                    self.writer,
                    "Invalid option. Please select an option between 1 and {}.",
                    max
                )?,
                Err(_) => writeln!(self.writer, "Invalid input. Please enter a number.")?,
            }
        }
    }
}
