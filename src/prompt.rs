//! Prompt primitives for the generator wizard.
//!
//! Every prompt reads from an injected `BufRead` so tests can script a whole
//! run. End of input maps to [`Cancelled`], the moral equivalent of the user
//! breaking out of the process mid-question.

use std::fmt;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use colored::Colorize;

/// Marker error raised when stdin closes during a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation cancelled by user")
    }
}

impl std::error::Error for Cancelled {}

pub struct Prompter<R> {
    input: R,
}

impl<R: BufRead> Prompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn read_trimmed(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(Cancelled.into());
        }
        Ok(line.trim().to_string())
    }

    /// Show `prompt [label]: ` and return the trimmed answer, possibly empty.
    pub fn ask(&mut self, prompt: &str, label: &str) -> Result<String> {
        print!("{prompt} [{label}]: ");
        io::stdout().flush()?;
        self.read_trimmed()
    }

    /// Free-text prompt with a bracketed default. Empty input accepts the default.
    pub fn text(&mut self, prompt: &str, default: &str) -> Result<String> {
        let answer = self.ask(prompt, default)?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Strict yes/no prompt. Only y/yes/n/no are accepted, case-insensitively;
    /// empty input is rejected even though the label advertises a default.
    pub fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let label = if default { "Y/n" } else { "y/N" };
        loop {
            let answer = self.ask(prompt, label)?.to_lowercase();
            match answer.as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => println!("{}", "❌ Invalid response. Please enter 'y' or 'n'".red()),
            }
        }
    }
}

/// Block until the user acknowledges with a keypress. EOF counts as an
/// acknowledgement so redirected input never wedges the exit path.
pub fn wait_for_enter() {
    println!("\n{}", "Press [Enter] to exit...".yellow());
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
}
