use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use thiserror::Error;

/// Input ended before a question was answered.
#[derive(Debug, Error)]
#[error("input closed")]
pub struct InputClosed;

// ---------------------------------------------------------------------------
// Prompter – line-oriented questions over any reader/writer pair
// ---------------------------------------------------------------------------

/// Asks questions on `output` and reads answers from `input`.
///
/// Every `ask*` method fails with [`InputClosed`] once `input` is exhausted.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}").context("writing to terminal")
    }

    /// Print `question` without a newline and read the trimmed answer.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}").context("writing to terminal")?;
        self.output.flush().context("flushing terminal")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("reading from terminal")?;
        if read == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim().to_string())
    }

    /// Ask until the answer is a whole number greater than zero.
    pub fn ask_positive(&mut self, question: &str) -> Result<usize> {
        loop {
            match self.ask(question)?.parse::<usize>() {
                Ok(n) if n > 0 => return Ok(n),
                Ok(_) => self.say("Please enter a positive number")?,
                Err(_) => self.say("Please enter a valid number")?,
            }
        }
    }

    /// `y`/`Y` means yes; anything else means no.
    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        Ok(self.ask(question)?.eq_ignore_ascii_case("y"))
    }

    /// Print a numbered list of `headers` and ask until a valid number is
    /// entered. Returns the chosen name.
    pub fn choose_column(&mut self, headers: &[String]) -> Result<String> {
        self.list_columns(headers)?;
        loop {
            match self.ask("\nEnter column number: ")?.parse::<usize>() {
                Ok(n) if (1..=headers.len()).contains(&n) => return Ok(headers[n - 1].clone()),
                Ok(_) => self.say("Invalid column number. Please try again.")?,
                Err(_) => self.say("Please enter a valid number.")?,
            }
        }
    }

    pub fn list_columns(&mut self, headers: &[String]) -> Result<()> {
        self.say("\nAvailable columns:")?;
        for (idx, column) in headers.iter().enumerate() {
            self.say(format_args!("{}. {column}", idx + 1))?;
        }
        Ok(())
    }

    /// Hand back the output sink.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
