use crate::error::SessionError;
use core_types::parse_decimal;
use rust_decimal::Decimal;
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Line-oriented prompting over any reader/writer pair.
///
/// Every read blocks until a full line arrives. End of input surfaces as
/// `SessionError::InputClosed` so a menu loop can stop cleanly.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints one line.
    pub fn say(&mut self, text: impl Display) -> Result<(), SessionError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prints `prompt` and reads one line, without its line terminator.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, SessionError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Reads a non-empty line of text, asking again until one is given.
    pub fn text(&mut self, prompt: &str, field: &str) -> Result<String, SessionError> {
        loop {
            let line = self.read_line(prompt)?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
            self.say(format!("Invalid input. Please enter a value for {field}."))?;
        }
    }

    /// Reads a number, asking again until one parses.
    pub fn decimal(&mut self, prompt: &str, field: &str) -> Result<Decimal, SessionError> {
        loop {
            let line = self.read_line(prompt)?;
            match parse_decimal(field, &line) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(error = %e, "Rejected numeric input.");
                    self.say(format!("Invalid input. Please enter a numeric value for {field}."))?;
                }
            }
        }
    }

    /// Lets the user pick one of `options` by its 1-based number. Returns the 0-based index.
    pub fn select(&mut self, heading: &str, options: &[&str]) -> Result<usize, SessionError> {
        self.say(heading)?;
        for (i, option) in options.iter().enumerate() {
            self.say(format!("{}. {option}", i + 1))?;
        }

        loop {
            let line = self.read_line("Enter the number corresponding to the list you want to visualize: ")?;
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                _ => self.say(format!("Please enter a number between 1 and {}.", options.len()))?,
            }
        }
    }
}
