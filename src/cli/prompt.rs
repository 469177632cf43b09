use anyhow::{Context, Result};
use crossterm::style::{style, Color, Stylize};
use std::io::{BufRead, Write};

use crate::domain::{parse_cents, AccountId, Cents, Gender};

/// ANSI coloring for session output. Disabled output is plain text.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Line-oriented operator I/O with re-prompting on invalid input.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    palette: Palette,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, palette: Palette) -> Self {
        Self {
            input,
            output,
            palette,
        }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_writer(self) -> W {
        self.output
    }

    /// Print one line in the given color.
    pub fn say(&mut self, color: Color, text: &str) -> Result<()> {
        writeln!(self.output, "{}", self.palette.paint(text, color))
            .context("Failed to write output")
    }

    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.output).context("Failed to write output")
    }

    /// Show `message` and read one line. `None` once input is exhausted.
    pub fn read_line(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{} {} ", self.palette.paint("→", Color::Magenta), message)
            .context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompt until `parse` accepts the answer. `None` once input is exhausted.
    pub fn ask<T>(
        &mut self,
        message: &str,
        parse: impl Fn(&str) -> Result<T, &'static str>,
    ) -> Result<Option<T>> {
        while let Some(line) = self.read_line(message)? {
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(problem) => self.say(Color::Red, &format!(">> {}", problem))?,
            }
        }
        Ok(None)
    }
}

pub fn parse_name(input: &str) -> Result<String, &'static str> {
    let name = input.trim();
    if name.is_empty() {
        return Err("Name cannot be empty.");
    }
    Ok(name.to_string())
}

pub fn parse_age(input: &str) -> Result<u32, &'static str> {
    match input.trim().parse::<u32>() {
        Ok(age) if age > 0 => Ok(age),
        _ => Err("Please enter a valid age (greater than zero)."),
    }
}

pub fn parse_gender(input: &str) -> Result<Gender, &'static str> {
    match input.trim() {
        "1" => Ok(Gender::Male),
        "2" => Ok(Gender::Female),
        other => other
            .parse()
            .map_err(|_| "Please select a gender: Male or Female."),
    }
}

pub fn parse_phone(input: &str) -> Result<u64, &'static str> {
    let digits = input.trim();
    let digits = digits.strip_prefix('+').unwrap_or(digits);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err("Please enter a valid phone number.");
    }
    digits.parse().map_err(|_| "Please enter a valid phone number.")
}

pub fn parse_account_number(input: &str) -> Result<AccountId, &'static str> {
    input
        .trim()
        .parse()
        .map_err(|_| "Please enter a valid account number.")
}

pub fn parse_amount(input: &str) -> Result<Cents, &'static str> {
    match parse_cents(input) {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err("Please enter a valid amount (greater than zero)."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_reprompts_until_valid() {
        let input = b"\n  \nBob\n".as_slice();
        let mut prompter = Prompter::new(input, Vec::new(), Palette::plain());

        let name = prompter.ask("Enter your name:", parse_name).unwrap();
        assert_eq!(name.as_deref(), Some("Bob"));

        let out = String::from_utf8(prompter.into_writer()).unwrap();
        assert_eq!(out.matches("→ Enter your name:").count(), 3);
        assert_eq!(out.matches(">> Name cannot be empty.").count(), 2);
    }

    #[test]
    fn test_ask_returns_none_at_end_of_input() {
        let mut prompter = Prompter::new(b"abc\n".as_slice(), Vec::new(), Palette::plain());
        assert_eq!(prompter.ask("Enter your age:", parse_age).unwrap(), None);
    }

    #[test]
    fn test_palette_disabled_is_plain() {
        assert_eq!(Palette::plain().paint("hi", Color::Red), "hi");
    }

    #[test]
    fn test_field_parsers() {
        assert_eq!(parse_age("30"), Ok(30));
        assert!(parse_age("0").is_err());
        assert!(parse_age("-3").is_err());
        assert!(parse_age("old").is_err());

        assert_eq!(parse_gender("1"), Ok(Gender::Male));
        assert_eq!(parse_gender("female"), Ok(Gender::Female));
        assert!(parse_gender("3").is_err());

        assert_eq!(parse_phone("5551234"), Ok(5551234));
        assert_eq!(parse_phone("+15551234"), Ok(15551234));
        assert!(parse_phone("").is_err());
        assert!(parse_phone("555-1234").is_err());

        assert_eq!(parse_account_number(" 1000 "), Ok(1000));
        assert!(parse_account_number("").is_err());

        assert_eq!(parse_amount("250"), Ok(25_000));
        assert_eq!(parse_amount("0.01"), Ok(1));
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("NaN").is_err());
    }
}
