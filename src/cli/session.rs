use anyhow::Result;
use crossterm::style::Color;
use std::io::{BufRead, Write};
use tracing::debug;

use crate::application::{BankError, BankService};
use crate::domain::{format_currency, AccountId, AccountStatus, Cents};
use crate::io::Exporter;

use super::prompt::{
    parse_account_number, parse_age, parse_amount, parse_gender, parse_name, parse_phone,
    Prompter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateAccount,
    Credit,
    Withdraw,
    Status,
    Balance,
    List,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::CreateAccount,
        MenuChoice::Credit,
        MenuChoice::Withdraw,
        MenuChoice::Status,
        MenuChoice::Balance,
        MenuChoice::List,
        MenuChoice::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::CreateAccount => "Create Account",
            MenuChoice::Credit => "Credit Money",
            MenuChoice::Withdraw => "Withdraw Money",
            MenuChoice::Status => "View Account Status",
            MenuChoice::Balance => "View Balance",
            MenuChoice::List => "List Accounts",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Accepts the 1-based menu number or the label, ignoring case.
    pub fn parse(input: &str) -> Result<Self, &'static str> {
        let input = input.trim();
        if let Ok(n) = input.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or("Please choose one of the listed options.");
        }
        Self::ALL
            .into_iter()
            .find(|choice| choice.label().eq_ignore_ascii_case(input))
            .ok_or("Please choose one of the listed options.")
    }
}

/// Output format for the account listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    Table,
    Json,
    Csv,
}

impl ListFormat {
    /// Empty input selects the table.
    pub fn parse(input: &str) -> Result<Self, &'static str> {
        match input.trim().to_lowercase().as_str() {
            "" | "table" => Ok(ListFormat::Table),
            "json" => Ok(ListFormat::Json),
            "csv" => Ok(ListFormat::Csv),
            _ => Err("Format must be one of: table, json, csv."),
        }
    }
}

enum Flow {
    Continue,
    Stop,
}

/// One interactive run of the bank: menu loop until Exit or end of input.
pub struct Session<R, W> {
    bank: BankService,
    prompter: Prompter<R, W>,
    bank_name: String,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(bank: BankService, prompter: Prompter<R, W>, bank_name: impl Into<String>) -> Self {
        Self {
            bank,
            prompter,
            bank_name: bank_name.into(),
        }
    }

    pub fn into_parts(self) -> (BankService, W) {
        (self.bank, self.prompter.into_writer())
    }

    pub fn run(&mut self) -> Result<()> {
        self.prompter.blank()?;
        self.prompter
            .say(Color::Cyan, &format!("Welcome To The {}:", self.bank_name))?;
        self.prompter.say(Color::Cyan, &"-".repeat(50))?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.prompter.ask("Choose an option:", MenuChoice::parse)? else {
                debug!("input exhausted, ending session");
                break;
            };
            debug!(choice = choice.label(), "menu choice");

            let flow = match choice {
                MenuChoice::CreateAccount => self.create_account()?,
                MenuChoice::Credit => self.credit()?,
                MenuChoice::Withdraw => self.withdraw()?,
                MenuChoice::Status => self.show_status()?,
                MenuChoice::Balance => self.show_balance()?,
                MenuChoice::List => self.list_accounts()?,
                MenuChoice::Exit => {
                    self.prompter.blank()?;
                    self.prompter.say(Color::Red, "Exiting...")?;
                    Flow::Stop
                }
            };
            if let Flow::Stop = flow {
                break;
            }
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        self.prompter.blank()?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            self.prompter
                .say(Color::Reset, &format!("  {}) {}", i + 1, choice.label()))?;
        }
        Ok(())
    }

    fn create_account(&mut self) -> Result<Flow> {
        let Some(name) = self.prompter.ask("Enter your name:", parse_name)? else {
            return Ok(Flow::Stop);
        };
        let Some(age) = self.prompter.ask("Enter your age:", parse_age)? else {
            return Ok(Flow::Stop);
        };
        let Some(gender) = self
            .prompter
            .ask("Select your gender (1) Male (2) Female:", parse_gender)?
        else {
            return Ok(Flow::Stop);
        };
        let Some(phone) = self.prompter.ask("Enter your Phone #:", parse_phone)? else {
            return Ok(Flow::Stop);
        };

        let status = self.bank.create_account(name, age, gender, phone);
        self.prompter.blank()?;
        self.prompter.say(Color::Green, "Account created successfully!")?;
        self.print_status(&status)?;
        Ok(Flow::Continue)
    }

    fn credit(&mut self) -> Result<Flow> {
        let Some((id, amount)) = self.ask_movement()? else {
            return Ok(Flow::Stop);
        };
        self.prompter.blank()?;
        match self.bank.credit(id, amount) {
            Ok(movement) => {
                self.prompter.say(
                    Color::Green,
                    &format!(
                        "{} credited successfully to {}",
                        format_currency(movement.amount),
                        movement.account_name
                    ),
                )?;
                self.prompter.say(
                    Color::Blue,
                    &format!("Remaining Balance: {}", format_currency(movement.balance)),
                )?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn withdraw(&mut self) -> Result<Flow> {
        let Some((id, amount)) = self.ask_movement()? else {
            return Ok(Flow::Stop);
        };
        self.prompter.blank()?;
        match self.bank.debit(id, amount) {
            Ok(movement) => {
                self.prompter.say(
                    Color::Green,
                    &format!(
                        "{} withdrawn successfully for {}",
                        format_currency(movement.amount),
                        movement.account_name
                    ),
                )?;
                self.prompter.say(
                    Color::Blue,
                    &format!("Remaining Balance: {}", format_currency(movement.balance)),
                )?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn show_status(&mut self) -> Result<Flow> {
        let Some(id) = self.ask_account_number()? else {
            return Ok(Flow::Stop);
        };
        match self.bank.status(id) {
            Ok(status) => self.print_status(&status)?,
            Err(err) => {
                self.prompter.blank()?;
                self.report(&err)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn show_balance(&mut self) -> Result<Flow> {
        let Some(id) = self.ask_account_number()? else {
            return Ok(Flow::Stop);
        };
        self.prompter.blank()?;
        match self.bank.view_balance(id) {
            Ok(view) => self.prompter.say(
                Color::Blue,
                &format!("Balance of {}: {}", view.name, format_currency(view.balance)),
            )?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn list_accounts(&mut self) -> Result<Flow> {
        let Some(format) = self
            .prompter
            .ask("Format (table/json/csv) [table]:", ListFormat::parse)?
        else {
            return Ok(Flow::Stop);
        };
        self.prompter.blank()?;

        let exporter = Exporter::new(&self.bank);
        match format {
            ListFormat::Json => {
                exporter.export_accounts_json(self.prompter.writer())?;
            }
            ListFormat::Csv => {
                exporter.export_accounts_csv(self.prompter.writer())?;
            }
            ListFormat::Table => {
                let accounts = self.bank.list_accounts();
                if accounts.is_empty() {
                    self.prompter.say(Color::Yellow, "No accounts found.")?;
                    return Ok(Flow::Continue);
                }
                self.prompter.say(
                    Color::Yellow,
                    &format!(
                        "{:<8} {:<20} {:>4} {:<7} {:<12} {:>14}",
                        "ACCOUNT", "NAME", "AGE", "GENDER", "PHONE", "BALANCE"
                    ),
                )?;
                self.prompter.say(Color::Yellow, &"-".repeat(70))?;
                for account in accounts {
                    self.prompter.say(
                        Color::Yellow,
                        &format!(
                            "{:<8} {:<20} {:>4} {:<7} {:<12} {:>14}",
                            account.id,
                            account.name,
                            account.age,
                            account.gender,
                            account.phone,
                            format_currency(account.balance)
                        ),
                    )?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn ask_account_number(&mut self) -> Result<Option<AccountId>> {
        self.prompter
            .ask("Enter your Account Number:", parse_account_number)
    }

    fn ask_movement(&mut self) -> Result<Option<(AccountId, Cents)>> {
        let Some(id) = self.ask_account_number()? else {
            return Ok(None);
        };
        Ok(self
            .prompter
            .ask("Enter Amount:", parse_amount)?
            .map(|amount| (id, amount)))
    }

    fn print_status(&mut self, status: &AccountStatus) -> Result<()> {
        let lines = [
            format!("Account number: {}", status.id),
            format!("Name: {}", status.name),
            format!("Age: {}", status.age),
            format!("Gender: {}", status.gender),
            format!("Phone #: {}", status.phone),
            format!("Balance: {}", format_currency(status.balance)),
            format!("Opened: {}", status.opened_at.format("%Y-%m-%d %H:%M:%S")),
        ];
        self.prompter.blank()?;
        for line in &lines {
            self.prompter.say(Color::Yellow, line)?;
        }
        Ok(())
    }

    fn report(&mut self, err: &BankError) -> Result<()> {
        let message = match err {
            BankError::AccountNotFound(_) => "Customer not found! Enter correct Account Number.",
            BankError::InvalidAmount(_) => "Invalid amount! Must be greater than zero.",
            BankError::InsufficientFunds { .. } => "Insufficient balance!",
            BankError::AmountOutOfRange(_) => "Amount is too large for this account!",
        };
        self.prompter.say(Color::Red, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Ok(MenuChoice::CreateAccount));
        assert_eq!(MenuChoice::parse("7"), Ok(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse(" view balance "), Ok(MenuChoice::Balance));
        assert!(MenuChoice::parse("0").is_err());
        assert!(MenuChoice::parse("8").is_err());
        assert!(MenuChoice::parse("transfer").is_err());
    }

    #[test]
    fn test_list_format_parse() {
        assert_eq!(ListFormat::parse(""), Ok(ListFormat::Table));
        assert_eq!(ListFormat::parse("JSON"), Ok(ListFormat::Json));
        assert_eq!(ListFormat::parse("csv"), Ok(ListFormat::Csv));
        assert!(ListFormat::parse("xml").is_err());
    }
}
