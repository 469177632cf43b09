// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use pocketbank::application::BankService;
use pocketbank::cli::{Palette, Prompter, Session};
use pocketbank::domain::{AccountId, Gender};

/// Helper to create a bank holding a single account for Alice (id 1000)
pub fn bank_with_alice() -> (BankService, AccountId) {
    let mut bank = BankService::new();
    let status = bank.create_account("Alice".into(), 30, Gender::Male, 5551234);
    (bank, status.id)
}

/// Run a scripted session without colors, returning the bank and everything
/// written to the operator.
pub fn run_script(script: &str) -> (BankService, String) {
    let prompter = Prompter::new(script.as_bytes(), Vec::new(), Palette::plain());
    let mut session = Session::new(BankService::new(), prompter, "Best Bank");
    session.run().expect("session should not fail on in-memory I/O");
    let (bank, out) = session.into_parts();
    (bank, String::from_utf8(out).expect("session output is UTF-8"))
}
