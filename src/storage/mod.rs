// Accounts live only for the duration of the process.
mod ledger_store;

pub use ledger_store::*;
