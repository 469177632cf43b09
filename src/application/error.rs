use thiserror::Error;

use crate::domain::{AccountId, Cents, MovementError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Invalid amount: {0} (must be greater than zero)")]
    InvalidAmount(Cents),

    #[error("Insufficient funds in account {account_id}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account_id: AccountId,
        balance: Cents,
        requested: Cents,
    },

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(Cents),
}

impl BankError {
    /// Attach the account a movement was attempted on.
    pub fn from_movement(account_id: AccountId, err: MovementError) -> Self {
        match err {
            MovementError::InvalidAmount(amount) => BankError::InvalidAmount(amount),
            MovementError::InsufficientFunds { balance, requested } => {
                BankError::InsufficientFunds {
                    account_id,
                    balance,
                    requested,
                }
            }
            MovementError::OutOfRange(amount) => BankError::AmountOutOfRange(amount),
        }
    }
}
