use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use super::{serialize_units, tax_for, Cents, CENTS_PER_UNIT};

pub type AccountId = u64;

/// Balance every new account starts with: 1000 units.
pub const OPENING_BALANCE: Cents = 1_000 * CENTS_PER_UNIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a credit or withdrawal was refused. The balance is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MovementError {
    #[error("amount must be greater than zero, got {0}")]
    InvalidAmount(Cents),

    #[error("balance {balance} does not cover {requested}")]
    InsufficientFunds { balance: Cents, requested: Cents },

    #[error("amount {0} is out of range for this balance")]
    OutOfRange(Cents),
}

/// Read-only view of an account's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceView {
    pub id: AccountId,
    pub name: String,
    #[serde(serialize_with = "serialize_units")]
    pub balance: Cents,
}

/// Snapshot of every field of an account, for display and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountStatus {
    pub id: AccountId,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub phone: u64,
    #[serde(serialize_with = "serialize_units")]
    pub balance: Cents,
    pub opened_at: DateTime<Utc>,
}

/// One customer's identity and balance.
///
/// Identity fields are fixed at creation. The balance only moves through
/// [`Account::credit`] and [`Account::withdraw`], both of which charge
/// [`tax_for`] on the amount moved.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    name: String,
    age: u32,
    gender: Gender,
    phone: u64,
    balance: Cents,
    opened_at: DateTime<Utc>,
}

impl Account {
    /// Open an account with [`OPENING_BALANCE`]. The id is assigned by the ledger store.
    pub fn open(id: AccountId, name: String, age: u32, gender: Gender, phone: u64) -> Self {
        Self {
            id,
            name,
            age,
            gender,
            phone,
            balance: OPENING_BALANCE,
            opened_at: Utc::now(),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Cents {
        self.balance
    }

    /// Add `amount` minus tax. Returns the new balance.
    pub fn credit(&mut self, amount: Cents) -> Result<Cents, MovementError> {
        if amount <= 0 {
            return Err(MovementError::InvalidAmount(amount));
        }
        let net = amount - tax_for(amount);
        self.balance = self
            .balance
            .checked_add(net)
            .ok_or(MovementError::OutOfRange(amount))?;
        Ok(self.balance)
    }

    /// Remove `amount` plus tax. Returns the new balance.
    ///
    /// Funds are checked against the untaxed amount, so withdrawing the whole
    /// balance succeeds and leaves it negative by the tax.
    pub fn withdraw(&mut self, amount: Cents) -> Result<Cents, MovementError> {
        if amount <= 0 {
            return Err(MovementError::InvalidAmount(amount));
        }
        if amount > self.balance {
            return Err(MovementError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        self.balance = amount
            .checked_add(tax_for(amount))
            .and_then(|gross| self.balance.checked_sub(gross))
            .ok_or(MovementError::OutOfRange(amount))?;
        Ok(self.balance)
    }

    pub fn view(&self) -> BalanceView {
        BalanceView {
            id: self.id,
            name: self.name.clone(),
            balance: self.balance,
        }
    }

    pub fn status(&self) -> AccountStatus {
        AccountStatus {
            id: self.id,
            name: self.name.clone(),
            age: self.age,
            gender: self.gender,
            phone: self.phone,
            balance: self.balance,
            opened_at: self.opened_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Account {
        Account::open(1000, "Alice".into(), 30, Gender::Male, 5551234)
    }

    #[test]
    fn test_open_starts_at_opening_balance() {
        let account = alice();
        assert_eq!(account.balance(), 100_000);
        assert_eq!(account.id(), 1000);
    }

    #[test]
    fn test_credit_deducts_tax() {
        let mut account = alice();
        assert_eq!(account.credit(25_000), Ok(124_800));
        assert_eq!(account.balance(), 124_800);
    }

    #[test]
    fn test_credit_below_one_hundred_is_untaxed() {
        let mut account = alice();
        assert_eq!(account.credit(9_999), Ok(109_999));
    }

    #[test]
    fn test_withdraw_adds_tax() {
        let mut account = alice();
        account.credit(25_000).unwrap();
        assert_eq!(account.withdraw(24_800), Ok(99_800));
    }

    #[test]
    fn test_non_positive_amounts_are_rejected() {
        let mut account = alice();
        assert_eq!(account.credit(0), Err(MovementError::InvalidAmount(0)));
        assert_eq!(account.credit(-500), Err(MovementError::InvalidAmount(-500)));
        assert_eq!(account.withdraw(0), Err(MovementError::InvalidAmount(0)));
        assert_eq!(account.withdraw(-500), Err(MovementError::InvalidAmount(-500)));
        assert_eq!(account.balance(), OPENING_BALANCE);
    }

    #[test]
    fn test_overdraw_is_rejected() {
        let mut account = alice();
        assert_eq!(
            account.withdraw(100_001),
            Err(MovementError::InsufficientFunds {
                balance: 100_000,
                requested: 100_001
            })
        );
        assert_eq!(account.balance(), OPENING_BALANCE);
    }

    #[test]
    fn test_withdrawing_whole_balance_goes_negative_by_tax() {
        let mut account = alice();
        assert_eq!(account.withdraw(100_000), Ok(-1_000));
    }

    #[test]
    fn test_credit_overflow_leaves_balance() {
        let mut account = alice();
        let balance = account.credit(i64::MAX).unwrap();
        assert_eq!(balance, 9_131_138_316_486_328_107);

        assert_eq!(
            account.credit(i64::MAX),
            Err(MovementError::OutOfRange(i64::MAX))
        );
        assert_eq!(account.balance(), balance);
    }

    #[test]
    fn test_withdraw_overflow_leaves_balance() {
        let mut account = alice();
        account.credit(i64::MAX).unwrap();
        let balance = account.credit(90_000_000_000_000_000).unwrap();
        assert_eq!(balance, 9_220_238_316_486_328_107);

        // Covered by the balance, but amount plus tax exceeds i64
        let amount = 9_200_000_000_000_000_000;
        assert_eq!(account.withdraw(amount), Err(MovementError::OutOfRange(amount)));
        assert_eq!(account.balance(), balance);
    }

    #[test]
    fn test_status_snapshot() {
        let account = alice();
        let status = account.status();
        assert_eq!(status.name, "Alice");
        assert_eq!(status.age, 30);
        assert_eq!(status.gender, Gender::Male);
        assert_eq!(status.phone, 5551234);
        assert_eq!(status.balance, OPENING_BALANCE);
        assert_eq!(account.view().balance, OPENING_BALANCE);
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("Male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!(" female ".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!("F".parse::<Gender>(), Ok(Gender::Female));
        assert!("other".parse::<Gender>().is_err());
    }
}
