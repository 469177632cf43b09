use tracing::{debug, info, warn};

use crate::domain::{
    tax_for, Account, AccountId, AccountStatus, BalanceView, Cents, Gender, MovementError,
};
use crate::storage::LedgerStore;

use super::BankError;

/// Application service providing the bank operations.
/// This is the only interface the presentation layer talks to.
#[derive(Debug, Default)]
pub struct BankService {
    store: LedgerStore,
}

/// Result of a successful credit or withdrawal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    pub account_id: AccountId,
    pub account_name: String,
    /// Amount requested by the operator, before tax
    pub amount: Cents,
    pub tax: Cents,
    pub balance: Cents,
}

impl BankService {
    /// Create a bank with an empty ledger.
    pub fn new() -> Self {
        Self::with_store(LedgerStore::new())
    }

    pub fn with_store(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Open an account. Inputs are expected to be validated by the caller.
    pub fn create_account(
        &mut self,
        name: String,
        age: u32,
        gender: Gender,
        phone: u64,
    ) -> AccountStatus {
        let status = self.store.create_account(name, age, gender, phone).status();
        info!(account_id = status.id, name = %status.name, "account created");
        status
    }

    pub fn credit(&mut self, id: AccountId, amount: Cents) -> Result<Movement, BankError> {
        self.apply(id, amount, "credit", Account::credit)
    }

    pub fn debit(&mut self, id: AccountId, amount: Cents) -> Result<Movement, BankError> {
        self.apply(id, amount, "debit", Account::withdraw)
    }

    pub fn view_balance(&self, id: AccountId) -> Result<BalanceView, BankError> {
        self.find(id).map(Account::view)
    }

    pub fn status(&self, id: AccountId) -> Result<AccountStatus, BankError> {
        self.find(id).map(Account::status)
    }

    /// Status of every account, oldest first.
    pub fn list_accounts(&self) -> Vec<AccountStatus> {
        self.store.accounts().map(Account::status).collect()
    }

    fn find(&self, id: AccountId) -> Result<&Account, BankError> {
        debug!(account_id = id, "looking up account");
        self.store.find_account(id).ok_or_else(|| {
            warn!(account_id = id, "account not found");
            BankError::AccountNotFound(id)
        })
    }

    fn apply(
        &mut self,
        id: AccountId,
        amount: Cents,
        kind: &'static str,
        op: fn(&mut Account, Cents) -> Result<Cents, MovementError>,
    ) -> Result<Movement, BankError> {
        debug!(account_id = id, "looking up account");
        let Some(account) = self.store.find_account_mut(id) else {
            warn!(account_id = id, kind, "account not found");
            return Err(BankError::AccountNotFound(id));
        };

        match op(account, amount) {
            Ok(balance) => {
                let tax = tax_for(amount);
                info!(account_id = id, kind, amount, tax, balance, "movement applied");
                Ok(Movement {
                    account_id: id,
                    account_name: account.name().to_string(),
                    amount,
                    tax,
                    balance,
                })
            }
            Err(err) => {
                warn!(account_id = id, kind, amount, error = %err, "movement rejected");
                Err(BankError::from_movement(id, err))
            }
        }
    }
}
