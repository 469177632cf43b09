use std::collections::BTreeMap;

use crate::domain::{Account, AccountId, Gender};

/// Identifier given to the first account of every store.
pub const FIRST_ACCOUNT_ID: AccountId = 1000;

/// In-memory store for accounts.
///
/// Owns the identifier sequence: ids are handed out in creation order and
/// never reused. Accounts are keyed by id, so iteration order is creation order.
#[derive(Debug)]
pub struct LedgerStore {
    accounts: BTreeMap<AccountId, Account>,
    next_id: AccountId,
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::starting_at(FIRST_ACCOUNT_ID)
    }

    /// Empty store whose first account gets `first_id`.
    pub fn starting_at(first_id: AccountId) -> Self {
        Self {
            accounts: BTreeMap::new(),
            next_id: first_id,
        }
    }

    /// Open a new account with the next identifier. Inputs are stored as given.
    pub fn create_account(
        &mut self,
        name: String,
        age: u32,
        gender: Gender,
        phone: u64,
    ) -> &Account {
        let id = self.next_id;
        self.next_id += 1;
        self.accounts
            .entry(id)
            .or_insert_with(|| Account::open(id, name, age, gender, phone))
    }

    pub fn find_account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn find_account_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.get_mut(&id)
    }

    /// All accounts in creation order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
