use crate::models::Account;
use crate::storage::StoreError;
use crate::types::{Balance, MAX_ACCOUNTS};

/// Ordered, fixed-capacity collection of accounts.
///
/// Accounts keep their insertion order and are addressed by position. There
/// is no removal, so an index handed out by `find` or `append` stays valid for
/// the lifetime of the store.
#[derive(Debug, Clone)]
pub struct AccountStore {
    accounts: Vec<Account>,
    capacity: usize
}

impl AccountStore {
    pub fn new() -> Self {
        Self::with_capacity(MAX_ACCOUNTS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            accounts: Vec::with_capacity(capacity),
            capacity
        }
    }

    /// Linear scan in insertion order. Identifiers are not forced to be
    /// unique, so the first match wins.
    pub fn find(&self, identifier: &str) -> Option<usize> {
        self.accounts.iter().position(|account| account.identifier == identifier)
    }

    pub fn append(&mut self, account: Account) -> Result<usize, StoreError> {
        if self.is_full() {
            return Err(StoreError::CapacityExceeded { capacity: self.capacity })
        }

        self.accounts.push(account);

        Ok(self.accounts.len() - 1)
    }

    pub fn adjust_balance(&mut self, index: usize, delta: Balance) -> Result<Balance, StoreError> {
        self.accounts.get_mut(index)
            .map(|account| account.adjust_balance(delta))
            .ok_or(StoreError::UnknownIndex { index })
    }

    pub fn get(&self, index: usize) -> Option<&Account> {
        self.accounts.get(index)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_full(&self) -> bool {
        self.accounts.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
