use crate::models::{Account, CreationError, LoginError, TransactionError};
use crate::storage::{AccountStore, Storage, StorageError};
use crate::types::{Balance, Credential, WITHDRAW_LIMIT};
use tracing::{debug, error, info, warn};

/// Authenticates customers and runs their transactions against the store,
/// persisting the full ledger after every change.
pub struct SessionController<S: Storage> {
    store: AccountStore,
    storage: S
}

impl<S: Storage> SessionController<S> {
    pub fn new(store: AccountStore, storage: S) -> Self {
        Self {
            store,
            storage
        }
    }

    /// Builds a controller from whatever the storage currently holds.
    pub fn load(storage: S) -> Result<Self, StorageError> {
        let mut store = AccountStore::new();

        for account in storage.load()? {
            if let Err(error) = store.append(account) {
                warn!("{error}");
                break;
            }
        }

        Ok(Self::new(store, storage))
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    pub fn account(&self, index: usize) -> Option<&Account> {
        self.store.get(index)
    }

    pub fn authenticate(&self, identifier: &str, password: u32) -> Result<usize, LoginError> {
        let Some(index) = self.store.find(identifier) else {
            warn!("Login rejected, account [{identifier}] not found");
            return Err(LoginError::NotFound { identifier: identifier.to_string() })
        };

        let account = self.account(index).ok_or_else(|| LoginError::NotFound { identifier: identifier.to_string() })?;

        if !account.password.matches(password) {
            warn!("Login rejected, wrong password for account [{identifier}]");
            return Err(LoginError::WrongPassword { identifier: identifier.to_string() })
        }

        debug!("Account [{identifier}] logged in");

        Ok(index)
    }

    pub fn deposit(&mut self, index: usize, amount: Balance) -> Result<Balance, TransactionError> {
        let account = self.get_account(index)?;

        if !is_positive(amount) {
            return Err(TransactionError::invalid_amount(account, amount))
        }

        let balance = self.apply(index, amount)?;
        debug!(index, amount, balance, "Deposit applied");

        Ok(balance)
    }

    /// Positivity and the per-transaction limit are checked before the
    /// balance, so an over-limit request reports the limit even when the
    /// account could not cover it either.
    pub fn withdraw(&mut self, index: usize, amount: Balance) -> Result<Balance, TransactionError> {
        let account = self.get_account(index)?;

        if !is_positive(amount) {
            return Err(TransactionError::invalid_amount(account, amount))
        }

        if amount > WITHDRAW_LIMIT {
            return Err(TransactionError::limit_exceeded(account, amount, WITHDRAW_LIMIT))
        }

        if amount > account.balance() {
            return Err(TransactionError::insufficient_funds(account, amount))
        }

        let balance = self.apply(index, -amount)?;
        debug!(index, amount, balance, "Withdrawal applied");

        Ok(balance)
    }

    pub fn check_balance(&self, index: usize) -> Result<Balance, TransactionError> {
        Ok(self.get_account(index)?.balance())
    }

    /// Opens a zero-balance account and persists it.
    ///
    /// # Errors
    /// Returns `CreationError` if:
    /// - The store already holds its maximum number of accounts.
    /// - `password` is not a 4-digit number.
    /// - `confirm_password` differs from `password`.
    pub fn create_account(&mut self, identifier: &str, first_name: &str, last_name: &str, password: u32, confirm_password: u32) -> Result<&Account, CreationError> {
        let capacity = self.store.capacity();

        if self.store.is_full() {
            warn!("Account [{identifier}] refused, store is full");
            return Err(CreationError::CapacityExceeded { capacity })
        }

        let credential = Credential::new(password)?;

        if password != confirm_password {
            return Err(CreationError::PasswordMismatch { identifier: identifier.to_string() })
        }

        let index = self.store.append(Account::new(identifier, first_name, last_name, credential))
            .map_err(|_| CreationError::CapacityExceeded { capacity })?;

        self.persist();
        info!("Created account [{identifier}]");

        Ok(&self.store.accounts()[index])
    }

    fn get_account(&self, index: usize) -> Result<&Account, TransactionError> {
        self.store.get(index).ok_or(TransactionError::UnknownAccount { index })
    }

    fn apply(&mut self, index: usize, delta: Balance) -> Result<Balance, TransactionError> {
        let balance = self.store.adjust_balance(index, delta)
            .map_err(|_| TransactionError::UnknownAccount { index })?;

        self.persist();

        Ok(balance)
    }

    fn persist(&self) {
        //NOTE: A failed save leaves memory ahead of the file; the next successful save catches it up
        if let Err(error) = self.storage.save(self.store.accounts()) {
            error!("Failed to persist ledger: {error}");
        }
    }
}

fn is_positive(amount: Balance) -> bool {
    amount.is_finite() && amount > 0.0
}
