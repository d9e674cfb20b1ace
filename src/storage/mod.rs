mod account_store;
mod errors;
mod ledger_file;

use crate::models::Account;

pub use account_store::AccountStore;
pub use errors::{StorageError, StoreError};
pub use ledger_file::LedgerFile;

/// Durable mirror of the account collection.
pub trait Storage {
    /// Reads every persisted account. A missing backing store is an empty ledger.
    fn load(&self) -> Result<Vec<Account>, StorageError>;
    /// Replaces the persisted state with `accounts`, in order.
    fn save(&self, accounts: &[Account]) -> Result<(), StorageError>;
}
