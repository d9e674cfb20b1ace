use super::SessionController;
use crate::models::{Account, CreationError, LoginError, TransactionError};
use crate::storage::{AccountStore, LedgerFile, Storage, StorageError};
use crate::types::{Credential, CredentialError, MAX_ACCOUNTS};

use std::cell::{Cell, RefCell};
use std::io;

use anyhow::{anyhow, Result};
use tempfile::tempdir;

/// In-memory storage that remembers the last save and counts them.
#[derive(Default)]
struct RecordingStorage {
    accounts: RefCell<Vec<Account>>,
    saves: Cell<usize>
}

impl Storage for RecordingStorage {
    fn load(&self) -> Result<Vec<Account>, StorageError> {
        Ok(self.accounts.borrow().clone())
    }

    fn save(&self, accounts: &[Account]) -> Result<(), StorageError> {
        *self.accounts.borrow_mut() = accounts.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

struct FailingStorage;

impl Storage for FailingStorage {
    fn load(&self) -> Result<Vec<Account>, StorageError> {
        Ok(Vec::new())
    }

    fn save(&self, _accounts: &[Account]) -> Result<(), StorageError> {
        Err(io::Error::other("disk full").into())
    }
}

fn controller_with_balance(balance: f32) -> Result<SessionController<RecordingStorage>> {
    let mut store = AccountStore::new();
    store.append(Account::new("12345", "Ali", "Khan", Credential::new(4321)?).with_balance(balance))?;

    Ok(SessionController::new(store, RecordingStorage::default()))
}

#[test]
fn test_authenticate_returns_index_for_matching_password() -> Result<()> {
    let controller = controller_with_balance(0.0)?;

    assert_eq!(controller.authenticate("12345", 4321), Ok(0));

    Ok(())
}

#[test]
fn test_authenticate_reports_unknown_identifier_and_wrong_password() -> Result<()> {
    let controller = controller_with_balance(0.0)?;

    assert!(matches!(controller.authenticate("99999", 4321), Err(LoginError::NotFound { .. })));
    assert!(matches!(controller.authenticate("12345", 1234), Err(LoginError::WrongPassword { .. })));

    Ok(())
}

#[test]
fn test_deposit_adds_amount_and_persists() -> Result<()> {
    let mut controller = controller_with_balance(100.0)?;

    assert_eq!(controller.deposit(0, 50.25)?, 150.25);
    assert_eq!(controller.storage().saves.get(), 1);
    assert_eq!(controller.storage().accounts.borrow()[0].balance(), 150.25);

    Ok(())
}

#[test]
fn test_deposit_rejects_non_positive_amounts() -> Result<()> {
    let mut controller = controller_with_balance(100.0)?;

    for amount in [0.0, -5.0, f32::NAN, f32::INFINITY] {
        let result = controller.deposit(0, amount);

        assert!(matches!(result, Err(TransactionError::InvalidAmount { .. })));
    }

    assert_eq!(controller.check_balance(0)?, 100.0);
    assert_eq!(controller.storage().saves.get(), 0);

    Ok(())
}

#[test]
fn test_withdraw_subtracts_amount_and_persists() -> Result<()> {
    let mut controller = controller_with_balance(5000.0)?;

    assert_eq!(controller.withdraw(0, 2000.0)?, 3000.0);
    assert_eq!(controller.withdraw(0, 3000.0)?, 0.0);
    assert_eq!(controller.storage().saves.get(), 2);

    Ok(())
}

#[test]
fn test_withdraw_limit_takes_precedence_over_sufficiency() -> Result<()> {
    let mut controller = controller_with_balance(1_000_000.0)?;

    let result = controller.withdraw(0, 300_001.0);

    assert!(matches!(result, Err(TransactionError::LimitExceeded { .. })));
    assert_eq!(controller.check_balance(0)?, 1_000_000.0);

    let mut poor_controller = controller_with_balance(10.0)?;
    let result = poor_controller.withdraw(0, 400_000.0);

    assert!(matches!(result, Err(TransactionError::LimitExceeded { .. })));

    Ok(())
}

#[test]
fn test_withdraw_exactly_at_limit_is_allowed() -> Result<()> {
    let mut controller = controller_with_balance(300_000.0)?;

    assert_eq!(controller.withdraw(0, 300_000.0)?, 0.0);

    Ok(())
}

#[test]
fn test_withdraw_with_insufficient_funds_fails() -> Result<()> {
    let mut controller = controller_with_balance(100.0)?;

    let result = controller.withdraw(0, 100.5);

    assert!(matches!(result, Err(TransactionError::InsufficientFunds { .. })));
    assert_eq!(controller.check_balance(0)?, 100.0);
    assert_eq!(controller.storage().saves.get(), 0);

    Ok(())
}

#[test]
fn test_withdraw_rejects_non_positive_amounts() -> Result<()> {
    let mut controller = controller_with_balance(100.0)?;

    assert!(matches!(controller.withdraw(0, 0.0), Err(TransactionError::InvalidAmount { .. })));
    assert!(matches!(controller.withdraw(0, -1.0), Err(TransactionError::InvalidAmount { .. })));

    Ok(())
}

#[test]
fn test_transactions_on_unknown_index_fail() -> Result<()> {
    let mut controller = controller_with_balance(100.0)?;

    assert_eq!(controller.deposit(3, 1.0), Err(TransactionError::UnknownAccount { index: 3 }));
    assert_eq!(controller.check_balance(3), Err(TransactionError::UnknownAccount { index: 3 }));

    Ok(())
}

#[test]
fn test_check_balance_does_not_persist() -> Result<()> {
    let controller = controller_with_balance(42.0)?;

    assert_eq!(controller.check_balance(0)?, 42.0);
    assert_eq!(controller.storage().saves.get(), 0);

    Ok(())
}

#[test]
fn test_create_account_opens_zero_balance_account() -> Result<()> {
    let mut controller = SessionController::new(AccountStore::new(), RecordingStorage::default());

    let account = controller.create_account("12345", "Ali", "Khan", 4321, 4321)?;

    assert_eq!(account.identifier, "12345");
    assert_eq!(account.balance(), 0.0);
    assert_eq!(controller.store().len(), 1);
    assert_eq!(controller.storage().saves.get(), 1);

    Ok(())
}

#[test]
fn test_create_account_validates_password() -> Result<()> {
    let mut controller = SessionController::new(AccountStore::new(), RecordingStorage::default());

    let result = controller.create_account("12345", "Ali", "Khan", 999, 999);
    assert!(matches!(result, Err(CreationError::PasswordInvalid(CredentialError::OutOfRange(999)))));

    let result = controller.create_account("12345", "Ali", "Khan", 4321, 1234);
    assert!(matches!(result, Err(CreationError::PasswordMismatch { .. })));

    //NOTE: An invalid password is reported before a mismatch
    let result = controller.create_account("12345", "Ali", "Khan", 12, 4321);
    assert!(matches!(result, Err(CreationError::PasswordInvalid(_))));

    assert_eq!(controller.store().len(), 0);
    assert_eq!(controller.storage().saves.get(), 0);

    Ok(())
}

#[test]
fn test_create_account_fails_once_capacity_is_reached() -> Result<()> {
    let mut controller = SessionController::new(AccountStore::new(), RecordingStorage::default());

    for number in 0..MAX_ACCOUNTS {
        controller.create_account(&number.to_string(), "Ali", "Khan", 1111, 1111)?;
    }

    let result = controller.create_account("overflow", "Ali", "Khan", 1111, 1111);

    assert_eq!(result, Err(CreationError::CapacityExceeded { capacity: MAX_ACCOUNTS }));
    assert_eq!(controller.store().len(), MAX_ACCOUNTS);

    Ok(())
}

#[test]
fn test_duplicate_identifiers_are_accepted_and_first_match_wins() -> Result<()> {
    let mut controller = SessionController::new(AccountStore::new(), RecordingStorage::default());

    controller.create_account("12345", "Ali", "Khan", 1111, 1111)?;
    controller.create_account("12345", "Sara", "Khan", 2222, 2222)?;

    assert_eq!(controller.store().len(), 2);
    assert_eq!(controller.authenticate("12345", 1111), Ok(0));
    assert!(matches!(controller.authenticate("12345", 2222), Err(LoginError::WrongPassword { .. })));

    Ok(())
}

#[test]
fn test_failed_save_keeps_in_memory_result() -> Result<()> {
    let mut controller = SessionController::new(AccountStore::new(), FailingStorage);

    controller.create_account("12345", "Ali", "Khan", 4321, 4321)?;

    assert_eq!(controller.deposit(0, 10.0)?, 10.0);

    Ok(())
}

#[test]
fn test_end_to_end_scenario_survives_reload() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("bank_data.txt");
    let mut controller = SessionController::load(LedgerFile::new(&path))?;

    let account = controller.create_account("12345", "Ali", "Khan", 4321, 4321)?;
    assert_eq!(account.balance(), 0.0);

    let index = controller.authenticate("12345", 4321)?;

    assert_eq!(controller.deposit(index, 5000.0)?, 5000.0);
    assert_eq!(controller.withdraw(index, 2000.0)?, 3000.0);
    assert!(matches!(controller.withdraw(index, 400_000.0), Err(TransactionError::LimitExceeded { .. })));
    assert_eq!(controller.check_balance(index)?, 3000.0);
    assert!(matches!(controller.authenticate("12345", 1111), Err(LoginError::WrongPassword { .. })));

    let reloaded = SessionController::load(LedgerFile::new(&path))?;
    let index = reloaded.authenticate("12345", 4321)?;
    let account = reloaded.account(index).ok_or_else(|| anyhow!("Account missing after reload"))?;

    assert_eq!(account.full_name(), "Ali Khan");
    assert_eq!(account.balance(), 3000.0);

    Ok(())
}
