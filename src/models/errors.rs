use crate::models::Account;
use crate::types::{Balance, CredentialError, Identifier};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LoginError {
    #[error("Account [{identifier}] was not found")]
    NotFound {
        identifier: Identifier
    },
    #[error("Incorrect password for account [{identifier}]")]
    WrongPassword {
        identifier: Identifier
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TransactionError {
    #[error("Amount [{amount}] must be positive for account [{identifier}]")]
    InvalidAmount {
        identifier: Identifier,
        amount: Balance
    },
    #[error("Amount [{amount}] exceeds the withdrawal limit of [{limit}] for account [{identifier}]")]
    LimitExceeded {
        identifier: Identifier,
        amount: Balance,
        limit: Balance
    },
    #[error("Insufficient funds to take [{amount}] from balance [{balance}] of account [{identifier}]")]
    InsufficientFunds {
        identifier: Identifier,
        amount: Balance,
        balance: Balance
    },
    #[error("No account is stored at index [{index}]")]
    UnknownAccount {
        index: usize
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CreationError {
    #[error("Cannot create more accounts, the ledger is full at [{capacity}]")]
    CapacityExceeded {
        capacity: usize
    },
    #[error("Invalid password: {0}")]
    PasswordInvalid(#[from] CredentialError),
    #[error("Passwords do not match for account [{identifier}]")]
    PasswordMismatch {
        identifier: Identifier
    }
}

impl TransactionError {
    //NOTE: Same factory approach as the other errors, every variant is built from the account it concerns

    pub fn invalid_amount(account: &Account, amount: Balance) -> Self {
        Self::InvalidAmount { identifier: account.identifier.clone(), amount }
    }

    pub fn limit_exceeded(account: &Account, amount: Balance, limit: Balance) -> Self {
        Self::LimitExceeded { identifier: account.identifier.clone(), amount, limit }
    }

    pub fn insufficient_funds(account: &Account, amount: Balance) -> Self {
        Self::InsufficientFunds {
            identifier: account.identifier.clone(),
            amount,
            balance: account.balance()
        }
    }
}
