use crate::types::{Balance, Credential, Identifier};
use serde::{Deserialize, Serialize, Serializer};

/// A single customer account as held in memory and persisted to the ledger.
///
/// Field order matters: it is the column order of a ledger line
/// (`identifier first_name last_name balance password`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// National-ID style key used for lookups. Not validated for uniqueness.
    pub identifier: Identifier,
    pub first_name: String,
    pub last_name: String,
    /// Only ever changed through `adjust_balance`.
    #[serde(serialize_with = "serialize_balance")]
    balance: Balance,
    pub password: Credential
}

impl Account {
    /// Opens a new account with a zero balance.
    pub fn new(identifier: impl Into<Identifier>, first_name: impl Into<String>, last_name: impl Into<String>, password: Credential) -> Self {
        Self {
            identifier: identifier.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            balance: 0.0,
            password
        }
    }

    #[cfg(test)]
    pub fn with_balance(mut self, balance: Balance) -> Self {
        self.balance = balance;
        self
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Applies a signed delta and returns the new balance. No sufficiency
    /// checks happen here, that policy belongs to the session layer.
    pub(crate) fn adjust_balance(&mut self, delta: Balance) -> Balance {
        self.balance += delta;
        self.balance
    }
}

/// Writes the balance the way it is shown on screen (`3000`, not `3000.0`).
fn serialize_balance<S: Serializer>(balance: &Balance, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(balance)
}
