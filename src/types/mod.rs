mod credential;
mod errors;

pub use credential::Credential;
pub use errors::CredentialError;

pub type Identifier = String;
pub type Balance = f32;

/// Maximum number of accounts the ledger can hold.
pub const MAX_ACCOUNTS: usize = 100;
/// Largest amount a single withdrawal may take out.
pub const WITHDRAW_LIMIT: Balance = 300_000.0;
