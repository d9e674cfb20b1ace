mod account;
mod errors;

pub use account::Account;
pub use errors::{CreationError, LoginError, TransactionError};
