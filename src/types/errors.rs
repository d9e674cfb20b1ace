use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum CredentialError {
    #[error("Credential error: {0} is not a 4-digit number")]
    OutOfRange(u32)
}
