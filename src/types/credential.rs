use crate::types::errors::CredentialError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

const MIN_CREDENTIAL: u32 = 1000;
const MAX_CREDENTIAL: u32 = 9999;

/// A 4-digit numeric password, stored and compared as a plain integer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Credential(u16);

impl Credential {
    pub fn new(value: u32) -> Result<Self, CredentialError> {
        if !(MIN_CREDENTIAL..=MAX_CREDENTIAL).contains(&value) {
            return Err(CredentialError::OutOfRange(value))
        }

        //NOTE: The range check above keeps the narrowing lossless
        Ok(Credential(value as u16))
    }

    pub fn matches(&self, candidate: u32) -> bool {
        u32::from(self.0) == candidate
    }
}

impl TryFrom<u32> for Credential {
    type Error = CredentialError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Credential::new(value)
    }
}

impl From<Credential> for u32 {
    fn from(credential: Credential) -> Self {
        u32::from(credential.0)
    }
}

impl Display for Credential {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
