use std::io;

use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum StoreError {
    #[error("Account store is full at [{capacity}] accounts")]
    CapacityExceeded {
        capacity: usize
    },
    #[error("No account is stored at index [{index}]")]
    UnknownIndex {
        index: usize
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Io(#[from] io::Error),
    #[error("Storage error: {0}")]
    Csv(#[from] csv::Error)
}
