use std::io;
use thiserror::Error;

use crate::domain::{DomainError, Iban};

/// Storage-level errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Account not found: {0}")]
    AccountNotFound(Iban),

    #[error("Account already exists: {0}")]
    AccountAlreadyExists(Iban),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Domain error: {0}")]
    DomainError(#[from] DomainError),
}

impl StorageError {
    /// The underlying business rule violation, if any
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            Self::DomainError(err) => Some(err),
            _ => None,
        }
    }
}
