use thiserror::Error;

use crate::domain::DomainError;
use crate::io::IoError;
use crate::storage::StorageError;

/// Engine-level errors for ledger operations
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Malformed transfer request: {0}")]
    Decode(#[from] IoError),

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl EngineError {
    /// The underlying business rule violation, if any
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            Self::Storage(err) => err.domain(),
            _ => None,
        }
    }
}

// Cancellation surfaces the same way whichever layer noticed it
impl From<StorageError> for EngineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Cancelled => Self::Cancelled,
            other => Self::Storage(other),
        }
    }
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        Self::Storage(StorageError::DomainError(err))
    }
}
