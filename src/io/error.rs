use std::io;
use thiserror::Error;

use crate::storage::StorageError;

/// IO-level errors for wire decoding and output
#[derive(Error, Debug)]
pub enum IoError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
