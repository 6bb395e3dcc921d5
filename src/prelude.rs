//! Prelude module for convenient imports
//!
//! Import everything you need with: `use ledger::prelude::*;`

// Domain types
pub use crate::domain::{
    Account, AccountStatus, AmountType, DomainError, FixedPoint, Iban, TransferRequest,
};

// Storage types
pub use crate::storage::{AccountStore, InMemoryLedger, StorageError};

// Engine types
pub use crate::engine::{
    EngineError, SystemAccounts, TransferEngine, open_account, provision_system_accounts,
};

// IO types
pub use crate::io::{IoError, decode_transfer, encode_account, write_snapshot};

// App types
pub use crate::app::{AppError, CliApp, ConfigError, LedgerConfig, MenuSession, init_tracing};
