pub mod error;
pub mod provision;
pub mod transfer;

// Re-export commonly used types
pub use error::EngineError;
pub use provision::{MAX_OPEN_ATTEMPTS, SystemAccounts, open_account, provision_system_accounts};
pub use transfer::TransferEngine;
