pub mod account;
pub mod amount;
pub mod error;
pub mod iban;
pub mod operations;
pub mod transfer;

// Re-export commonly used types
pub use account::{Account, AccountStatus};
pub use amount::{AmountType, FixedPoint};
pub use error::DomainError;
pub use iban::Iban;
pub use operations::{apply_deposit, apply_withdrawal};
pub use transfer::TransferRequest;
