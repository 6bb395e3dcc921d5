pub mod error;
pub mod in_memory;
pub mod traits;

// Re-export commonly used types
pub use error::StorageError;
pub use in_memory::InMemoryLedger;
pub use traits::{AccountStore, ensure_not_cancelled};
