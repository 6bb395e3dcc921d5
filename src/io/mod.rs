pub mod decode;
pub mod error;
pub mod snapshot_writer;

// Re-export commonly used types
pub use decode::{decode_transfer, encode_account};
pub use error::IoError;
pub use snapshot_writer::write_snapshot;
