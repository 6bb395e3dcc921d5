pub mod cli;
pub mod config;
pub mod error;
pub mod menu;
pub mod telemetry;

// Re-export commonly used types
pub use cli::CliApp;
pub use config::{ConfigError, LedgerConfig};
pub use error::AppError;
pub use menu::MenuSession;
pub use telemetry::init_tracing;
