//! In-memory account ledger keyed by IBAN, with an atomic transfer engine
//! and an interactive text menu.

pub mod app;
pub mod domain;
pub mod engine;
pub mod io;
pub mod prelude;
pub mod storage;
