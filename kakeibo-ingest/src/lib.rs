//! kakeibo-ingest: normalized statement lines and the matchers that turn them
//! into typed transactions (Prestia PDF text, USAA clipboard paste).

pub mod parsers;
pub mod types;

pub use types::{ClipTransaction, StatementTransaction};
