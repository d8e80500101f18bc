//! Storage layer for wortschatz
//!
//! `SQLite` topic tables behind an r2d2 pool, the translations document and
//! CSV dumps.

mod error;
mod storage;
#[cfg(test)]
mod tests;
pub mod translations;

pub use error::{Result, StorageError};
pub use storage::Storage;
pub use translations::TranslationStore;
