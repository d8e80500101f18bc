//! Core types for wortschatz
//!
//! Domain types, configuration and the sort-key normalizer shared by the
//! storage, HTTP and CLI crates.

pub mod config;
pub mod constants;
pub mod env_config;
mod error;
mod identifier;
pub mod sort_key;
mod topic;

pub use config::AppConfig;
pub use constants::*;
pub use error::*;
pub use identifier::Identifier;
pub use sort_key::{sort_key, sort_key_for};
pub use topic::*;
