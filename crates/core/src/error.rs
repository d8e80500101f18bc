use std::io;
use std::result::Result as StdResult;

use thiserror::Error;

/// Errors that can occur in wortschatz core
#[derive(Error, Debug)]
pub enum VocabError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid identifier '{name}': {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl VocabError {
    /// Whether the caller supplied bad data (as opposed to an environment failure).
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::InvalidIdentifier { .. })
    }
}

pub type Result<T> = StdResult<T, VocabError>;
