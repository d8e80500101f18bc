//! Validated SQL identifiers.
//!
//! Table and column names cannot be bound as statement parameters, so every
//! name that ends up in SQL text goes through [`Identifier`] first.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_IDENTIFIER_LEN;
use crate::{Result, VocabError};

#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// A table or column name safe to splice into SQL text once quoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validate `name` as an identifier.
    ///
    /// # Errors
    /// Returns [`VocabError::InvalidIdentifier`] for empty, overlong,
    /// non-ASCII-word or `sqlite_`-prefixed names.
    pub fn new(name: &str) -> Result<Self> {
        let reason = if name.is_empty() {
            Some("must not be empty")
        } else if name.len() > MAX_IDENTIFIER_LEN {
            Some("is too long")
        } else if !IDENTIFIER_RE.is_match(name) {
            Some("may only contain ASCII letters, digits and underscores")
        } else if name.to_ascii_lowercase().starts_with("sqlite_") {
            Some("is reserved for SQLite")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(VocabError::InvalidIdentifier { name: name.to_owned(), reason }),
            None => Ok(Self(name.to_owned())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted form for use in statement text.
    #[must_use]
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }

    /// Case-insensitive comparison, matching how `SQLite` resolves names.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Identifier {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = VocabError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_word_names() {
        for name in ["verbs", "nouns_a1", "_draft", "Adjektive", "column_9"] {
            assert_eq!(Identifier::new(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn rejects_injection_attempts() {
        for name in ["verbs; DROP TABLE nouns", "a\"b", "x y", "name'--", "1verbs", "über"] {
            let err = Identifier::new(name).unwrap_err();
            assert!(matches!(err, VocabError::InvalidIdentifier { .. }), "{name}");
        }
    }

    #[test]
    fn rejects_empty_reserved_and_overlong() {
        assert!(Identifier::new("").is_err());
        assert!(Identifier::new("sqlite_master").is_err());
        assert!(Identifier::new("SQLITE_sequence").is_err());
        assert!(Identifier::new(&"a".repeat(MAX_IDENTIFIER_LEN + 1)).is_err());
        assert!(Identifier::new(&"a".repeat(MAX_IDENTIFIER_LEN)).is_ok());
    }

    #[test]
    fn quotes_for_sql() {
        assert_eq!(Identifier::new("verbs").unwrap().quoted(), "\"verbs\"");
    }

    #[test]
    fn matches_ignores_ascii_case() {
        let id = Identifier::new("Meaning").unwrap();
        assert!(id.matches("meaning"));
        assert!(!id.matches("meanings"));
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: Identifier = serde_json::from_str("\"nouns\"").unwrap();
        assert_eq!(ok.as_str(), "nouns");
        assert!(serde_json::from_str::<Identifier>("\"no way\"").is_err());
    }
}
