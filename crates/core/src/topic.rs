use serde::{Deserialize, Serialize};

use crate::constants::{ID_COLUMN, MAX_NEW_TOPIC_COLUMNS, SORT_VALUE_COLUMN};
use crate::{Identifier, Result, VocabError};

/// A topic table together with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: Identifier,
    pub label: String,
}

/// One row of a topic table.
///
/// `values` follows the table's column order, `id` excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub values: Vec<(String, Option<String>)>,
}

impl Entry {
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .and_then(|(_, value)| value.as_deref())
    }
}

/// Columns and sorted rows of one topic, ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicTable {
    pub topic: Topic,
    pub columns: Vec<String>,
    pub entries: Vec<Entry>,
}

impl TopicTable {
    /// Columns shown to the reader: everything except `sort_value`.
    #[must_use]
    pub fn display_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| !c.eq_ignore_ascii_case(SORT_VALUE_COLUMN))
            .collect()
    }
}

/// Request to create a new topic table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopic {
    pub name: Identifier,
    pub translation: String,
    /// Data columns in order; the first one is the sort source.
    pub columns: Vec<Identifier>,
}

impl NewTopic {
    /// Validate raw form input into a topic definition.
    ///
    /// Blank column fields are skipped, so a form with ten column slots may
    /// fill only the first few.
    ///
    /// # Errors
    /// Returns an error when the name or a column is not a valid identifier,
    /// when no column is given, when more than [`MAX_NEW_TOPIC_COLUMNS`] are
    /// given, or when a column is reserved or repeated.
    pub fn parse<'a, I>(name: &str, translation: &str, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let name = Identifier::new(name.trim())?;
        let mut parsed: Vec<Identifier> = Vec::new();

        for raw in columns.into_iter().map(str::trim).filter(|c| !c.is_empty()) {
            let column = Identifier::new(raw)?;
            if is_reserved_column(column.as_str()) {
                return Err(VocabError::InvalidInput(format!(
                    "column name '{column}' is reserved"
                )));
            }
            if parsed.iter().any(|c| c.matches(column.as_str())) {
                return Err(VocabError::InvalidInput(format!("column '{column}' is repeated")));
            }
            parsed.push(column);
        }

        if parsed.is_empty() {
            return Err(VocabError::InvalidInput("a topic needs at least one column".to_owned()));
        }
        if parsed.len() > MAX_NEW_TOPIC_COLUMNS {
            return Err(VocabError::InvalidInput(format!(
                "a topic can have at most {MAX_NEW_TOPIC_COLUMNS} columns"
            )));
        }

        let translation = translation.trim();
        let translation =
            if translation.is_empty() { name.to_string() } else { translation.to_owned() };

        Ok(Self { name, translation, columns: parsed })
    }
}

/// Change one column of the row whose source column equals `expression`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryEdit {
    pub expression: String,
    pub column: String,
    pub value: String,
}

/// Columns managed by storage that users never set directly.
#[must_use]
pub fn is_reserved_column(name: &str) -> bool {
    name.eq_ignore_ascii_case(ID_COLUMN) || name.eq_ignore_ascii_case(SORT_VALUE_COLUMN)
}
