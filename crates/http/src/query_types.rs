//! Form bodies (Deserialize).
//!
//! The new-topic and add forms have a variable set of fields, so they are
//! extracted as raw `Form<Vec<(String, String)>>` pairs and interpreted here.

use serde::Deserialize;
use wortschatz_core::{EntryEdit, MAX_NEW_TOPIC_COLUMNS};

const TABLE_NAME_FIELD: &str = "table_name";
const TRANSLATION_FIELD: &str = "translation";
const COLUMN_FIELD_PREFIX: &str = "column_";

/// Fields of the new-topic form.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NewTopicForm {
    pub table_name: String,
    pub translation: String,
    /// `column_0` .. `column_9` in index order, blanks included.
    pub columns: Vec<String>,
}

impl NewTopicForm {
    /// Unknown fields and out-of-range column slots are ignored.
    pub fn from_fields(fields: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        let mut indexed: Vec<(usize, String)> = Vec::new();
        for (name, value) in fields {
            match name.as_str() {
                TABLE_NAME_FIELD => form.table_name = value,
                TRANSLATION_FIELD => form.translation = value,
                _ => {
                    let index = name
                        .strip_prefix(COLUMN_FIELD_PREFIX)
                        .and_then(|i| i.parse::<usize>().ok())
                        .filter(|i| *i < MAX_NEW_TOPIC_COLUMNS);
                    if let Some(index) = index {
                        indexed.push((index, value));
                    }
                },
            }
        }
        indexed.sort_by_key(|(index, _)| *index);
        form.columns = indexed.into_iter().map(|(_, value)| value).collect();
        form
    }
}

/// Values of the add form, with blank fields dropped so they are stored
/// as `NULL`.
pub fn entry_values(fields: Vec<(String, String)>) -> Vec<(String, String)> {
    fields
        .into_iter()
        .map(|(name, value)| (name, value.trim().to_owned()))
        .filter(|(_, value)| !value.is_empty())
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub expression: String,
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub value: String,
}

impl From<EditForm> for EntryEdit {
    fn from(form: EditForm) -> Self {
        Self {
            expression: form.expression.trim().to_owned(),
            column: form.column.trim().to_owned(),
            value: form.value.trim().to_owned(),
        }
    }
}
