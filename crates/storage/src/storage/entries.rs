use rusqlite::{OptionalExtension as _, params, params_from_iter};
use wortschatz_core::{
    Entry, EntryEdit, Identifier, SORT_VALUE_COLUMN, is_reserved_column, sort_key, sort_key_for,
};

use super::{Storage, TableShape, get_conn, quote_ident, value_to_text};
use crate::error::{Result, StorageError};

impl Storage {
    /// All entries of a topic, ordered by `sort_value` (then `id`) when the
    /// table has one, by `id` otherwise.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown topic or error if the query fails.
    pub fn list_entries(&self, topic: &Identifier) -> Result<Vec<Entry>> {
        Ok(self.read_table(topic)?.1)
    }

    /// Column names and sorted entries read over a single connection.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown topic or error if the query fails.
    pub fn read_table(&self, topic: &Identifier) -> Result<(Vec<String>, Vec<Entry>)> {
        let conn = get_conn(&self.pool)?;
        let shape = TableShape::load(&conn, topic)?;

        let value_columns: Vec<&str> = shape.value_columns().collect();
        let mut select = vec!["rowid".to_owned()];
        select.extend(value_columns.iter().map(|c| quote_ident(c)));
        let order = if shape.has_sort_value() {
            format!("ORDER BY {SORT_VALUE_COLUMN}, rowid")
        } else {
            "ORDER BY rowid".to_owned()
        };
        let sql = format!("SELECT {} FROM {} {order}", select.join(", "), topic.quoted());

        let mut stmt = conn.prepare(&sql)?;
        let entries = stmt
            .query_map([], |row| {
                let mut values = Vec::with_capacity(value_columns.len());
                for (i, column) in value_columns.iter().enumerate() {
                    values.push(((*column).to_owned(), value_to_text(row.get_ref(i + 1)?)));
                }
                Ok(Entry { id: row.get(0)?, values })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((shape.columns.clone(), entries))
    }

    /// Insert one entry and return its id.
    ///
    /// `values` are `(column, value)` pairs naming data columns. The sort key
    /// is computed from the source column in the same statement, so a row
    /// never exists without a consistent key.
    ///
    /// # Errors
    /// Returns `InvalidInput` for unknown, reserved or repeated columns and
    /// when the source column is absent (no row is written), whether or not
    /// the table has a `sort_value` column. `NotFound` for an unknown topic.
    pub fn insert_entry(&self, topic: &Identifier, values: &[(String, String)]) -> Result<i64> {
        let conn = get_conn(&self.pool)?;
        let shape = TableShape::load(&conn, topic)?;

        let mut columns: Vec<&str> = Vec::with_capacity(values.len() + 1);
        let mut bound: Vec<String> = Vec::with_capacity(values.len() + 1);
        for (name, value) in values {
            let column = shape.find_column(name).ok_or_else(|| {
                StorageError::InvalidInput(format!("topic '{topic}' has no column '{name}'"))
            })?;
            if is_reserved_column(column) {
                return Err(StorageError::InvalidInput(format!(
                    "column '{column}' is managed automatically"
                )));
            }
            if columns.contains(&column) {
                return Err(StorageError::InvalidInput(format!("column '{column}' given twice")));
            }
            columns.push(column);
            bound.push(value.clone());
        }

        let source = shape.source_column()?;
        let source_value = columns.iter().position(|c| *c == source).map(|i| bound[i].as_str());
        let key = sort_key_for(source_value).map_err(|_| {
            StorageError::InvalidInput(format!("a value for '{source}' is required"))
        })?;
        if shape.has_sort_value() {
            columns.push(SORT_VALUE_COLUMN);
            bound.push(key);
        }

        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            topic.quoted(),
            columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(", "),
            placeholders.join(", ")
        );
        conn.execute(&sql, params_from_iter(bound.iter()))?;
        let id = conn.last_insert_rowid();

        tracing::info!(topic = %topic, id, "entry added");
        Ok(id)
    }

    /// Set one column of the first entry whose source column equals
    /// `edit.expression`; returns the id of the edited row.
    ///
    /// Changing the source column recomputes `sort_value` in the same
    /// transaction.
    ///
    /// # Errors
    /// Returns `NotFound` when the topic or a matching entry does not exist,
    /// `InvalidInput` for unknown or reserved columns.
    pub fn edit_entry(&self, topic: &Identifier, edit: &EntryEdit) -> Result<i64> {
        let mut conn = get_conn(&self.pool)?;
        let shape = TableShape::load(&conn, topic)?;
        let source = shape.source_column()?.to_owned();

        let column = shape.find_column(&edit.column).ok_or_else(|| {
            StorageError::InvalidInput(format!("topic '{topic}' has no column '{}'", edit.column))
        })?;
        if is_reserved_column(column) {
            return Err(StorageError::InvalidInput(format!(
                "column '{column}' is managed automatically"
            )));
        }
        let column = column.to_owned();

        let tx = conn.transaction()?;
        let id: i64 = tx
            .query_row(
                &format!(
                    "SELECT rowid FROM {} WHERE {} = ?1 ORDER BY rowid LIMIT 1",
                    topic.quoted(),
                    quote_ident(&source)
                ),
                params![edit.expression],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| StorageError::NotFound {
                entity: "entry",
                id: edit.expression.clone(),
            })?;

        if column == source && shape.has_sort_value() {
            tx.execute(
                &format!(
                    "UPDATE {} SET {} = ?1, {SORT_VALUE_COLUMN} = ?2 WHERE rowid = ?3",
                    topic.quoted(),
                    quote_ident(&column)
                ),
                params![edit.value, sort_key(&edit.value), id],
            )?;
        } else {
            tx.execute(
                &format!(
                    "UPDATE {} SET {} = ?1 WHERE rowid = ?2",
                    topic.quoted(),
                    quote_ident(&column)
                ),
                params![edit.value, id],
            )?;
        }
        tx.commit()?;

        tracing::info!(topic = %topic, id, column = %column, "entry edited");
        Ok(id)
    }
}
