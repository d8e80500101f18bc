use rusqlite::{Connection, params};
use wortschatz_core::{Identifier, SORT_VALUE_COLUMN, sort_key_for};

use super::{Storage, TableShape, get_conn, quote_ident, value_to_text};
use crate::error::{Result, StorageError};

fn add_column_if_not_exists(
    conn: &Connection,
    shape: &TableShape,
    column: &str,
    col_type: &str,
) -> Result<bool> {
    if shape.find_column(column).is_some() {
        return Ok(false);
    }
    let sql = format!("ALTER TABLE {} ADD COLUMN {} {}", shape.table.quoted(), column, col_type);
    conn.execute(&sql, [])?;
    Ok(true)
}

impl Storage {
    /// Add `sort_value` to a topic if it lacks one, then recompute the key of
    /// every row. Returns the number of rows updated.
    ///
    /// Runs in one transaction: a row with no source value aborts the whole
    /// backfill, including the added column.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown topic, `InvalidInput` when a source
    /// value is missing.
    pub fn backfill_sort_values(&self, topic: &Identifier) -> Result<usize> {
        let mut conn = get_conn(&self.pool)?;
        let shape = TableShape::load(&conn, topic)?;
        let source = shape.source_column()?.to_owned();

        let tx = conn.transaction()?;
        if add_column_if_not_exists(&tx, &shape, SORT_VALUE_COLUMN, "TEXT")? {
            tracing::info!(topic = %topic, "added {SORT_VALUE_COLUMN} column");
        }

        let rows: Vec<(i64, Option<String>)> = {
            let mut stmt = tx.prepare(&format!(
                "SELECT rowid, {} FROM {} ORDER BY rowid",
                quote_ident(&source),
                topic.quoted()
            ))?;
            stmt.query_map([], |row| Ok((row.get(0)?, value_to_text(row.get_ref(1)?))))?
                .collect::<rusqlite::Result<Vec<_>>>()?
        };

        {
            let mut update = tx.prepare(&format!(
                "UPDATE {} SET {SORT_VALUE_COLUMN} = ?1 WHERE rowid = ?2",
                topic.quoted()
            ))?;
            for (id, value) in &rows {
                let key = sort_key_for(value.as_deref()).map_err(|_| {
                    StorageError::InvalidInput(format!(
                        "row {id} of '{topic}' has no value in '{source}'"
                    ))
                })?;
                update.execute(params![key, id])?;
            }
        }
        tx.commit()?;

        tracing::info!(topic = %topic, rows = rows.len(), "sort values rebuilt");
        Ok(rows.len())
    }
}
