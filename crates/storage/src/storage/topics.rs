use wortschatz_core::{ID_COLUMN, Identifier, NewTopic, SORT_VALUE_COLUMN};

use super::{Storage, TableShape, get_conn, log_row_error, quote_ident};
use crate::error::{Result, StorageError};

impl Storage {
    /// List topic tables, sorted by name.
    ///
    /// Tables whose names are not valid identifiers were not created by us
    /// and are skipped.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_topics(&self) -> Result<Vec<Identifier>> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master
               WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\'
               ORDER BY name",
        )?;
        let topics = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .filter_map(log_row_error)
            .filter_map(|name| match Identifier::new(&name) {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::warn!(table = %name, error = %e, "skipping table with unusable name");
                    None
                },
            })
            .collect();
        Ok(topics)
    }

    /// Create a topic table: `id`, the given columns (first one `NOT NULL`),
    /// then `sort_value`. Creating an existing topic is a no-op.
    ///
    /// # Errors
    /// Returns error if the topic has no columns or the statement fails.
    pub fn create_topic(&self, topic: &NewTopic) -> Result<()> {
        let Some((first, rest)) = topic.columns.split_first() else {
            return Err(StorageError::InvalidInput(format!(
                "topic '{}' needs at least one column",
                topic.name
            )));
        };

        let mut definitions = vec![
            format!("{ID_COLUMN} INTEGER PRIMARY KEY"),
            format!("{} TEXT NOT NULL", first.quoted()),
        ];
        definitions.extend(rest.iter().map(|c| format!("{} TEXT", c.quoted())));
        definitions.push(format!("{SORT_VALUE_COLUMN} TEXT"));

        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            topic.name.quoted(),
            definitions.join(", ")
        );

        let conn = get_conn(&self.pool)?;
        conn.execute(&sql, [])?;
        conn.execute(
            &format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({SORT_VALUE_COLUMN})",
                quote_ident(&format!("idx_{}_sort", topic.name)),
                topic.name.quoted()
            ),
            [],
        )?;

        tracing::info!(topic = %topic.name, columns = topic.columns.len(), "topic table ready");
        Ok(())
    }

    /// Column names of a topic in declaration order.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown topic.
    pub fn get_columns(&self, topic: &Identifier) -> Result<Vec<String>> {
        let conn = get_conn(&self.pool)?;
        Ok(TableShape::load(&conn, topic)?.columns)
    }

    /// Columns a user fills in when adding an entry.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown topic.
    pub fn data_columns(&self, topic: &Identifier) -> Result<Vec<String>> {
        let conn = get_conn(&self.pool)?;
        Ok(TableShape::load(&conn, topic)?.data_columns())
    }
}
