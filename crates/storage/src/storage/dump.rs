use std::fs::File;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use wortschatz_core::Identifier;

use super::{Storage, TableShape, get_conn, quote_ident, value_to_text};
use crate::error::{Result, StorageError};

/// UTF-8 byte-order mark, so spreadsheet tools detect the encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

impl Storage {
    /// Write `<dir>/<topic>.csv`: header row, then every row by id.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown topic or error if the file cannot be
    /// written.
    pub fn dump_table(&self, topic: &Identifier, dir: &Path) -> Result<PathBuf> {
        let conn = get_conn(&self.pool)?;
        let shape = TableShape::load(&conn, topic)?;

        let sql = format!(
            "SELECT {} FROM {} ORDER BY rowid",
            shape.columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(", "),
            topic.quoted()
        );
        let mut stmt = conn.prepare(&sql)?;
        let width = shape.columns.len();
        let rows = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|i| Ok(value_to_text(row.get_ref(i)?).unwrap_or_default()))
                    .collect::<rusqlite::Result<Vec<String>>>()
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{topic}.csv"));
        let to_dump_error = |source: csv::Error| StorageError::Dump { path: path.clone(), source };

        let mut file = File::create(&path)?;
        file.write_all(UTF8_BOM)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(&shape.columns).map_err(to_dump_error)?;
        for row in &rows {
            writer.write_record(row).map_err(to_dump_error)?;
        }
        writer.flush()?;

        tracing::debug!(topic = %topic, rows = rows.len(), path = %path.display(), "table dumped");
        Ok(path)
    }

    /// Dump every topic into `dir`.
    ///
    /// # Errors
    /// Returns the first dump failure.
    pub fn dump_all(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        self.list_topics()?.iter().map(|topic| self.dump_table(topic, dir)).collect()
    }
}
