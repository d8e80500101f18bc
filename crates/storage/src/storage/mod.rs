//! `SQLite` storage implementation
//!
//! One table per topic. Table and column names are either validated
//! [`Identifier`]s or names read back from the schema; data values are
//! always bound parameters.

mod dump;
mod entries;
mod sort_values;
mod topics;

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, params};
use wortschatz_core::{AppConfig, ID_COLUMN, Identifier, SORT_VALUE_COLUMN, is_reserved_column};

use crate::error::{Result, StorageError};

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn> {
    Ok(pool.get()?)
}

/// Log row read errors and filter them out
pub(crate) fn log_row_error<T>(result: rusqlite::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Row read error: {}", e);
            None
        },
    }
}

/// Quote a name read back from the schema for use in statement text.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Render any stored value as text; topic tables are `TEXT` but older
/// tables may hold numbers.
pub(crate) fn value_to_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    }
}

/// Column layout of one topic table as reported by `pragma_table_info`.
#[derive(Debug, Clone)]
pub(crate) struct TableShape {
    pub(crate) table: Identifier,
    pub(crate) columns: Vec<String>,
}

impl TableShape {
    pub(crate) fn load(conn: &Connection, table: &Identifier) -> Result<Self> {
        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;
        let columns = stmt
            .query_map(params![table.as_str()], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        if columns.is_empty() {
            return Err(StorageError::topic_not_found(table.as_str()));
        }
        Ok(Self { table: table.clone(), columns })
    }

    /// Resolve a user-supplied column name to the schema's spelling.
    pub(crate) fn find_column(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.columns.iter().map(String::as_str).find(|c| c.eq_ignore_ascii_case(name))
    }

    pub(crate) fn has_sort_value(&self) -> bool {
        self.find_column(SORT_VALUE_COLUMN).is_some()
    }

    /// Columns users fill in: everything but `id` and `sort_value`.
    pub(crate) fn data_columns(&self) -> Vec<String> {
        self.columns.iter().filter(|c| !is_reserved_column(c)).cloned().collect()
    }

    /// The first data column; its value feeds `sort_value`.
    pub(crate) fn source_column(&self) -> Result<&str> {
        self.columns.iter().map(String::as_str).find(|c| !is_reserved_column(c)).ok_or_else(|| {
            StorageError::InvalidInput(format!("topic '{}' has no data column", self.table))
        })
    }

    /// Columns returned as entry values: everything but `id`.
    pub(crate) fn value_columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str).filter(|c| !c.eq_ignore_ascii_case(ID_COLUMN))
    }
}

/// Custom connection initializer for concurrency settings
fn init_connection(conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;",
    )?;
    Ok(())
}

impl Storage {
    /// Create new storage instance with `SQLite` connection pool
    ///
    /// # Errors
    /// Returns error if the pool cannot open the database file.
    pub fn new(db_path: &Path, pool_size: u32) -> Result<Self> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;

        tracing::info!(
            path = %db_path.display(),
            pool_size = pool_size,
            "Storage initialized with connection pool"
        );

        Ok(Self { pool })
    }

    /// Open the database named in `config`, creating its directory if needed.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created or the pool fails.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let db_path = &config.paths.database;
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::new(db_path, config.storage.pool_size)
    }
}
