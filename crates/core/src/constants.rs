//! Shared constants for wortschatz.

/// Primary key column present in every topic table.
pub const ID_COLUMN: &str = "id";

/// Derived column holding the normalized sort key of the source column.
pub const SORT_VALUE_COLUMN: &str = "sort_value";

/// Maximum number of data columns offered by the new-topic form.
pub const MAX_NEW_TOPIC_COLUMNS: usize = 10;

/// Maximum length of a table or column name.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Default HTTP port for `wortschatz serve`.
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address for `wortschatz serve`.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default `SQLite` connection pool size.
pub const DEFAULT_POOL_SIZE: u32 = 4;

/// Application directory name under the platform config/data dirs.
pub const APP_DIR_NAME: &str = "wortschatz";
