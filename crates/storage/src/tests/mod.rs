//! Test utilities and module declarations for storage tests.

use crate::Storage;
use tempfile::TempDir;
use wortschatz_core::{Identifier, NewTopic};

mod sort_value_tests;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path, 2).unwrap();
    (storage, temp_dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn ident(name: &str) -> Identifier {
    Identifier::new(name).unwrap()
}

/// `nouns(noun NOT NULL, plural, meaning, sort_value)`
#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_nouns(storage: &Storage) -> Identifier {
    let topic = NewTopic::parse("nouns", "Nomen", ["noun", "plural", "meaning"]).unwrap();
    storage.create_topic(&topic).unwrap();
    topic.name
}

pub fn noun(noun: &str, meaning: &str) -> Vec<(String, String)> {
    vec![("noun".to_owned(), noun.to_owned()), ("meaning".to_owned(), meaning.to_owned())]
}

/// Run raw SQL against the test database, bypassing `Storage`.
#[expect(clippy::unwrap_used, reason = "test code")]
pub fn raw_execute(storage: &Storage, sql: &str) {
    let conn = storage.pool.get().unwrap();
    conn.execute_batch(sql).unwrap();
}
