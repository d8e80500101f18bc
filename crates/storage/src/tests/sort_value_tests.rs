use super::{create_nouns, create_test_storage, ident, noun, raw_execute};
use crate::StorageError;

#[test]
fn test_backfill_adds_column_and_computes_keys() {
    let (storage, _temp_dir) = create_test_storage();
    raw_execute(
        &storage,
        "CREATE TABLE verbs (id INTEGER PRIMARY KEY, infinitive TEXT NOT NULL, meaning TEXT);
         INSERT INTO verbs (infinitive, meaning) VALUES ('sich verlieben', 'to fall in love');
         INSERT INTO verbs (infinitive, meaning) VALUES ('gehen', 'to go');
         INSERT INTO verbs (infinitive, meaning) VALUES ('üben', 'to practise');",
    );
    let topic = ident("verbs");

    assert_eq!(storage.backfill_sort_values(&topic).unwrap(), 3);

    let columns = storage.get_columns(&topic).unwrap();
    assert_eq!(columns.last().map(String::as_str), Some("sort_value"));

    let keys: Vec<(String, String)> = storage
        .list_entries(&topic)
        .unwrap()
        .iter()
        .map(|e| {
            (
                e.get("infinitive").unwrap_or_default().to_owned(),
                e.get("sort_value").unwrap_or_default().to_owned(),
            )
        })
        .collect();
    assert_eq!(
        keys,
        [
            ("gehen".to_owned(), "gehen".to_owned()),
            ("üben".to_owned(), "uben".to_owned()),
            ("sich verlieben".to_owned(), "verlieben".to_owned()),
        ]
    );
}

#[test]
fn test_backfill_rebuilds_stale_keys() {
    let (storage, _temp_dir) = create_test_storage();
    let topic = create_nouns(&storage);
    storage.insert_entry(&topic, &noun("die Katze", "cat")).unwrap();
    raw_execute(&storage, "UPDATE nouns SET sort_value = 'zzz';");

    assert_eq!(storage.backfill_sort_values(&topic).unwrap(), 1);
    assert_eq!(storage.list_entries(&topic).unwrap()[0].get("sort_value"), Some("katze"));
}

#[test]
fn test_backfill_aborts_on_missing_source_value() {
    let (storage, _temp_dir) = create_test_storage();
    raw_execute(
        &storage,
        "CREATE TABLE phrases (id INTEGER PRIMARY KEY, phrase TEXT, meaning TEXT);
         INSERT INTO phrases (phrase, meaning) VALUES ('die Uhr', 'clock');
         INSERT INTO phrases (phrase, meaning) VALUES (NULL, 'orphan');",
    );
    let topic = ident("phrases");

    let err = storage.backfill_sort_values(&topic).unwrap_err();
    assert!(matches!(err, StorageError::InvalidInput(_)));

    // rolled back, including the added column
    assert_eq!(storage.get_columns(&topic).unwrap(), ["id", "phrase", "meaning"]);
}

#[test]
fn test_backfill_on_empty_topic() {
    let (storage, _temp_dir) = create_test_storage();
    let topic = create_nouns(&storage);
    assert_eq!(storage.backfill_sort_values(&topic).unwrap(), 0);
}

#[test]
fn test_backfill_unknown_topic() {
    let (storage, _temp_dir) = create_test_storage();
    let err = storage.backfill_sort_values(&ident("nothing")).unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}
