use std::sync::Arc;

use axum::{
    Form,
    extract::{Path, State},
};
use tempfile::TempDir;
use wortschatz_core::AppConfig;

use super::{api, entries, topics};
use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::EditForm;

fn test_config(dir: &std::path::Path, dump_on_write: bool) -> AppConfig {
    let mut config = AppConfig::default();
    config.paths.database = dir.join("german.db");
    config.paths.translations = dir.join("translations.toml");
    config.paths.dump = dir.join("dump");
    config.storage.dump_on_write = dump_on_write;
    config
}

#[expect(clippy::unwrap_used, reason = "test code")]
fn create_test_state(dump_on_write: bool) -> (Arc<AppState>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), dump_on_write);
    (Arc::new(AppState::open(config).unwrap()), dir)
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

#[expect(clippy::unwrap_used, reason = "test code")]
async fn create_nouns(state: &Arc<AppState>) {
    topics::create_topic(
        State(Arc::clone(state)),
        Form(pairs(&[
            ("table_name", "nouns"),
            ("translation", "Nomen"),
            ("column_0", "noun"),
            ("column_1", "meaning"),
        ])),
    )
    .await
    .unwrap();
}

#[expect(clippy::unwrap_used, reason = "test code")]
async fn add_noun(state: &Arc<AppState>, noun: &str, meaning: &str) {
    entries::add_entry(
        State(Arc::clone(state)),
        Path("nouns".to_owned()),
        Form(pairs(&[("noun", noun), ("meaning", meaning)])),
    )
    .await
    .unwrap();
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack.find(needle).unwrap_or_else(|| panic!("{needle} not rendered"))
}

#[tokio::test]
async fn created_topic_is_listed_with_label() {
    let (state, _dir) = create_test_state(false);
    create_nouns(&state).await;

    let html = topics::home(State(Arc::clone(&state))).await.unwrap().0;
    assert!(html.contains("href=\"/topics/nouns\""));
    assert!(html.contains("Nomen"));
    assert_eq!(state.translations.label_for("nouns"), "Nomen");
}

#[tokio::test]
async fn hand_edited_labels_show_without_restart() {
    let (state, dir) = create_test_state(false);
    create_nouns(&state).await;
    std::fs::write(dir.path().join("translations.toml"), "nouns = \"Hauptwörter\"\n").unwrap();

    let html = topics::home(State(Arc::clone(&state))).await.unwrap().0;
    assert!(html.contains("Hauptwörter"));
    assert!(!html.contains("Nomen"));

    let table = super::load_table(&state, "nouns").await.unwrap();
    assert_eq!(table.topic.label, "Hauptwörter");
}

#[tokio::test]
async fn unreadable_translations_keep_loaded_labels() {
    let (state, dir) = create_test_state(false);
    create_nouns(&state).await;
    std::fs::write(dir.path().join("translations.toml"), "nouns = [1, 2").unwrap();

    let list = api::list_topics(State(state)).await.unwrap().0;
    assert_eq!(list.topics[0].label, "Nomen");
}

#[tokio::test]
async fn failed_label_write_creates_no_table() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let mut config = test_config(dir.path(), false);
    config.paths.translations = blocker.join("translations.toml");
    let state = Arc::new(AppState::open(config).unwrap());

    let result = topics::create_topic(
        State(Arc::clone(&state)),
        Form(pairs(&[("table_name", "nouns"), ("translation", "Nomen"), ("column_0", "noun")])),
    )
    .await;
    assert!(matches!(result, Err(ApiError::Internal(_))));
    assert!(state.storage.list_topics().unwrap().is_empty());
}

#[tokio::test]
async fn create_topic_rejects_bad_name() {
    let (state, _dir) = create_test_state(false);
    let result = topics::create_topic(
        State(state),
        Form(pairs(&[("table_name", "drop table"), ("column_0", "noun")])),
    )
    .await;
    assert!(matches!(result, Err(ApiError::BadRequest(_))));
}

#[tokio::test]
async fn create_topic_requires_a_column() {
    let (state, _dir) = create_test_state(false);
    let result =
        topics::create_topic(State(state), Form(pairs(&[("table_name", "nouns"), ("column_0", " ")])))
            .await;
    assert!(matches!(result, Err(ApiError::BadRequest(_))));
}

#[tokio::test]
async fn table_is_sorted_by_normalized_noun() {
    let (state, _dir) = create_test_state(false);
    create_nouns(&state).await;
    add_noun(&state, "die Katze", "cat").await;
    add_noun(&state, "der Apfel", "apple").await;
    add_noun(&state, "das Haus", "house").await;

    let html =
        topics::show_topic(State(state), Path("nouns".to_owned())).await.unwrap().0;
    let apfel = position(&html, "der Apfel");
    let haus = position(&html, "das Haus");
    let katze = position(&html, "die Katze");
    assert!(apfel < haus && haus < katze);
    assert!(!html.contains("sort_value"));
}

#[tokio::test]
async fn entry_text_is_escaped() {
    let (state, _dir) = create_test_state(false);
    create_nouns(&state).await;
    add_noun(&state, "<script>x</script>", "a & b").await;

    let html =
        topics::show_topic(State(state), Path("nouns".to_owned())).await.unwrap().0;
    assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
    assert!(html.contains("a &amp; b"));
    assert!(!html.contains("<script>"));
}

#[tokio::test]
async fn add_without_source_value_is_rejected() {
    let (state, _dir) = create_test_state(false);
    create_nouns(&state).await;

    let result = entries::add_entry(
        State(Arc::clone(&state)),
        Path("nouns".to_owned()),
        Form(pairs(&[("noun", "   "), ("meaning", "nothing")])),
    )
    .await;
    assert!(matches!(result, Err(ApiError::BadRequest(_))));

    let table = super::load_table(&state, "nouns").await.unwrap();
    assert!(table.entries.is_empty());
}

#[tokio::test]
async fn unknown_topics_are_not_found() {
    let (state, _dir) = create_test_state(false);

    let missing = topics::show_topic(State(Arc::clone(&state)), Path("verbs".to_owned())).await;
    assert!(matches!(missing, Err(ApiError::NotFound(_))));

    let invalid = entries::add_form(State(state), Path("no-such-topic".to_owned())).await;
    assert!(matches!(invalid, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn add_form_lists_data_columns() {
    let (state, _dir) = create_test_state(false);
    create_nouns(&state).await;

    let html = entries::add_form(State(state), Path("nouns".to_owned())).await.unwrap().0;
    assert!(html.contains("name=\"noun\""));
    assert!(html.contains("name=\"meaning\""));
    assert!(!html.contains("name=\"sort_value\""));
    assert!(!html.contains("name=\"id\""));
}

#[tokio::test]
async fn editing_source_column_reorders_table() {
    let (state, _dir) = create_test_state(false);
    create_nouns(&state).await;
    add_noun(&state, "die Katze", "cat").await;
    add_noun(&state, "der Hund", "dog").await;

    entries::edit_entry(
        State(Arc::clone(&state)),
        Path("nouns".to_owned()),
        Form(EditForm {
            expression: "die Katze".to_owned(),
            column: "noun".to_owned(),
            value: "die Ameise".to_owned(),
        }),
    )
    .await
    .unwrap();

    let table = super::load_table(&state, "nouns").await.unwrap();
    let nouns: Vec<_> = table.entries.iter().filter_map(|e| e.get("noun")).collect();
    assert_eq!(nouns, vec!["die Ameise", "der Hund"]);
    assert_eq!(table.entries[0].get("sort_value"), Some("ameise"));
}

#[tokio::test]
async fn editing_missing_entry_is_not_found() {
    let (state, _dir) = create_test_state(false);
    create_nouns(&state).await;

    let result = entries::edit_entry(
        State(state),
        Path("nouns".to_owned()),
        Form(EditForm {
            expression: "das Nichts".to_owned(),
            column: "meaning".to_owned(),
            value: "nothing".to_owned(),
        }),
    )
    .await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn edit_requires_expression_and_column() {
    let (state, _dir) = create_test_state(false);
    create_nouns(&state).await;

    let result = entries::edit_entry(
        State(state),
        Path("nouns".to_owned()),
        Form(EditForm { expression: String::new(), column: "meaning".to_owned(), value: "x".to_owned() }),
    )
    .await;
    assert!(matches!(result, Err(ApiError::BadRequest(_))));
}

#[tokio::test]
async fn writes_refresh_dump_when_enabled() {
    let (state, dir) = create_test_state(true);
    create_nouns(&state).await;
    add_noun(&state, "die Katze", "cat").await;

    let dump = std::fs::read(dir.path().join("dump").join("nouns.csv")).unwrap();
    assert!(dump.starts_with(b"\xEF\xBB\xBF"));
    assert!(String::from_utf8_lossy(&dump).contains("die Katze"));
}

#[tokio::test]
async fn no_dump_when_disabled() {
    let (state, dir) = create_test_state(false);
    create_nouns(&state).await;
    add_noun(&state, "die Katze", "cat").await;

    assert!(!dir.path().join("dump").exists());
}

#[tokio::test]
async fn api_returns_topics_and_table() {
    let (state, _dir) = create_test_state(false);
    create_nouns(&state).await;
    add_noun(&state, "die Katze", "cat").await;

    let list = api::list_topics(State(Arc::clone(&state))).await.unwrap().0;
    assert_eq!(list.count, 1);
    assert_eq!(list.topics[0].label, "Nomen");

    let table = api::get_topic(State(state), Path("nouns".to_owned())).await.unwrap().0;
    assert_eq!(table.topic.name.as_str(), "nouns");
    assert_eq!(table.entries.len(), 1);
    assert_eq!(table.entries[0].get("meaning"), Some("cat"));
}
