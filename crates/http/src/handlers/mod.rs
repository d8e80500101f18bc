#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod api;
pub mod entries;
pub mod topics;

#[cfg(test)]
mod tests;

use std::path::Path;

use wortschatz_core::{Identifier, Topic, TopicTable};
use wortschatz_storage::{Storage, TranslationStore};

use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::blocking_result;

/// A path segment that is not a valid identifier cannot name a table.
pub(crate) fn parse_topic(raw: &str) -> Result<Identifier, ApiError> {
    Identifier::new(raw).map_err(|_| ApiError::NotFound(format!("topic '{raw}' not found")))
}

/// Re-read the translations document so hand edits show up. On failure the
/// labels already loaded stay in use.
pub(crate) fn refresh_labels(translations: &TranslationStore) {
    if let Err(e) = translations.reload() {
        tracing::warn!(error = %e, "translations reload failed, keeping loaded labels");
    }
}

/// All topics with their current labels.
pub(crate) async fn load_topics(state: &AppState) -> Result<Vec<Topic>, ApiError> {
    let storage = state.storage.clone();
    let translations = state.translations.clone();
    let names = blocking_result(move || {
        refresh_labels(&translations);
        storage.list_topics()
    })
    .await?;
    Ok(names.into_iter().map(|name| state.topic(name)).collect())
}

pub(crate) async fn load_table(state: &AppState, raw: &str) -> Result<TopicTable, ApiError> {
    let name = parse_topic(raw)?;
    let storage = state.storage.clone();
    let translations = state.translations.clone();
    let key = name.clone();
    let (columns, entries) = blocking_result(move || {
        refresh_labels(&translations);
        storage.read_table(&key)
    })
    .await?;
    Ok(TopicTable { topic: state.topic(name), columns, entries })
}

/// Refresh the CSV dump of `topic` after a write. Failures are logged only.
pub(crate) fn dump_after_write(storage: &Storage, dump_dir: Option<&Path>, topic: &Identifier) {
    let Some(dir) = dump_dir else {
        return;
    };
    if let Err(e) = storage.dump_table(topic, dir) {
        tracing::warn!(topic = %topic, error = %e, "dump after write failed");
    }
}
