//! Display labels for topics.
//!
//! Kept in a TOML document next to the database (`verbs = "Verben"`), so
//! labels can be edited by hand as well as through the new-topic form.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Result, StorageError};

/// Topic name → display label, backed by a TOML file.
#[derive(Debug)]
pub struct TranslationStore {
    path: PathBuf,
    labels: Mutex<BTreeMap<String, String>>,
}

impl TranslationStore {
    /// Load the document at `path`; a missing file is an empty document.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn open(path: &Path) -> Result<Self> {
        let labels = read_labels(path)?;
        tracing::debug!(path = %path.display(), count = labels.len(), "translations loaded");
        Ok(Self { path: path.to_owned(), labels: Mutex::new(labels) })
    }

    /// Re-read the document from disk, picking up manual edits.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn reload(&self) -> Result<()> {
        let mut labels = self.lock();
        *labels = read_labels(&self.path)?;
        Ok(())
    }

    /// The label of `topic`, or the topic name itself when none is stored.
    #[must_use]
    pub fn label_for(&self, topic: &str) -> String {
        self.lock().get(topic).cloned().unwrap_or_else(|| topic.to_owned())
    }

    /// Store a label and write the document back. The document is re-read
    /// first so hand edits made since the last load are kept.
    ///
    /// # Errors
    /// Returns error if the document cannot be read or written; the in-memory
    /// labels are left unchanged in that case.
    pub fn set(&self, topic: &str, label: &str) -> Result<()> {
        let mut labels = self.lock();
        let mut updated = read_labels(&self.path)?;
        updated.insert(topic.to_owned(), label.to_owned());
        write_labels(&self.path, &updated)?;
        *labels = updated;
        tracing::info!(topic, label, "translation stored");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.labels.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn translations_error(path: &Path, message: impl ToString) -> StorageError {
    StorageError::Translations { path: path.to_owned(), message: message.to_string() }
}

fn read_labels(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| translations_error(path, e))
}

fn write_labels(path: &Path, labels: &BTreeMap<String, String>) -> Result<()> {
    let content = toml::to_string(labels).map_err(|e| translations_error(path, e))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranslationStore::open(&dir.path().join("translations.toml")).unwrap();
        assert_eq!(store.label_for("verbs"), "verbs");
    }

    #[test]
    fn set_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("translations.toml");
        let store = TranslationStore::open(&path).unwrap();
        store.set("verbs", "Verben").unwrap();
        store.set("nouns", "Nomen").unwrap();

        let reopened = TranslationStore::open(&path).unwrap();
        assert_eq!(reopened.label_for("verbs"), "Verben");
        assert_eq!(reopened.label_for("nouns"), "Nomen");
    }

    #[test]
    fn reads_hand_written_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.toml");
        std::fs::write(&path, "adjectives = \"Adjektive\"\n\"two words\" = \"Zwei Wörter\"\n")
            .unwrap();
        let store = TranslationStore::open(&path).unwrap();
        assert_eq!(store.label_for("adjectives"), "Adjektive");
        assert_eq!(store.label_for("two words"), "Zwei Wörter");
    }

    #[test]
    fn reload_picks_up_manual_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.toml");
        let store = TranslationStore::open(&path).unwrap();
        std::fs::write(&path, "verbs = \"Verben\"\n").unwrap();
        assert_eq!(store.label_for("verbs"), "verbs");
        store.reload().unwrap();
        assert_eq!(store.label_for("verbs"), "Verben");
    }

    #[test]
    fn set_keeps_labels_edited_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.toml");
        let store = TranslationStore::open(&path).unwrap();
        std::fs::write(&path, "verbs = \"Verben\"\n").unwrap();
        store.set("nouns", "Nomen").unwrap();

        assert_eq!(store.label_for("verbs"), "Verben");
        let reopened = TranslationStore::open(&path).unwrap();
        assert_eq!(reopened.label_for("verbs"), "Verben");
        assert_eq!(reopened.label_for("nouns"), "Nomen");
    }

    #[test]
    fn malformed_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.toml");
        std::fs::write(&path, "verbs = [1, 2").unwrap();
        let err = TranslationStore::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Translations { .. }));
    }
}
