//! Sort-key normalization for vocabulary entries.
//!
//! Entries are stored with a derived `sort_value` so that
//! "die Katze", "sich verlieben" and "übung" order by their stem rather
//! than by article, reflexive pronoun or diacritic.
//!
//! Transliteration uses the `deunicode` table: "ä"→"a", "ö"→"o",
//! "ü"→"u", "ß"→"ss", and typographic apostrophes become `'` (which is
//! then removed).

use crate::{Result, VocabError};

/// Reflexive marker stripped from the front of verbs.
pub const REFLEXIVE_MARKER: &str = "sich ";

/// Definite articles stripped from the front of nouns.
pub const ARTICLES: [&str; 3] = ["der ", "die ", "das "];

/// Characters removed anywhere in the key.
pub const APOSTROPHES: [char; 1] = ['\''];

/// Compute the sort key of a display string.
///
/// Steps, in order: lowercase, transliterate to ASCII, strip one leading
/// marker (`sich ` or else one of the articles), remove apostrophes.
/// At most one leading marker is removed: "sich der X" keeps its article.
#[must_use]
pub fn sort_key(expression: &str) -> String {
    let lowered = expression.to_lowercase();
    // a handful of symbols transliterate to uppercase ASCII ("№" -> "No")
    let ascii = deunicode::deunicode(&lowered).to_ascii_lowercase();
    let stem = strip_leading_marker(&ascii);
    remove_apostrophes(stem)
}

/// Compute the sort key of a possibly absent source value.
///
/// Storage reads the source column as `Option<String>`; a `NULL` source
/// must reject the write rather than persist an empty key.
///
/// # Errors
/// Returns [`VocabError::InvalidInput`] when `expression` is `None`.
pub fn sort_key_for(expression: Option<&str>) -> Result<String> {
    expression
        .map(sort_key)
        .ok_or_else(|| VocabError::InvalidInput("sort key source value is missing".to_owned()))
}

fn strip_leading_marker(expression: &str) -> &str {
    if let Some(rest) = expression.strip_prefix(REFLEXIVE_MARKER) {
        return rest;
    }
    ARTICLES
        .iter()
        .find_map(|article| expression.strip_prefix(article))
        .unwrap_or(expression)
}

fn remove_apostrophes(expression: &str) -> String {
    expression.chars().filter(|c| !APOSTROPHES.contains(c)).collect()
}
