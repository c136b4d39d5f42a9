//! Localized UI strings.
//!
//! `translations.json` maps a language name to a table of UI keys. Lookups fall
//! back from the exact language, to the English table in the file, to the built-in
//! English default, and finally to the raw key.

use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};

use tracing::{info, warn};

use crate::{language::CANONICAL_LANGUAGE, storage};

/// Built-in English strings, used when the catalog file lacks a key.
const DEFAULT_STRINGS: &[(&str, &str)] = &[
    ("app_title", "STIAB Assistant"),
    ("select_system", "Select your system"),
    ("not_sure", "I'm not sure"),
    ("describe_issue", "Please describe your issue"),
    ("describe_issue_placeholder", "Type here..."),
    ("speak_issue", "Speak your issue below:"),
    ("transcribed", "Transcribed"),
    ("processing_query", "Processing your query..."),
    ("best_match", "Best Match"),
    ("good_match", "Good Match"),
    ("possible_match", "Possible Match"),
    ("what_to_try", "What to Try First"),
    ("when_to_call", "When to Call Support"),
    ("no_results", "No results found"),
    ("did_this_help", "Did this solve your problem?"),
    ("resolved", "Great! Glad that fixed it."),
    (
        "exhausted",
        "We've run out of suggestions. Please contact support.",
    ),
    (
        "translation_unavailable",
        "Translation is unavailable right now; showing the original text.",
    ),
    (
        "explanation_unavailable",
        "A guided explanation is unavailable right now; showing the troubleshooting steps as written.",
    ),
    ("transcription_failed", "Transcription failed"),
    (
        "query_not_translated",
        "Your description could not be translated; searching with it as typed.",
    ),
    ("data_load_warning", "Some data could not be loaded"),
];

#[derive(Debug, Clone, Default)]
pub struct UiStrings {
    catalog: HashMap<String, HashMap<String, String>>,
    load_warning: Option<String>,
}

impl UiStrings {
    /// Only the built-in English strings.
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: HashMap<String, HashMap<String, String>>) -> Self {
        Self {
            catalog,
            load_warning: None,
        }
    }

    /// Reads the catalog file; on any failure keeps the built-in strings and a warning.
    pub async fn load(path: &Path) -> Self {
        match storage::read_json::<HashMap<String, HashMap<String, String>>>(path).await {
            Ok(catalog) => {
                info!("Loaded UI strings for {} language(s)", catalog.len());
                Self::from_catalog(catalog)
            }
            Err(err) => {
                warn!("UI strings unavailable, using built-in English: {}", err);
                Self {
                    catalog: HashMap::new(),
                    load_warning: Some(err.to_string()),
                }
            }
        }
    }

    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// Resolves `key` for `language`: exact language, English, built-in default, raw key.
    pub fn resolve(&self, language: &str, key: &str) -> String {
        self.lookup(language, key)
            .or_else(|| self.lookup(CANONICAL_LANGUAGE, key))
            .or_else(|| default_string(key))
            .unwrap_or(key)
            .to_string()
    }

    fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        self.catalog
            .get(language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Every known key resolved for `language`.
    pub fn resolve_all(&self, language: &str) -> BTreeMap<String, String> {
        let mut keys: Vec<&str> = DEFAULT_STRINGS.iter().map(|(key, _)| *key).collect();
        for table in [self.catalog.get(CANONICAL_LANGUAGE), self.catalog.get(language)]
            .into_iter()
            .flatten()
        {
            keys.extend(table.keys().map(String::as_str));
        }

        keys.into_iter()
            .map(|key| (key.to_string(), self.resolve(language, key)))
            .collect()
    }

    /// Selectable languages: English first, then the catalog's languages alphabetically.
    pub fn languages(&self) -> Vec<String> {
        let mut others: Vec<String> = self
            .catalog
            .keys()
            .filter(|language| language.as_str() != CANONICAL_LANGUAGE)
            .cloned()
            .collect();
        others.sort();

        std::iter::once(CANONICAL_LANGUAGE.to_string())
            .chain(others)
            .collect()
    }

    pub fn supports(&self, language: &str) -> bool {
        language == CANONICAL_LANGUAGE || self.catalog.contains_key(language)
    }
}

fn default_string(key: &str) -> Option<&'static str> {
    DEFAULT_STRINGS
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> UiStrings {
        let json = r#"{
            "English": {"app_title": "STIAB Helper", "only_english": "English only"},
            "French": {"app_title": "Assistant STIAB", "no_results": "Aucun résultat", "blank": " "}
        }"#;
        UiStrings::from_catalog(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn resolve_prefers_exact_language() {
        assert_eq!(catalog().resolve("French", "app_title"), "Assistant STIAB");
    }

    #[test]
    fn resolve_falls_back_to_english_table_then_builtin_then_key() {
        let strings = catalog();
        assert_eq!(strings.resolve("French", "only_english"), "English only");
        assert_eq!(strings.resolve("French", "best_match"), "Best Match");
        assert_eq!(strings.resolve("German", "app_title"), "STIAB Helper");
        assert_eq!(strings.resolve("French", "unknown_key"), "unknown_key");
    }

    #[test]
    fn blank_values_fall_through() {
        assert_eq!(catalog().resolve("French", "blank"), "blank");
    }

    #[test]
    fn languages_list_english_first() {
        assert_eq!(catalog().languages(), vec!["English", "French"]);
        assert_eq!(UiStrings::builtin().languages(), vec!["English"]);
    }

    #[test]
    fn resolve_all_covers_builtin_and_catalog_keys() {
        let all = catalog().resolve_all("French");
        assert_eq!(all["no_results"], "Aucun résultat");
        assert_eq!(all["when_to_call"], "When to Call Support");
        assert_eq!(all["only_english"], "English only");
    }

    #[tokio::test]
    async fn missing_file_keeps_builtin_strings() {
        let dir = tempfile::tempdir().unwrap();
        let strings = UiStrings::load(&dir.path().join("translations.json")).await;

        assert!(strings.load_warning().is_some());
        assert_eq!(strings.resolve("French", "app_title"), "STIAB Assistant");
    }
}
